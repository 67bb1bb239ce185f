//! Background path searches on a fixed set of worker threads.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, TryRecvError, bounded, unbounded};
use glam::Vec3;
use terranav_core::Context;
use terranav_graph::GridGraph;

use crate::astar::find_path_cancellable;
use crate::cost::{PathCost, WorldDistance};
use crate::error::{PathError, PathResult};

type Callback = Box<dyn FnOnce(PathResult) + Send + 'static>;

/// A search to run in the background.
#[derive(Clone)]
pub struct PathRequest {
    pub graph: Arc<GridGraph>,
    pub start: Vec3,
    pub goal: Vec3,
    pub cost: Arc<dyn PathCost + Send + Sync>,
}

impl PathRequest {
    /// A request costed by [`WorldDistance`].
    pub fn new(graph: Arc<GridGraph>, start: Vec3, goal: Vec3) -> Self {
        Self {
            graph,
            start,
            goal,
            cost: Arc::new(WorldDistance),
        }
    }

    pub fn with_cost(mut self, cost: impl PathCost + Send + Sync + 'static) -> Self {
        self.cost = Arc::new(cost);
        self
    }
}

impl std::fmt::Debug for PathRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathRequest")
            .field("start", &self.start)
            .field("goal", &self.goal)
            .field("nodes", &self.graph.len())
            .finish_non_exhaustive()
    }
}

/// Handle to a submitted request.
#[derive(Clone, Debug, Default)]
pub struct PathTicket {
    ctx: Context,
}

impl PathTicket {
    /// Stop the request. Its callback will not run unless it is already
    /// running.
    pub fn cancel(&self) {
        self.ctx.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.ctx.is_done()
    }
}

/// The result of a request, delivered later.
#[derive(Debug)]
pub struct PendingPath {
    ticket: PathTicket,
    receiver: Receiver<PathResult>,
}

impl PendingPath {
    /// A pending path that is already resolved.
    pub(crate) fn ready(result: PathResult) -> Self {
        let (tx, rx) = bounded(1);
        let _ = tx.send(result);
        Self {
            ticket: PathTicket::default(),
            receiver: rx,
        }
    }

    pub fn ticket(&self) -> &PathTicket {
        &self.ticket
    }

    pub fn cancel(&self) {
        self.ticket.cancel();
    }

    /// Block until the result arrives.
    pub fn wait(self) -> PathResult {
        self.receiver.recv().unwrap_or(Err(PathError::Cancelled))
    }

    /// The result if it has arrived. A cancelled request yields
    /// `Some(Err(PathError::Cancelled))` once the worker has dropped it.
    pub fn try_take(&mut self) -> Option<PathResult> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(PathError::Cancelled)),
        }
    }
}

struct Job {
    request: PathRequest,
    ctx: Context,
    callback: Callback,
}

/// A fixed pool of search threads fed from one job queue.
///
/// Every job gets its own search state. Dropping the pool finishes every
/// queued job and joins the workers.
pub struct PathWorkerPool {
    sender: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
}

impl PathWorkerPool {
    /// Spawn `workers` threads (at least one).
    pub fn new(workers: usize) -> std::io::Result<Self> {
        let (sender, receiver) = unbounded::<Job>();
        let count = workers.max(1);
        let mut handles = Vec::with_capacity(count);
        for i in 0..count {
            let jobs = receiver.clone();
            let handle = thread::Builder::new()
                .name(format!("terranav-path-{i}"))
                .spawn(move || worker_loop(jobs))?;
            handles.push(handle);
        }
        log::debug!("started {count} path workers");
        Ok(Self {
            sender: Some(sender),
            workers: handles,
        })
    }

    pub fn workers(&self) -> usize {
        self.workers.len()
    }

    /// Queue `request`; `callback` runs exactly once on a worker thread
    /// with the result, unless the request is cancelled first.
    pub fn submit(
        &self,
        request: PathRequest,
        callback: impl FnOnce(PathResult) + Send + 'static,
    ) -> PathTicket {
        let ticket = PathTicket::default();
        let job = Job {
            request,
            ctx: ticket.ctx.clone(),
            callback: Box::new(callback),
        };
        let Some(sender) = &self.sender else {
            (job.callback)(Err(PathError::WorkerUnavailable));
            return ticket;
        };
        if let Err(err) = sender.send(job) {
            log::error!("path workers are gone, rejecting request");
            (err.into_inner().callback)(Err(PathError::WorkerUnavailable));
        }
        ticket
    }

    /// Queue `request` and return a handle to collect the result.
    pub fn request(&self, request: PathRequest) -> PendingPath {
        let (tx, rx) = bounded(1);
        let ticket = self.submit(request, move |result| {
            let _ = tx.send(result);
        });
        PendingPath {
            ticket,
            receiver: rx,
        }
    }
}

impl Drop for PathWorkerPool {
    fn drop(&mut self) {
        drop(self.sender.take());
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                log::error!("path worker panicked");
            }
        }
    }
}

fn worker_loop(jobs: Receiver<Job>) {
    for job in jobs.iter() {
        run_job(job);
    }
}

fn run_job(job: Job) {
    let Job {
        request,
        ctx,
        callback,
    } = job;
    if ctx.is_done() {
        log::trace!("skipping cancelled path request");
        return;
    }

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        find_path_cancellable(
            &request.graph,
            request.start,
            request.goal,
            request.cost.as_ref(),
            &ctx,
        )
    }))
    .unwrap_or_else(|payload| {
        log::error!("path search panicked: {}", panic_message(payload.as_ref()));
        Err(PathError::SearchPanicked)
    });

    if ctx.is_done() {
        log::trace!("dropping result of cancelled path request");
        return;
    }
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| callback(result))) {
        log::error!("path callback panicked: {}", panic_message(payload.as_ref()));
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}

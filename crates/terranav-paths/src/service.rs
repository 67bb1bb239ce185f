//! Named graphs plus a shared worker pool.

use std::sync::Arc;

use glam::Vec3;
use terranav_graph::{GraphRegistry, GridGraph, GridNode};

use crate::astar::find_path;
use crate::cost::PathCost;
use crate::error::{PathError, PathResult};
use crate::pool::{PathRequest, PathTicket, PathWorkerPool, PendingPath};

/// Settings for [`PathfindingService`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ServiceConfig {
    /// Number of background search threads.
    pub workers: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { workers: 4 }
    }
}

/// Entry point for path queries against registered graphs.
///
/// Construct one, register graphs, then hand it to agents by reference.
pub struct PathfindingService {
    graphs: GraphRegistry,
    pool: PathWorkerPool,
}

impl PathfindingService {
    pub fn new(config: &ServiceConfig) -> std::io::Result<Self> {
        Ok(Self {
            graphs: GraphRegistry::new(),
            pool: PathWorkerPool::new(config.workers)?,
        })
    }

    /// Register `graph` under `uid`, returning the graph it replaced.
    pub fn register_graph(
        &mut self,
        uid: impl Into<String>,
        graph: GridGraph,
    ) -> Option<Arc<GridGraph>> {
        self.graphs.insert(uid, graph)
    }

    pub fn remove_graph(&mut self, uid: &str) -> Option<Arc<GridGraph>> {
        self.graphs.remove(uid)
    }

    pub fn graph(&self, uid: &str) -> Option<Arc<GridGraph>> {
        self.graphs.get(uid)
    }

    pub fn registry(&self) -> &GraphRegistry {
        &self.graphs
    }

    pub fn pool(&self) -> &PathWorkerPool {
        &self.pool
    }

    /// Blocking search on the calling thread.
    pub fn find_path<C: PathCost + ?Sized>(
        &self,
        uid: &str,
        start: Vec3,
        goal: Vec3,
        cost: &C,
    ) -> PathResult {
        let graph = self.lookup(uid)?;
        find_path(&graph, start, goal, cost)
    }

    /// Background search; `callback` runs on a worker thread. An unknown
    /// graph is reported through `callback` before this returns.
    pub fn find_path_async(
        &self,
        uid: &str,
        start: Vec3,
        goal: Vec3,
        cost: impl PathCost + Send + Sync + 'static,
        callback: impl FnOnce(PathResult) + Send + 'static,
    ) -> PathTicket {
        match self.lookup(uid) {
            Ok(graph) => self
                .pool
                .submit(PathRequest::new(graph, start, goal).with_cost(cost), callback),
            Err(e) => {
                callback(Err(e));
                PathTicket::default()
            }
        }
    }

    /// Background search collected through a [`PendingPath`].
    pub fn request_path(
        &self,
        uid: &str,
        start: Vec3,
        goal: Vec3,
        cost: impl PathCost + Send + Sync + 'static,
    ) -> PendingPath {
        match self.lookup(uid) {
            Ok(graph) => self
                .pool
                .request(PathRequest::new(graph, start, goal).with_cost(cost)),
            Err(e) => PendingPath::ready(Err(e)),
        }
    }

    /// Straight-line traversability between two nodes of graph `uid`.
    pub fn can_walk_between(&self, uid: &str, a: &GridNode, b: &GridNode) -> Result<bool, PathError> {
        let graph = self.lookup(uid)?;
        Ok(terranav_graph::can_walk_between(&graph, a, b))
    }

    fn lookup(&self, uid: &str) -> Result<Arc<GridGraph>, PathError> {
        self.graphs
            .get(uid)
            .ok_or_else(|| PathError::UnknownGraph(uid.to_string()))
    }
}

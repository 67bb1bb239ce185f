//! Path queries over a [`GridGraph`](terranav_graph::GridGraph).
//!
//! - **Search**: [`find_path`] runs A* between two world positions and
//!   rejects queries across disconnected areas without searching.
//! - **Background search**: [`PathWorkerPool`] runs the same search on a
//!   fixed set of worker threads and reports through a callback or a
//!   [`PendingPath`].
//! - **Service**: [`PathfindingService`] owns named graphs and the pool.
//! - **Following**: [`Navigator`] moves an agent along a path, skipping
//!   ahead whenever a straight line is traversable.
//!
//! # Cost functions
//!
//! | Type | Cost between two nodes |
//! |---|---|
//! | [`WorldDistance`] | Euclidean distance between world positions |
//! | [`GridDistance`] | octile distance on the grid, scaled by cell size |
//! | any `Fn(&GridNode, &GridNode) -> f32` | whatever the closure returns |

mod astar;
mod cost;
mod error;
mod navigator;
mod pool;
mod search;
mod service;

pub use astar::{find_path, find_path_cancellable};
pub use cost::{GridDistance, PathCost, WorldDistance};
pub use error::{NoPathReason, Path, PathError, PathResult};
pub use navigator::{NavStatus, Navigator, NavigatorConfig};
pub use pool::{PathRequest, PathTicket, PathWorkerPool, PendingPath};
pub use search::{NodeStatus, SearchContext};
pub use service::{PathfindingService, ServiceConfig};

#[cfg(test)]
pub(crate) mod test_support;

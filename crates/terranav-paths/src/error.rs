use glam::Vec3;
use terranav_graph::GridNode;
use thiserror::Error;

/// A found route, start node first and goal node last.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    pub nodes: Vec<GridNode>,
    /// Number of nodes taken from the open list during the search.
    pub iterations: usize,
}

impl Path {
    /// Sum of the straight-line world distances between consecutive nodes.
    pub fn world_length(&self) -> f32 {
        self.nodes
            .windows(2)
            .map(|w| w[0].world.distance(w[1].world))
            .sum()
    }
}

/// Why a search between two valid nodes produced no path.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NoPathReason {
    /// The endpoints lie in different areas, or one of them in none.
    Unreachable,
    /// The search ran out of open nodes.
    Exhausted,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PathError {
    #[error("no node at world position {0}")]
    NoNodeAtPosition(Vec3),

    #[error("no path exists ({reason:?} after {iterations} iterations)")]
    NoPathExists {
        reason: NoPathReason,
        iterations: usize,
    },

    #[error("path request was cancelled")]
    Cancelled,

    #[error("path search panicked")]
    SearchPanicked,

    #[error("unknown graph {0:?}")]
    UnknownGraph(String),

    #[error("no worker is available to run the search")]
    WorkerUnavailable,
}

impl PathError {
    /// Iterations spent before failing; 0 for failures found without
    /// searching.
    pub fn iterations(&self) -> usize {
        match self {
            PathError::NoPathExists { iterations, .. } => *iterations,
            _ => 0,
        }
    }
}

pub type PathResult = Result<Path, PathError>;

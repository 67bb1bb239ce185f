//! Error types for graph building and decoding.

use glam::Vec3;
use terranav_core::Point;
use thiserror::Error;

/// Malformed build input. Raised before any node is written, so a failed
/// build never yields a graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("{field} field is empty")]
    EmptyField { field: &'static str },

    #[error("{field} field holds {actual} samples, expected {expected}")]
    DimensionMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("cell size must be finite and positive on every axis, got {0}")]
    InvalidCellSize(Vec3),

    #[error("slope limit must be within (0, 90] degrees, got {0}")]
    InvalidSlopeLimit(f32),

    #[error("height at {0} is not finite")]
    NonFiniteHeight(Point),

    #[error("boundary node at {0} has neighbour links")]
    BoundaryConnected(Point),

    #[error("node at {0} links to a neighbour outside the grid")]
    NeighbourOutOfBounds(Point),
}

/// Errors while decoding a persisted graph.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a navigation graph (bad magic)")]
    BadMagic,

    #[error("unsupported graph format version {0}")]
    UnsupportedVersion(u16),

    #[error("invalid resolution multiplier {0}")]
    InvalidResolution(u8),

    #[error("graph of {columns}x{rows} nodes exceeds the decoder limit")]
    TooLarge { columns: u32, rows: u32 },

    #[error("invalid graph data: {0}")]
    Build(#[from] BuildError),
}

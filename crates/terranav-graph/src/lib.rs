//! Static navigation grid over a terrain height field.
//!
//! - **Building**: [`GraphBuilder`] samples a [`HeightField`] and a
//!   [`SlopeField`], classifies every cell and links neighbours of the same
//!   class into a [`GridGraph`].
//! - **Areas**: every connected group of traversable nodes carries an area
//!   id, so unreachable queries can be rejected without searching.
//! - **Shortcuts**: [`can_walk_between`] tests whether a straight grid line
//!   between two nodes stays inside one traversable class.
//! - **Persistence**: [`GraphEncoder`] / [`GraphDecoder`] and
//!   [`GraphSnapshot`] round-trip a built graph.
//!
//! A built graph is immutable and can be shared between threads behind an
//! `Arc` without locking.

mod area;
mod builder;
mod codec;
mod config;
mod error;
mod field;
mod graph;
mod node;
mod registry;
mod snapshot;
mod walk;

pub use builder::{GraphBuilder, build_graph};
pub use codec::{GraphDecoder, GraphEncoder};
pub use config::{BuildConfig, Resolution};
pub use error::{BuildError, CodecError};
pub use field::{HeightField, SlopeField};
pub use graph::GridGraph;
pub use node::{GridNode, NodeAttributes, TraversalClass};
pub use registry::GraphRegistry;
pub use snapshot::GraphSnapshot;
pub use walk::{GridLine, can_walk_between};

#[cfg(test)]
pub(crate) mod test_support;

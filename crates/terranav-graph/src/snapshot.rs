//! Minimal persisted form of a graph.

use glam::Vec3;
use terranav_core::DirectionMask;

use crate::config::Resolution;
use crate::error::BuildError;
use crate::graph::GridGraph;
use crate::node::NodeAttributes;

/// The data needed to rebuild a [`GridGraph`]: flags, neighbour masks and
/// world height per node. Horizontal world positions follow from the grid
/// coordinate and cell size; area ids are relabelled on load.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphSnapshot {
    pub resolution: Resolution,
    pub columns: u32,
    pub rows: u32,
    pub cell_size: Vec3,
    pub attributes: Vec<u8>,
    pub neighbours: Vec<u8>,
    pub heights: Vec<f32>,
}

impl GridGraph {
    /// Extract the persisted form of this graph.
    pub fn to_snapshot(&self) -> GraphSnapshot {
        let nodes = self.nodes();
        GraphSnapshot {
            resolution: self.resolution(),
            columns: self.columns() as u32,
            rows: self.rows() as u32,
            cell_size: self.cell_size(),
            attributes: nodes.iter().map(|n| n.attributes.bits()).collect(),
            neighbours: nodes.iter().map(|n| n.neighbours.bits()).collect(),
            heights: nodes.iter().map(|n| n.world.y).collect(),
        }
    }

    /// Rebuild a graph from its persisted form.
    ///
    /// The data is validated the same way as a fresh build: sizes must
    /// match, boundary nodes must carry no links and no link may leave the
    /// grid.
    pub fn from_snapshot(snapshot: &GraphSnapshot) -> Result<Self, BuildError> {
        let attributes: Vec<NodeAttributes> =
            snapshot.attributes.iter().map(|&b| NodeAttributes(b)).collect();
        let neighbours: Vec<DirectionMask> =
            snapshot.neighbours.iter().map(|&b| DirectionMask(b)).collect();
        let graph = GridGraph::from_parts(
            snapshot.columns as usize,
            snapshot.rows as usize,
            snapshot.cell_size,
            snapshot.resolution,
            &attributes,
            &neighbours,
            &snapshot.heights,
        )?;
        log::debug!(
            "restored {}x{} graph with {} areas",
            graph.columns(),
            graph.rows(),
            graph.area_count()
        );
        Ok(graph)
    }
}

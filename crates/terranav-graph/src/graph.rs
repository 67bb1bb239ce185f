//! The navigation grid: [`GridGraph`].

use glam::Vec3;
use terranav_core::{Direction, DirectionMask, Point, Range};

use crate::area;
use crate::config::Resolution;
use crate::error::BuildError;
use crate::node::{GridNode, NodeAttributes};

/// A dense grid of [`GridNode`]s.
///
/// Nodes are stored row-major, so a node's id is `column + row * columns`.
/// A graph can only be obtained fully built and validated, and exposes no
/// way to mutate it afterwards.
#[derive(Clone, Debug)]
pub struct GridGraph {
    nodes: Vec<GridNode>,
    bounds: Range,
    cell_size: Vec3,
    resolution: Resolution,
    area_count: u32,
}

impl GridGraph {
    /// Assemble a graph from per-node data.
    ///
    /// `heights` are world heights. The neighbour masks are validated
    /// against the boundary invariant and the grid bounds, then areas are
    /// labelled.
    pub(crate) fn from_parts(
        columns: usize,
        rows: usize,
        cell_size: Vec3,
        resolution: Resolution,
        attributes: &[NodeAttributes],
        neighbours: &[DirectionMask],
        heights: &[f32],
    ) -> Result<Self, BuildError> {
        let len = columns * rows;
        if len == 0 {
            return Err(BuildError::EmptyField { field: "node" });
        }
        check_len("attribute", len, attributes.len())?;
        check_len("neighbour", len, neighbours.len())?;
        check_len("height", len, heights.len())?;
        if !valid_cell_size(cell_size) {
            return Err(BuildError::InvalidCellSize(cell_size));
        }

        let bounds = Range::with_size(columns as i32, rows as i32);
        let mut nodes = Vec::with_capacity(len);
        for (id, pos) in bounds.iter().enumerate() {
            let attrs = attributes[id];
            let mask = neighbours[id];
            let height = heights[id];
            if !height.is_finite() {
                return Err(BuildError::NonFiniteHeight(pos));
            }
            if attrs.contains(NodeAttributes::BOUNDARY) && !mask.is_empty() {
                return Err(BuildError::BoundaryConnected(pos));
            }
            if mask.iter().any(|d| !bounds.contains(pos + d.offset())) {
                return Err(BuildError::NeighbourOutOfBounds(pos));
            }
            nodes.push(GridNode {
                id,
                pos,
                world: world_position(pos, height, cell_size),
                attributes: attrs,
                neighbours: mask,
                area: 0,
            });
        }

        let area_count = area::label_areas(&mut nodes, bounds);

        Ok(Self {
            nodes,
            bounds,
            cell_size,
            resolution,
            area_count,
        })
    }

    // -----------------------------------------------------------------------
    // Dimensions
    // -----------------------------------------------------------------------

    /// Number of columns.
    #[inline]
    pub fn columns(&self) -> usize {
        self.bounds.width() as usize
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.bounds.height() as usize
    }

    /// The grid rectangle `[0, columns) × [0, rows)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Spacing between nodes: `x` between columns, `z` between rows; `y`
    /// is the height scale the source was built with.
    #[inline]
    pub fn cell_size(&self) -> Vec3 {
        self.cell_size
    }

    #[inline]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Total number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A built graph always holds at least one node.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of distinct area ids; ids run from 1 to this value.
    #[inline]
    pub fn area_count(&self) -> u32 {
        self.area_count
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// All nodes in id order.
    #[inline]
    pub fn nodes(&self) -> &[GridNode] {
        &self.nodes
    }

    /// Node by id.
    #[inline]
    pub fn node(&self, id: usize) -> Option<&GridNode> {
        self.nodes.get(id)
    }

    /// Node at a grid coordinate, or `None` outside the grid.
    #[inline]
    pub fn node_at(&self, pos: Point) -> Option<&GridNode> {
        self.index(pos).map(|i| &self.nodes[i])
    }

    /// The node whose cell contains `world`, measured in the horizontal
    /// plane. `None` when the position falls outside the grid.
    pub fn node_at_world(&self, world: Vec3) -> Option<&GridNode> {
        let pos = self.project(world)?;
        self.node_at(pos)
    }

    /// Like [`node_at_world`](Self::node_at_world) but clamps positions
    /// outside the grid onto the nearest edge node.
    pub fn nearest_node_clamped(&self, world: Vec3) -> &GridNode {
        let pos = self.project(world).unwrap_or(Point::ZERO);
        let i = self.index(self.bounds.clamp(pos)).unwrap_or(0);
        &self.nodes[i]
    }

    /// The linked neighbour of `node` in direction `dir`, if its bit is set.
    #[inline]
    pub fn neighbour(&self, node: &GridNode, dir: Direction) -> Option<&GridNode> {
        if !node.has_neighbour(dir) {
            return None;
        }
        self.node_at(node.pos + dir.offset())
    }

    /// Iterate the linked neighbours of `node` in expansion order.
    pub fn neighbours<'a>(
        &'a self,
        node: &'a GridNode,
    ) -> impl Iterator<Item = (Direction, &'a GridNode)> + 'a {
        node.neighbours
            .iter()
            .filter_map(move |d| self.node_at(node.pos + d.offset()).map(|n| (d, n)))
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some(p.x as usize + p.y as usize * self.columns())
    }

    /// Nearest grid cell to a world position, possibly outside the grid.
    fn project(&self, world: Vec3) -> Option<Point> {
        let column = (world.z / self.cell_size.x).round();
        let row = (world.x / self.cell_size.z).round();
        if !column.is_finite() || !row.is_finite() {
            return None;
        }
        let column = column.clamp(i32::MIN as f32, i32::MAX as f32) as i32;
        let row = row.clamp(i32::MIN as f32, i32::MAX as f32) as i32;
        Some(Point::new(column, row))
    }
}

/// World position of the node at `pos` with world height `height`.
#[inline]
pub(crate) fn world_position(pos: Point, height: f32, cell_size: Vec3) -> Vec3 {
    Vec3::new(pos.y as f32 * cell_size.z, height, pos.x as f32 * cell_size.x)
}

pub(crate) fn valid_cell_size(cell_size: Vec3) -> bool {
    cell_size.is_finite() && cell_size.x > 0.0 && cell_size.y > 0.0 && cell_size.z > 0.0
}

fn check_len(field: &'static str, expected: usize, actual: usize) -> Result<(), BuildError> {
    if expected == actual {
        Ok(())
    } else {
        Err(BuildError::DimensionMismatch {
            field,
            expected,
            actual,
        })
    }
}

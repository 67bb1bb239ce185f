//! Grid nodes and their classification flags.

use std::ops::BitOr;

use glam::Vec3;
use terranav_core::{Direction, DirectionMask, Point};

/// Classification flags of a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeAttributes(pub u8);

impl NodeAttributes {
    pub const NONE: Self = Self(0x00);
    pub const WALKABLE: Self = Self(0x01);
    pub const WATER: Self = Self(0x02);
    pub const BOUNDARY: Self = Self(0x80);

    /// Whether this set contains all the bits from `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Whether no flag is set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Raw bits.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for NodeAttributes {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// The dominant traversal class of a node. Edges only join nodes of the
/// same class.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TraversalClass {
    Walkable,
    Water,
}

/// One cell of the navigation grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridNode {
    /// Row-major index into the graph's node array.
    pub id: usize,
    /// Grid coordinate (`x` = column, `y` = row).
    pub pos: Point,
    /// World-space position, including the sampled height.
    pub world: Vec3,
    pub attributes: NodeAttributes,
    /// Directions in which a traversable neighbour is linked.
    pub neighbours: DirectionMask,
    /// Connected-area id; 0 means the node belongs to no area.
    pub area: u32,
}

impl GridNode {
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.attributes.contains(NodeAttributes::BOUNDARY)
    }

    /// Walkable nodes are never boundary nodes, whatever their flags say.
    #[inline]
    pub fn is_walkable(&self) -> bool {
        !self.is_boundary() && self.attributes.contains(NodeAttributes::WALKABLE)
    }

    #[inline]
    pub fn is_water(&self) -> bool {
        !self.is_boundary() && self.attributes.contains(NodeAttributes::WATER)
    }

    /// The class used for connectivity, or `None` for boundary and
    /// unclassified (too steep) nodes. Water wins over walkable when both
    /// flags are present.
    #[inline]
    pub fn traversal_class(&self) -> Option<TraversalClass> {
        if self.is_water() {
            Some(TraversalClass::Water)
        } else if self.is_walkable() {
            Some(TraversalClass::Walkable)
        } else {
            None
        }
    }

    /// Whether the neighbour in direction `dir` is linked.
    #[inline]
    pub fn has_neighbour(&self, dir: Direction) -> bool {
        self.neighbours.has(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(attributes: NodeAttributes) -> GridNode {
        GridNode {
            id: 0,
            pos: Point::ZERO,
            world: Vec3::ZERO,
            attributes,
            neighbours: DirectionMask::NONE,
            area: 0,
        }
    }

    #[test]
    fn boundary_is_never_walkable() {
        let n = node(NodeAttributes::BOUNDARY | NodeAttributes::WALKABLE);
        assert!(n.is_boundary());
        assert!(!n.is_walkable());
        assert_eq!(n.traversal_class(), None);
    }

    #[test]
    fn classes() {
        assert_eq!(
            node(NodeAttributes::WALKABLE).traversal_class(),
            Some(TraversalClass::Walkable)
        );
        assert_eq!(node(NodeAttributes::WATER).traversal_class(), Some(TraversalClass::Water));
        assert_eq!(
            node(NodeAttributes::WATER | NodeAttributes::WALKABLE).traversal_class(),
            Some(TraversalClass::Water)
        );
        assert_eq!(node(NodeAttributes::NONE).traversal_class(), None);
    }
}

use terranav_graph::GridNode;

/// Cost of travelling between two nodes.
///
/// The same function gives the step cost between linked neighbours and the
/// estimate from a node to the goal, so it should never overestimate the
/// cost of the cheapest route.
pub trait PathCost {
    fn cost(&self, from: &GridNode, to: &GridNode) -> f32;
}

impl<F> PathCost for F
where
    F: Fn(&GridNode, &GridNode) -> f32,
{
    #[inline]
    fn cost(&self, from: &GridNode, to: &GridNode) -> f32 {
        self(from, to)
    }
}

/// Straight-line distance between world positions, height included.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WorldDistance;

impl PathCost for WorldDistance {
    #[inline]
    fn cost(&self, from: &GridNode, to: &GridNode) -> f32 {
        from.world.distance(to.world)
    }
}

/// Octile distance on the grid, in world units. Ignores height.
///
/// Straight steps cost the cell spacing along their axis; diagonal steps
/// cost the length of the cell diagonal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridDistance {
    pub column_spacing: f32,
    pub row_spacing: f32,
}

impl GridDistance {
    /// Spacing taken from a graph's cell size.
    pub fn for_graph(graph: &terranav_graph::GridGraph) -> Self {
        let cell = graph.cell_size();
        Self {
            column_spacing: cell.x,
            row_spacing: cell.z,
        }
    }
}

impl Default for GridDistance {
    fn default() -> Self {
        Self {
            column_spacing: 1.0,
            row_spacing: 1.0,
        }
    }
}

impl PathCost for GridDistance {
    fn cost(&self, from: &GridNode, to: &GridNode) -> f32 {
        let dx = (to.pos.x - from.pos.x).unsigned_abs() as f32;
        let dy = (to.pos.y - from.pos.y).unsigned_abs() as f32;
        let diagonal = dx.min(dy);
        let diagonal_len = self.column_spacing.hypot(self.row_spacing);
        diagonal * diagonal_len
            + (dx - diagonal) * self.column_spacing
            + (dy - diagonal) * self.row_spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::flat_graph;
    use terranav_core::Point;

    #[test]
    fn world_distance_is_euclidean() {
        let g = flat_graph(6, 6);
        let a = g.node_at(Point::new(1, 1)).unwrap();
        let b = g.node_at(Point::new(4, 5)).unwrap();
        let d = WorldDistance.cost(a, b);
        assert!((d - a.world.distance(b.world)).abs() < 1e-6);
        assert_eq!(WorldDistance.cost(a, a), 0.0);
    }

    #[test]
    fn grid_distance_is_octile() {
        let g = flat_graph(8, 8);
        let cost = GridDistance {
            column_spacing: 2.0,
            row_spacing: 3.0,
        };
        let a = g.node_at(Point::new(1, 1)).unwrap();
        let b = g.node_at(Point::new(4, 2)).unwrap();
        // One diagonal step plus two column steps.
        let expected = 13f32.sqrt() + 2.0 * 2.0;
        assert!((cost.cost(a, b) - expected).abs() < 1e-5);
        assert_eq!(cost.cost(a, b), cost.cost(b, a));
    }

    #[test]
    fn grid_distance_for_unit_graph() {
        let g = flat_graph(4, 4);
        let cost = GridDistance::for_graph(&g);
        assert_eq!(cost, GridDistance::default());
    }

    #[test]
    fn closures_are_costs() {
        let g = flat_graph(4, 4);
        let a = g.node_at(Point::new(1, 1)).unwrap();
        let b = g.node_at(Point::new(2, 2)).unwrap();
        let unit = |_: &GridNode, _: &GridNode| 1.0;
        assert_eq!(unit.cost(a, b), 1.0);
    }
}

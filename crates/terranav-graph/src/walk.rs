//! Straight-line traversability between two nodes.
//!
//! The shortcut test walks the digital (Bresenham) line between the two
//! grid cells. The line is traversable when every stepped cell has the
//! same traversal class as the endpoints and each step between consecutive
//! cells follows a set neighbour link. This is the single-step connectivity
//! rule of the builder, applied across a span.
//!
//! Bresenham picks different cells for A to B than for B to A, so the line
//! is always drawn from the endpoint that comes first in row-major order.

use terranav_core::{Direction, Point};

use crate::graph::GridGraph;
use crate::node::GridNode;

/// Iterator over the cells of the digital line from `from` to `to`,
/// both inclusive. Consecutive cells are always 8-way neighbours.
#[derive(Clone, Debug)]
pub struct GridLine {
    cur: Point,
    end: Point,
    dx: i32,
    dy: i32,
    sx: i32,
    sy: i32,
    err: i32,
    done: bool,
}

impl GridLine {
    pub fn new(from: Point, to: Point) -> Self {
        let dx = (to.x - from.x).abs();
        let dy = (to.y - from.y).abs();
        Self {
            cur: from,
            end: to,
            dx,
            dy,
            sx: if from.x < to.x { 1 } else { -1 },
            sy: if from.y < to.y { 1 } else { -1 },
            err: dx - dy,
            done: false,
        }
    }
}

impl Iterator for GridLine {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.done {
            return None;
        }
        let p = self.cur;
        if p == self.end {
            self.done = true;
            return Some(p);
        }
        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.cur.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.cur.y += self.sy;
        }
        Some(p)
    }
}

/// Whether an agent can travel in a straight line from `from` to `to`.
///
/// Both nodes must be walkable (or both water); boundary and unclassified
/// nodes never pass. The graph's own copy of each cell is consulted, so
/// stale node copies cannot widen the test.
pub fn can_walk_between(graph: &GridGraph, from: &GridNode, to: &GridNode) -> bool {
    let (from, to) = if (from.pos.y, from.pos.x) <= (to.pos.y, to.pos.x) {
        (from, to)
    } else {
        (to, from)
    };
    let Some(start) = graph.node_at(from.pos) else {
        return false;
    };
    let Some(class) = start.traversal_class() else {
        return false;
    };
    match graph.node_at(to.pos) {
        Some(end) if end.traversal_class() == Some(class) => {}
        _ => return false,
    }

    let mut prev = start;
    for p in GridLine::new(from.pos, to.pos).skip(1) {
        let Some(node) = graph.node_at(p) else {
            return false;
        };
        if node.traversal_class() != Some(class) {
            return false;
        }
        match Direction::from_offset(p - prev.pos) {
            Some(dir) if prev.has_neighbour(dir) => {}
            _ => return false,
        }
        prev = node;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{basin_5x5, build, flat_graph, scattered_water, two_islands};

    fn at(g: &GridGraph, x: i32, y: i32) -> GridNode {
        *g.node_at(Point::new(x, y)).unwrap()
    }

    #[test]
    fn line_includes_both_endpoints() {
        let pts: Vec<_> = GridLine::new(Point::new(0, 0), Point::new(3, 1)).collect();
        assert_eq!(pts.first(), Some(&Point::new(0, 0)));
        assert_eq!(pts.last(), Some(&Point::new(3, 1)));
        assert_eq!(pts.len(), 4);
        for w in pts.windows(2) {
            assert_eq!(w[0].chebyshev(w[1]), 1);
        }
    }

    #[test]
    fn line_single_point() {
        let pts: Vec<_> = GridLine::new(Point::new(2, 2), Point::new(2, 2)).collect();
        assert_eq!(pts, vec![Point::new(2, 2)]);
    }

    #[test]
    fn line_is_reversible_in_length() {
        let a = Point::new(1, 7);
        let b = Point::new(9, 2);
        assert_eq!(GridLine::new(a, b).count(), GridLine::new(b, a).count());
        assert_eq!(GridLine::new(a, b).count() as i32, a.chebyshev(b) + 1);
    }

    #[test]
    fn open_ground_is_walkable() {
        let g = flat_graph(10, 8);
        assert!(can_walk_between(&g, &at(&g, 1, 1), &at(&g, 8, 6)));
        assert!(can_walk_between(&g, &at(&g, 8, 1), &at(&g, 1, 6)));
        assert!(can_walk_between(&g, &at(&g, 4, 4), &at(&g, 4, 4)));
    }

    #[test]
    fn water_blocks_the_line() {
        let g = basin_5x5();
        assert!(!can_walk_between(&g, &at(&g, 1, 1), &at(&g, 3, 3)));
        assert!(!can_walk_between(&g, &at(&g, 2, 1), &at(&g, 2, 3)));
        // Around the edge of the basin the line stays on land.
        assert!(can_walk_between(&g, &at(&g, 1, 1), &at(&g, 3, 1)));
        assert!(can_walk_between(&g, &at(&g, 1, 1), &at(&g, 1, 3)));
    }

    #[test]
    fn cross_class_endpoints_fail() {
        let g = two_islands();
        assert!(!can_walk_between(&g, &at(&g, 2, 2), &at(&g, 3, 2)));
        assert!(!can_walk_between(&g, &at(&g, 1, 2), &at(&g, 5, 2)));
        // Water to water along the channel is fine.
        assert!(can_walk_between(&g, &at(&g, 3, 1), &at(&g, 3, 3)));
    }

    #[test]
    fn boundary_and_steep_never_pass() {
        let g = flat_graph(6, 6);
        assert!(!can_walk_between(&g, &at(&g, 0, 0), &at(&g, 2, 2)));
        assert!(!can_walk_between(&g, &at(&g, 0, 0), &at(&g, 0, 0)));

        let steep = build(5, 5, |_, _| 10.0, 0.0, 45.0, 0.0);
        assert!(!can_walk_between(&steep, &at(&steep, 1, 1), &at(&steep, 1, 1)));
    }

    #[test]
    fn symmetric_on_scattered_water() {
        for seed in 0..4 {
            let g = scattered_water(seed, 16, 16);
            let nodes = g.nodes();
            for a in nodes {
                for b in nodes {
                    assert_eq!(
                        can_walk_between(&g, a, b),
                        can_walk_between(&g, b, a),
                        "seed {seed}: {} <-> {}",
                        a.pos,
                        b.pos
                    );
                }
            }
        }
    }

    #[test]
    fn line_order_does_not_change_the_answer() {
        // Water at (2, 1): the line (1,1)->(3,2) steps through it, while the
        // reverse line (3,2)->(1,1) passes over (2, 2).
        let g = build(6, 5, |c, r| if (c, r) == (2, 1) { 0.0 } else { 10.0 }, 1.0, 89.0, 5.0);
        let a = at(&g, 1, 1);
        let b = at(&g, 3, 2);
        let forward: Vec<_> = GridLine::new(a.pos, b.pos).collect();
        let backward: Vec<_> = GridLine::new(b.pos, a.pos).collect();
        assert!(forward.contains(&Point::new(2, 1)));
        assert!(!backward.contains(&Point::new(2, 1)));
        assert_eq!(can_walk_between(&g, &a, &b), can_walk_between(&g, &b, &a));
        assert!(!can_walk_between(&g, &b, &a));
    }
}

//! Graphs shared by the unit tests.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use terranav_core::Point;
use terranav_graph::{BuildConfig, GridGraph, HeightField, SlopeField, build_graph};

fn build(
    columns: usize,
    rows: usize,
    height: impl FnMut(usize, usize) -> f32,
    slopes: Option<SlopeField>,
    slope_limit_degrees: f32,
    water_height: f32,
) -> GridGraph {
    let heights = HeightField::from_fn(columns, rows, Vec3::ONE, height);
    let slopes = slopes.unwrap_or_else(|| SlopeField::uniform(1.0));
    let config = BuildConfig {
        water_height,
        slope_limit_degrees,
        ..Default::default()
    };
    build_graph(&heights, &slopes, &config).unwrap()
}

/// Flat dry land inside a boundary ring, unit cells.
pub(crate) fn flat_graph(columns: usize, rows: usize) -> GridGraph {
    build(columns, rows, |_, _| 10.0, None, 45.0, 0.0)
}

/// 5×5 land with a single water cell in the middle.
pub(crate) fn basin_5x5() -> GridGraph {
    build(5, 5, |c, r| if (c, r) == (2, 2) { 0.0 } else { 10.0 }, None, 89.0, 5.0)
}

/// 7×5 grid: land in columns 1-2 and 4-5, a water channel in column 3.
pub(crate) fn two_islands() -> GridGraph {
    build(7, 5, |c, _| if c == 3 { 0.0 } else { 10.0 }, None, 45.0, 5.0)
}

/// Rolling hills with lakes, seeded.
pub(crate) fn random_terrain(seed: u64, columns: usize, rows: usize) -> GridGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let (pc, pr) = (rng.random_range(0.0..6.0), rng.random_range(0.0..6.0));
    let heights = HeightField::from_fn(columns, rows, Vec3::ONE, |c, r| {
        8.0 + 3.0 * (c as f32 * 0.3 + pc).sin() * (r as f32 * 0.3 + pr).cos()
            + rng.random_range(0.0..0.5)
    });
    let slopes = SlopeField::from_height_field(&heights);
    let config = BuildConfig {
        water_height: 6.0,
        slope_limit_degrees: 60.0,
        ..Default::default()
    };
    build_graph(&heights, &slopes, &config).unwrap()
}

/// World position of the node at column `x`, row `y`.
pub(crate) fn world(graph: &GridGraph, x: i32, y: i32) -> Vec3 {
    graph.node_at(Point::new(x, y)).unwrap().world
}

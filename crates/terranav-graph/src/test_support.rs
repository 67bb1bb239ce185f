//! Small graphs shared by the unit tests.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::builder::build_graph;
use crate::config::BuildConfig;
use crate::field::{HeightField, SlopeField};
use crate::graph::GridGraph;

/// Column spacing 2, row spacing 3, so mixed-up axes show up in tests.
pub(crate) const SCALE: Vec3 = Vec3::new(2.0, 1.0, 3.0);

pub(crate) fn build(
    columns: usize,
    rows: usize,
    height: impl FnMut(usize, usize) -> f32,
    slope_cosine: f32,
    slope_limit_degrees: f32,
    water_height: f32,
) -> GridGraph {
    let heights = HeightField::from_fn(columns, rows, SCALE, height);
    let config = BuildConfig {
        water_height,
        slope_limit_degrees,
        ..Default::default()
    };
    build_graph(&heights, &SlopeField::uniform(slope_cosine), &config).unwrap()
}

/// Flat dry land inside a boundary ring.
pub(crate) fn flat_graph(columns: usize, rows: usize) -> GridGraph {
    build(columns, rows, |_, _| 10.0, 1.0, 45.0, 0.0)
}

/// 5×5 land with a single water cell in the middle.
pub(crate) fn basin_5x5() -> GridGraph {
    build(5, 5, |c, r| if (c, r) == (2, 2) { 0.0 } else { 10.0 }, 1.0, 89.0, 5.0)
}

/// 7×5 grid: land in columns 1-2 and 4-5, a water channel in column 3.
pub(crate) fn two_islands() -> GridGraph {
    build(7, 5, |c, _| if c == 3 { 0.0 } else { 10.0 }, 1.0, 45.0, 5.0)
}

/// Land with roughly a third of the cells flooded at random, seeded.
pub(crate) fn scattered_water(seed: u64, columns: usize, rows: usize) -> GridGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    build(columns, rows, |_, _| rng.random_range(0.0..15.0), 1.0, 89.0, 5.0)
}

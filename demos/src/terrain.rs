//! Seeded rolling-hills terrain.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use terranav_graph::HeightField;

use crate::config::TerrainConfig;

/// Random samples blurred `smoothing` times, then stretched to
/// `[0, relief]`.
pub fn generate_terrain(config: &TerrainConfig) -> HeightField {
    let (columns, rows) = (config.columns.max(1), config.rows.max(1));
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut samples: Vec<f32> = (0..columns * rows)
        .map(|_| rng.random_range(0.0..1.0))
        .collect();

    for _ in 0..config.smoothing {
        samples = blur(&samples, columns, rows);
    }

    let (lo, hi) = samples
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), &h| (lo.min(h), hi.max(h)));
    let span = if hi > lo { hi - lo } else { 1.0 };
    let heights = samples
        .iter()
        .map(|h| (h - lo) / span * config.relief)
        .collect();

    let scale = Vec3::new(config.spacing, 1.0, config.spacing);
    HeightField::new(columns, rows, heights, scale)
}

/// 3×3 box blur with clamped edges.
fn blur(src: &[f32], columns: usize, rows: usize) -> Vec<f32> {
    let mut out = vec![0.0; src.len()];
    for row in 0..rows {
        for column in 0..columns {
            let mut sum = 0.0;
            let mut count = 0.0;
            for r in row.saturating_sub(1)..=(row + 1).min(rows - 1) {
                for c in column.saturating_sub(1)..=(column + 1).min(columns - 1) {
                    sum += src[c + r * columns];
                    count += 1.0;
                }
            }
            out[column + row * columns] = sum / count;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> TerrainConfig {
        TerrainConfig {
            columns: 17,
            rows: 9,
            ..Default::default()
        }
    }

    #[test]
    fn same_seed_same_terrain() {
        assert_eq!(generate_terrain(&small()), generate_terrain(&small()));
        let other = TerrainConfig {
            seed: 1,
            ..small()
        };
        assert_ne!(generate_terrain(&small()).heights, generate_terrain(&other).heights);
    }

    #[test]
    fn heights_span_the_relief() {
        let cfg = small();
        let field = generate_terrain(&cfg);
        assert_eq!(field.heights.len(), 17 * 9);
        let max = field.heights.iter().cloned().fold(f32::MIN, f32::max);
        let min = field.heights.iter().cloned().fold(f32::MAX, f32::min);
        assert_eq!(min, 0.0);
        assert!((max - cfg.relief).abs() < 1e-3);
    }

    #[test]
    fn blur_keeps_constant_fields() {
        let flat = vec![2.0; 12];
        assert_eq!(blur(&flat, 4, 3), flat);
    }
}

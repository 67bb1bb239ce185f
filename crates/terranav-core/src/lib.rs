//! Core types for terrain navigation.
//!
//! This crate provides the foundational types used across the *terranav*
//! crates: grid geometry, the eight compass directions used for node
//! connectivity, and a cooperative cancellation token for background
//! searches. World-space positions are [`glam::Vec3`].

pub mod context;
pub mod direction;
pub mod geom;

pub use context::Context;
pub use direction::{Direction, DirectionMask};
pub use geom::{Point, Range};
pub use glam::Vec3;

/// Distance between two world positions measured in the horizontal (x, z)
/// plane only.
#[inline]
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_distance_ignores_height() {
        let a = Vec3::new(0.0, 10.0, 0.0);
        let b = Vec3::new(3.0, -50.0, 4.0);
        assert_eq!(horizontal_distance(a, b), 5.0);
    }
}

//! Shared pieces of the terranav demos: TOML configuration and a seeded
//! terrain generator.

mod config;
mod terrain;

pub use config::{DemoConfig, DemoError, TerrainConfig};
pub use terrain::generate_terrain;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use terranav_graph::{BuildConfig, BuildError, CodecError};
use terranav_paths::{NavigatorConfig, ServiceConfig};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("graph build failed: {0}")]
    Build(#[from] BuildError),

    #[error("graph codec failed: {0}")]
    Codec(#[from] CodecError),
}

/// Synthetic terrain parameters.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Height samples per side.
    pub columns: usize,
    pub rows: usize,
    pub seed: u64,
    /// Horizontal spacing between samples, in world units.
    pub spacing: f32,
    /// Peak-to-trough height of the hills.
    pub relief: f32,
    /// Number of smoothing passes over the random samples.
    pub smoothing: usize,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            columns: 129,
            rows: 129,
            seed: 42,
            spacing: 1.0,
            relief: 30.0,
            smoothing: 6,
        }
    }
}

/// Everything the demo reads from its TOML file. Missing sections keep
/// their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DemoConfig {
    pub terrain: TerrainConfig,
    pub build: BuildConfig,
    pub service: ServiceConfig,
    pub navigator: NavigatorConfig,
    /// Random queries to run in each mode.
    pub queries: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            terrain: TerrainConfig::default(),
            build: BuildConfig::default(),
            service: ServiceConfig::default(),
            navigator: NavigatorConfig::default(),
            queries: 50,
        }
    }
}

impl DemoConfig {
    /// Load from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DemoError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, DemoError> {
        Ok(toml::from_str(text)?)
    }
}

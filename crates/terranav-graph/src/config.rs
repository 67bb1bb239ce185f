//! Build configuration.

use std::fmt;

/// How many source height samples map onto one graph node along each axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u32", into = "u32")
)]
pub enum Resolution {
    #[default]
    X1,
    X2,
    X4,
    X8,
    X16,
}

impl Resolution {
    /// Every supported multiplier, finest first.
    pub const ALL: [Resolution; 5] = [
        Resolution::X1,
        Resolution::X2,
        Resolution::X4,
        Resolution::X8,
        Resolution::X16,
    ];

    /// Source cells per graph node.
    #[inline]
    pub const fn factor(self) -> usize {
        match self {
            Resolution::X1 => 1,
            Resolution::X2 => 2,
            Resolution::X4 => 4,
            Resolution::X8 => 8,
            Resolution::X16 => 16,
        }
    }

    /// Graph nodes along an axis with `source_cells` samples.
    ///
    /// The first and last source samples always map onto a node.
    #[inline]
    pub const fn graph_cells(self, source_cells: usize) -> usize {
        if source_cells == 0 {
            return 0;
        }
        (source_cells - 1) / self.factor() + 1
    }
}

impl TryFrom<u32> for Resolution {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Resolution::X1),
            2 => Ok(Resolution::X2),
            4 => Ok(Resolution::X4),
            8 => Ok(Resolution::X8),
            16 => Ok(Resolution::X16),
            other => Err(format!("unsupported resolution multiplier {other}, expected 1, 2, 4, 8 or 16")),
        }
    }
}

impl From<Resolution> for u32 {
    fn from(r: Resolution) -> Self {
        r.factor() as u32
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.factor(), self.factor())
    }
}

/// Parameters for classifying terrain cells.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BuildConfig {
    /// Cells whose world height is below this are water.
    pub water_height: f32,
    /// Steepest walkable slope, in degrees.
    pub slope_limit_degrees: f32,
    pub resolution: Resolution,
}

impl BuildConfig {
    /// The slope limit as a cosine threshold: a cell is walkable when its
    /// cosine-of-slope is at least this value.
    #[inline]
    pub fn slope_cosine(&self) -> f32 {
        self.slope_limit_degrees.to_radians().cos()
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            water_height: 0.0,
            slope_limit_degrees: 45.0,
            resolution: Resolution::X1,
        }
    }
}

//! Terrain source fields: [`HeightField`] and [`SlopeField`].

use glam::Vec3;

/// Row-major terrain heights plus the per-axis scale that turns a sample
/// into a world position.
///
/// `scale.x` spaces columns, `scale.z` spaces rows and `scale.y` scales the
/// raw height, so sample (column, row) sits at
/// `(row * scale.z, height * scale.y, column * scale.x)`.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightField {
    pub columns: usize,
    pub rows: usize,
    pub heights: Vec<f32>,
    pub scale: Vec3,
}

impl HeightField {
    pub fn new(columns: usize, rows: usize, heights: Vec<f32>, scale: Vec3) -> Self {
        Self {
            columns,
            rows,
            heights,
            scale,
        }
    }

    /// Build a field by evaluating `f(column, row)` for every sample.
    pub fn from_fn(
        columns: usize,
        rows: usize,
        scale: Vec3,
        mut f: impl FnMut(usize, usize) -> f32,
    ) -> Self {
        let mut heights = Vec::with_capacity(columns * rows);
        for row in 0..rows {
            for column in 0..columns {
                heights.push(f(column, row));
            }
        }
        Self::new(columns, rows, heights, scale)
    }

    /// Raw (unscaled) height at a sample. Panics when out of range.
    #[inline]
    pub fn height(&self, column: usize, row: usize) -> f32 {
        self.heights[column + row * self.columns]
    }

    /// World-space height at a sample.
    #[inline]
    pub fn world_height(&self, column: usize, row: usize) -> f32 {
        self.height(column, row) * self.scale.y
    }
}

/// Cosine-of-slope samples, bilinearly interpolated at normalised
/// coordinates. The grid may be finer or coarser than the height field.
#[derive(Clone, Debug, PartialEq)]
pub struct SlopeField {
    pub columns: usize,
    pub rows: usize,
    pub values: Vec<f32>,
}

impl SlopeField {
    pub fn new(columns: usize, rows: usize, values: Vec<f32>) -> Self {
        Self {
            columns,
            rows,
            values,
        }
    }

    /// A single-sample field: every position reads `cosine`.
    pub fn uniform(cosine: f32) -> Self {
        Self::new(1, 1, vec![cosine])
    }

    /// Derive slopes from the surface normals of a height field.
    ///
    /// Gradients use central differences (one-sided at the edges); the
    /// cosine of the slope angle is the vertical component of the unit
    /// normal, `1 / sqrt(1 + dh/dx² + dh/dz²)`.
    pub fn from_height_field(field: &HeightField) -> Self {
        let (cols, rows) = (field.columns, field.rows);
        let mut values = Vec::with_capacity(cols * rows);
        for row in 0..rows {
            for column in 0..cols {
                let gx = gradient(column, cols, field.scale.x, |c| field.world_height(c, row));
                let gz = gradient(row, rows, field.scale.z, |r| field.world_height(column, r));
                values.push(1.0 / (1.0 + gx * gx + gz * gz).sqrt());
            }
        }
        Self::new(cols, rows, values)
    }

    /// Bilinear sample at normalised `(u, v)`, each in `[0, 1]` (clamped).
    pub fn sample(&self, u: f32, v: f32) -> f32 {
        let x = u.clamp(0.0, 1.0) * (self.columns.saturating_sub(1)) as f32;
        let y = v.clamp(0.0, 1.0) * (self.rows.saturating_sub(1)) as f32;

        let x0 = (x.floor() as usize).min(self.columns - 1);
        let y0 = (y.floor() as usize).min(self.rows - 1);
        let x1 = (x0 + 1).min(self.columns - 1);
        let y1 = (y0 + 1).min(self.rows - 1);
        let tx = x - x0 as f32;
        let ty = y - y0 as f32;

        let a = self.at(x0, y0);
        let b = self.at(x1, y0);
        let c = self.at(x0, y1);
        let d = self.at(x1, y1);

        let top = a + (b - a) * tx;
        let bottom = c + (d - c) * tx;
        top + (bottom - top) * ty
    }

    #[inline]
    fn at(&self, column: usize, row: usize) -> f32 {
        self.values[column + row * self.columns]
    }
}

/// Height change per world unit along one axis at index `i`.
fn gradient(i: usize, len: usize, spacing: f32, h: impl Fn(usize) -> f32) -> f32 {
    if len < 2 {
        return 0.0;
    }
    let lo = i.saturating_sub(1);
    let hi = (i + 1).min(len - 1);
    (h(hi) - h(lo)) / ((hi - lo) as f32 * spacing)
}

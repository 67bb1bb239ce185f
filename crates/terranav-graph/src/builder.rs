//! One-shot graph construction from terrain fields.

use glam::Vec3;
use terranav_core::{Direction, DirectionMask, Point, Range};

use crate::config::BuildConfig;
use crate::error::BuildError;
use crate::field::{HeightField, SlopeField};
use crate::graph::{GridGraph, valid_cell_size};
use crate::node::NodeAttributes;

/// Builds a [`GridGraph`] from a height field and a slope field.
///
/// Building happens in three passes: classify every cell, link same-class
/// neighbours, then label connected areas. Input is validated up front and
/// a failed build returns no graph at all.
#[derive(Clone, Debug, Default)]
pub struct GraphBuilder {
    config: BuildConfig,
}

impl GraphBuilder {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Run the build.
    pub fn build(&self, heights: &HeightField, slopes: &SlopeField) -> Result<GridGraph, BuildError> {
        validate(heights, slopes, &self.config)?;

        let res = self.config.resolution.factor();
        let columns = self.config.resolution.graph_cells(heights.columns);
        let rows = self.config.resolution.graph_cells(heights.rows);
        let bounds = Range::with_size(columns as i32, rows as i32);
        let cell_size = Vec3::new(
            heights.scale.x * res as f32,
            heights.scale.y,
            heights.scale.z * res as f32,
        );

        // Pass 1: classification.
        let slope_threshold = self.config.slope_cosine();
        let mut attributes = Vec::with_capacity(bounds.len());
        let mut world_heights = Vec::with_capacity(bounds.len());
        for pos in bounds.iter() {
            let sc = pos.x as usize * res;
            let sr = pos.y as usize * res;
            let height = heights.world_height(sc, sr);
            world_heights.push(height);

            let attrs = if bounds.on_edge(pos) {
                NodeAttributes::BOUNDARY
            } else if height < self.config.water_height {
                NodeAttributes::WATER
            } else if slopes.sample(normalised(sc, heights.columns), normalised(sr, heights.rows))
                >= slope_threshold
            {
                NodeAttributes::WALKABLE
            } else {
                NodeAttributes::NONE
            };
            attributes.push(attrs);
        }

        // Pass 2: connectivity.
        let neighbours = link_neighbours(&attributes, bounds);

        // Pass 3 (areas) runs inside `from_parts`.
        let graph = GridGraph::from_parts(
            columns,
            rows,
            cell_size,
            self.config.resolution,
            &attributes,
            &neighbours,
            &world_heights,
        )?;

        log_summary(&graph);
        Ok(graph)
    }
}

/// Build a graph with the given configuration.
pub fn build_graph(
    heights: &HeightField,
    slopes: &SlopeField,
    config: &BuildConfig,
) -> Result<GridGraph, BuildError> {
    GraphBuilder::new(config.clone()).build(heights, slopes)
}

fn validate(heights: &HeightField, slopes: &SlopeField, config: &BuildConfig) -> Result<(), BuildError> {
    if heights.columns == 0 || heights.rows == 0 {
        return Err(BuildError::EmptyField { field: "height" });
    }
    let expected = heights.columns * heights.rows;
    if heights.heights.len() != expected {
        return Err(BuildError::DimensionMismatch {
            field: "height",
            expected,
            actual: heights.heights.len(),
        });
    }
    if slopes.columns == 0 || slopes.rows == 0 {
        return Err(BuildError::EmptyField { field: "slope" });
    }
    let expected = slopes.columns * slopes.rows;
    if slopes.values.len() != expected {
        return Err(BuildError::DimensionMismatch {
            field: "slope",
            expected,
            actual: slopes.values.len(),
        });
    }
    if !valid_cell_size(heights.scale) {
        return Err(BuildError::InvalidCellSize(heights.scale));
    }
    let limit = config.slope_limit_degrees;
    if !(limit > 0.0 && limit <= 90.0) {
        return Err(BuildError::InvalidSlopeLimit(limit));
    }
    if let Some(i) = heights.heights.iter().position(|h| !h.is_finite()) {
        let p = Point::new((i % heights.columns) as i32, (i / heights.columns) as i32);
        return Err(BuildError::NonFiniteHeight(p));
    }
    Ok(())
}

/// Normalised coordinate of source sample `i` along an axis of `len`.
#[inline]
fn normalised(i: usize, len: usize) -> f32 {
    if len < 2 { 0.0 } else { i as f32 / (len - 1) as f32 }
}

/// Dominant class of a set of flags, or `None` when the cell never links.
#[inline]
fn link_class(attrs: NodeAttributes) -> Option<NodeAttributes> {
    if attrs.contains(NodeAttributes::BOUNDARY) {
        None
    } else if attrs.contains(NodeAttributes::WATER) {
        Some(NodeAttributes::WATER)
    } else if attrs.contains(NodeAttributes::WALKABLE) {
        Some(NodeAttributes::WALKABLE)
    } else {
        None
    }
}

/// Compute every node's neighbour mask. Each node sets only its own bits;
/// the reverse bit is set when its neighbour takes its own turn.
fn link_neighbours(attributes: &[NodeAttributes], bounds: Range) -> Vec<DirectionMask> {
    let columns = bounds.width() as usize;
    let mut masks = vec![DirectionMask::NONE; attributes.len()];

    for (i, pos) in bounds.iter().enumerate() {
        let Some(class) = link_class(attributes[i]) else {
            continue;
        };
        for dir in Direction::ALL {
            let np = pos + dir.offset();
            if !bounds.contains(np) {
                continue;
            }
            let ni = np.x as usize + np.y as usize * columns;
            if link_class(attributes[ni]) == Some(class) {
                masks[i].insert(dir);
            }
        }
    }

    masks
}

fn log_summary(graph: &GridGraph) {
    let mut walkable = 0usize;
    let mut water = 0usize;
    let mut boundary = 0usize;
    for n in graph.nodes() {
        if n.is_boundary() {
            boundary += 1;
        } else if n.is_water() {
            water += 1;
        } else if n.is_walkable() {
            walkable += 1;
        }
    }
    log::debug!(
        "built {}x{} graph at {}: {} walkable, {} water, {} boundary, {} unclassified, {} areas",
        graph.columns(),
        graph.rows(),
        graph.resolution(),
        walkable,
        water,
        boundary,
        graph.len() - walkable - water - boundary,
        graph.area_count()
    );
    if walkable == 0 {
        log::warn!(
            "graph of {}x{} nodes has no walkable node",
            graph.columns(),
            graph.rows()
        );
    }
}

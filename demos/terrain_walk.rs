//! Builds a navigation grid over generated hills, answers random path
//! queries in blocking and background mode, then walks an agent along one
//! of the paths.
//!
//! Run: cargo run --bin terrain-walk -- demos/terrain.toml
//! Set RUST_LOG=debug for per-query output.

use std::time::Instant;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use terranav_core::horizontal_distance;
use terranav_demos::{DemoConfig, DemoError, generate_terrain};
use terranav_graph::{
    GraphBuilder, GraphDecoder, GraphEncoder, GridGraph, SlopeField, TraversalClass,
};
use terranav_paths::{NavStatus, Navigator, PathResult, PathfindingService, WorldDistance};

const GRAPH_ID: &str = "hills";
const STEP: f32 = 1.0 / 30.0;
const MAX_STEPS: usize = 100_000;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), DemoError> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("loading config from {path}");
            DemoConfig::load(&path)?
        }
        None => {
            log::info!("no config file given, using defaults");
            DemoConfig::default()
        }
    };

    let heights = generate_terrain(&config.terrain);
    let slopes = SlopeField::from_height_field(&heights);
    let started = Instant::now();
    let graph = GraphBuilder::new(config.build.clone()).build(&heights, &slopes)?;
    log::info!(
        "built {}x{} graph ({}) with {} areas in {:.1?}",
        graph.columns(),
        graph.rows(),
        graph.resolution(),
        graph.area_count(),
        started.elapsed()
    );

    let mut encoder = GraphEncoder::new(Vec::new());
    encoder.encode(&graph)?;
    let bytes = encoder.into_inner();
    let graph = GraphDecoder::new(bytes.as_slice()).decode()?;
    log::info!("graph reloaded from {} encoded bytes", bytes.len());

    let mut service = PathfindingService::new(&config.service)?;
    service.register_graph(GRAPH_ID, graph.clone());

    let queries = random_queries(&graph, config.queries, config.terrain.seed);
    if queries.is_empty() {
        log::warn!("no walkable ground to query; try a lower water_height or a steeper slope limit");
        return Ok(());
    }

    let started = Instant::now();
    let blocking: Vec<_> = queries
        .iter()
        .map(|&(a, b)| service.find_path(GRAPH_ID, a, b, &WorldDistance))
        .collect();
    summarise("blocking", &blocking, started);

    let started = Instant::now();
    let pending: Vec<_> = queries
        .iter()
        .map(|&(a, b)| service.request_path(GRAPH_ID, a, b, WorldDistance))
        .collect();
    let background: Vec<_> = pending.into_iter().map(|p| p.wait()).collect();
    summarise("background", &background, started);

    let mismatches = blocking
        .iter()
        .zip(&background)
        .filter(|(a, b)| a != b)
        .count();
    if mismatches > 0 {
        log::warn!("{mismatches} background results differ from blocking ones");
    }

    let Some((from, to)) = queries
        .iter()
        .zip(&blocking)
        .filter(|(_, r)| matches!(r, Ok(p) if p.nodes.len() > 2))
        .map(|(q, _)| *q)
        .next()
    else {
        log::info!("no query found a multi-node path, skipping the walk");
        return Ok(());
    };
    walk(&service, &config, from, to);
    Ok(())
}

/// Pairs of walkable node positions, seeded.
fn random_queries(graph: &GridGraph, count: usize, seed: u64) -> Vec<(Vec3, Vec3)> {
    let walkable: Vec<Vec3> = graph
        .nodes()
        .iter()
        .filter(|n| n.traversal_class() == Some(TraversalClass::Walkable))
        .map(|n| n.world)
        .collect();
    if walkable.is_empty() {
        return Vec::new();
    }
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            (
                walkable[rng.random_range(0..walkable.len())],
                walkable[rng.random_range(0..walkable.len())],
            )
        })
        .collect()
}

fn summarise(mode: &str, results: &[PathResult], started: Instant) {
    let found = results.iter().filter(|r| r.is_ok()).count();
    let iterations: usize = results
        .iter()
        .map(|r| match r {
            Ok(p) => p.iterations,
            Err(e) => e.iterations(),
        })
        .sum();
    log::info!(
        "{mode}: {found}/{} paths found, {iterations} iterations, {:.1?}",
        results.len(),
        started.elapsed()
    );
}

fn walk(service: &PathfindingService, config: &DemoConfig, from: Vec3, to: Vec3) {
    let mut nav = Navigator::new(config.navigator.clone(), from);
    let mut travelled = 0.0;
    for step in 0..MAX_STEPS {
        let before = nav.position();
        let status = nav.update(service, GRAPH_ID, to, STEP);
        travelled += before.distance(nav.position());
        match status {
            NavStatus::Arrived => {
                log::info!(
                    "agent arrived after {step} steps, {travelled:.1} units travelled, {:.2} from goal",
                    horizontal_distance(nav.position(), to)
                );
                return;
            }
            NavStatus::Idle => {
                log::warn!("agent has no path after {step} steps");
                return;
            }
            NavStatus::Waiting => {}
            NavStatus::Moving { target } => {
                if step % 60 == 0 {
                    log::debug!(
                        "step {step}: at {:?}, heading for {:?} (node {} of {})",
                        nav.position(),
                        target,
                        nav.target_index(),
                        nav.path().len()
                    );
                }
            }
        }
    }
    log::warn!("agent did not arrive within {MAX_STEPS} steps");
}

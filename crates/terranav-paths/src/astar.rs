use glam::Vec3;
use terranav_core::Context;
use terranav_graph::{GridGraph, GridNode};

use crate::cost::PathCost;
use crate::error::{NoPathReason, Path, PathError, PathResult};
use crate::search::{NodeStatus, SearchContext};

/// Compute the cheapest path between the nodes under `start` and `goal`.
///
/// Both positions are projected onto the grid with
/// [`GridGraph::node_at_world`]. Endpoints in different areas, or outside
/// any area, fail immediately with zero iterations.
pub fn find_path<C: PathCost + ?Sized>(
    graph: &GridGraph,
    start: Vec3,
    goal: Vec3,
    cost: &C,
) -> PathResult {
    search(graph, start, goal, cost, None)
}

/// Like [`find_path`], but gives up with [`PathError::Cancelled`] as soon as
/// `ctx` is cancelled. The token is checked once per iteration.
pub fn find_path_cancellable<C: PathCost + ?Sized>(
    graph: &GridGraph,
    start: Vec3,
    goal: Vec3,
    cost: &C,
    ctx: &Context,
) -> PathResult {
    search(graph, start, goal, cost, Some(ctx))
}

fn search<C: PathCost + ?Sized>(
    graph: &GridGraph,
    start: Vec3,
    goal: Vec3,
    cost: &C,
    ctx: Option<&Context>,
) -> PathResult {
    let start_node = graph
        .node_at_world(start)
        .ok_or(PathError::NoNodeAtPosition(start))?;
    let goal_node = graph
        .node_at_world(goal)
        .ok_or(PathError::NoNodeAtPosition(goal))?;

    if start_node.area == 0 || start_node.area != goal_node.area {
        log::debug!(
            "no path {} -> {}: areas {} and {}",
            start_node.pos,
            goal_node.pos,
            start_node.area,
            goal_node.area
        );
        return Err(PathError::NoPathExists {
            reason: NoPathReason::Unreachable,
            iterations: 0,
        });
    }

    let mut sc = SearchContext::new(graph.len());
    let result = run(graph, start_node, goal_node, cost, ctx, &mut sc);
    match &result {
        Ok(path) => log::debug!(
            "path {} -> {}: {} nodes, {} iterations",
            start_node.pos,
            goal_node.pos,
            path.nodes.len(),
            path.iterations
        ),
        Err(e) => log::debug!("no path {} -> {}: {e}", start_node.pos, goal_node.pos),
    }
    result
}

fn run<C: PathCost + ?Sized>(
    graph: &GridGraph,
    start: &GridNode,
    goal: &GridNode,
    cost: &C,
    ctx: Option<&Context>,
    sc: &mut SearchContext,
) -> PathResult {
    sc.open(start.id, 0.0, cost.cost(start, goal), usize::MAX);

    loop {
        if ctx.is_some_and(Context::is_done) {
            return Err(PathError::Cancelled);
        }
        let Some(ci) = sc.pop_best() else {
            return Err(PathError::NoPathExists {
                reason: NoPathReason::Exhausted,
                iterations: sc.iterations,
            });
        };
        let Some(current) = graph.node(ci) else {
            continue;
        };

        if ci == goal.id {
            let nodes = sc
                .trace(ci)
                .into_iter()
                .filter_map(|id| graph.node(id).copied())
                .collect();
            return Ok(Path {
                nodes,
                iterations: sc.iterations,
            });
        }

        let current_g = sc.g[ci];
        for (_, next) in graph.neighbours(current) {
            let ni = next.id;
            let tentative_g = current_g + cost.cost(current, next);
            match sc.status[ni] {
                NodeStatus::Closed => {}
                NodeStatus::Open => {
                    if tentative_g < sc.g[ni] {
                        sc.g[ni] = tentative_g;
                        sc.parent[ni] = ci;
                    }
                }
                NodeStatus::Unvisited => {
                    sc.open(ni, tentative_g, cost.cost(next, goal), ci);
                }
            }
        }
    }
}

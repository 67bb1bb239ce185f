//! Moving an agent along a path.

use glam::Vec3;
use terranav_core::horizontal_distance;
use terranav_graph::GridNode;

use crate::cost::WorldDistance;
use crate::error::PathResult;
use crate::pool::PendingPath;
use crate::service::PathfindingService;

/// Tuning for a [`Navigator`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavigatorConfig {
    /// How far the destination must move before a new path is requested.
    pub destination_moved_threshold: f32,
    /// Horizontal distance at which a path node counts as reached.
    pub node_reached_threshold: f32,
    /// World units per second.
    pub move_speed: f32,
    /// Height of the agent above the nodes it walks over.
    pub height_offset: f32,
    /// How many nodes ahead to look for a straight-line shortcut.
    pub look_ahead: usize,
    /// Search on the worker pool instead of the calling thread.
    pub asynchronous: bool,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            destination_moved_threshold: 1.0,
            node_reached_threshold: 0.25,
            move_speed: 10.0,
            height_offset: 1.0,
            look_ahead: 5,
            asynchronous: false,
        }
    }
}

/// What a [`Navigator`] did during an update.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum NavStatus {
    /// No path to follow.
    Idle,
    /// A background search is still running and there is no path yet.
    Waiting,
    /// Moving towards `target`.
    Moving { target: Vec3 },
    /// The last node of the path was reached during this update.
    Arrived,
}

/// Follows paths towards a destination, re-planning when it moves.
#[derive(Debug)]
pub struct Navigator {
    config: NavigatorConfig,
    position: Vec3,
    path: Vec<GridNode>,
    index: usize,
    last_destination: Option<Vec3>,
    pending: Option<PendingPath>,
}

impl Navigator {
    pub fn new(config: NavigatorConfig, position: Vec3) -> Self {
        Self {
            config,
            position,
            path: Vec::new(),
            index: 0,
            last_destination: None,
            pending: None,
        }
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Move the agent without touching its path.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// The path being followed; empty when idle.
    pub fn path(&self) -> &[GridNode] {
        &self.path
    }

    /// Index into [`path`](Self::path) of the node being approached.
    pub fn target_index(&self) -> usize {
        self.index
    }

    pub fn is_waiting(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the path and any request in flight. The next update plans
    /// again.
    pub fn clear(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
        self.path.clear();
        self.index = 0;
        self.last_destination = None;
    }

    /// Advance the agent by `dt` seconds towards `destination` on graph
    /// `graph_id`.
    pub fn update(
        &mut self,
        service: &PathfindingService,
        graph_id: &str,
        destination: Vec3,
        dt: f32,
    ) -> NavStatus {
        let moved = self.last_destination.is_none_or(|last| {
            last.distance(destination) >= self.config.destination_moved_threshold
        });
        if moved && self.pending.is_none() {
            self.last_destination = Some(destination);
            if self.config.asynchronous {
                self.pending = Some(service.request_path(
                    graph_id,
                    self.position,
                    destination,
                    WorldDistance,
                ));
            } else {
                let result = service.find_path(graph_id, self.position, destination, &WorldDistance);
                self.accept(result);
            }
        }

        if let Some(pending) = self.pending.as_mut() {
            if let Some(result) = pending.try_take() {
                self.pending = None;
                self.accept(result);
            }
        }

        if self.path.is_empty() {
            return if self.pending.is_some() {
                NavStatus::Waiting
            } else {
                NavStatus::Idle
            };
        }
        self.follow(service, graph_id, dt)
    }

    fn accept(&mut self, result: PathResult) {
        match result {
            Ok(path) if !path.nodes.is_empty() => {
                log::debug!(
                    "navigator got a {}-node path after {} iterations",
                    path.nodes.len(),
                    path.iterations
                );
                self.path = path.nodes;
                self.index = self.nearest_index();
            }
            Ok(_) => self.path.clear(),
            Err(e) => {
                log::debug!("navigator has no path: {e}");
                self.path.clear();
            }
        }
    }

    /// Index of the path node horizontally closest to the agent. A path
    /// that arrives while the agent was still moving starts from there
    /// instead of from its first node.
    fn nearest_index(&self) -> usize {
        let mut best = (0, f32::MAX);
        for (i, node) in self.path.iter().enumerate() {
            let d = horizontal_distance(self.position, node.world);
            if d < best.1 {
                best = (i, d);
            }
        }
        best.0
    }

    fn follow(&mut self, service: &PathfindingService, graph_id: &str, dt: f32) -> NavStatus {
        let node = self.path[self.index];
        let target = self.lifted(&node);
        self.position = move_towards(self.position, target, self.config.move_speed * dt);

        if horizontal_distance(self.position, node.world) <= self.config.node_reached_threshold {
            self.index += 1;
            if self.index >= self.path.len() {
                self.path.clear();
                self.index = 0;
                return NavStatus::Arrived;
            }
            self.shortcut(service, graph_id);
        }

        NavStatus::Moving {
            target: self.lifted(&self.path[self.index]),
        }
    }

    /// Skip to the furthest node within look-ahead that can be reached in
    /// a straight line from the node just passed.
    fn shortcut(&mut self, service: &PathfindingService, graph_id: &str) {
        let passed = self.path[self.index - 1];
        let last = (self.index + self.config.look_ahead).min(self.path.len() - 1);
        for candidate in (self.index + 1..=last).rev() {
            if service
                .can_walk_between(graph_id, &passed, &self.path[candidate])
                .unwrap_or(false)
            {
                log::trace!("shortcut {} -> {}", self.index, candidate);
                self.index = candidate;
                return;
            }
        }
    }

    fn lifted(&self, node: &GridNode) -> Vec3 {
        node.world + Vec3::Y * self.config.height_offset
    }
}

/// Step from `from` towards `to` by at most `max_step`.
fn move_towards(from: Vec3, to: Vec3, max_step: f32) -> Vec3 {
    let delta = to - from;
    let dist = delta.length();
    if dist <= max_step || dist <= f32::EPSILON {
        to
    } else {
        from + delta / dist * max_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::ServiceConfig;
    use crate::test_support::{basin_5x5, flat_graph, world};
    use std::time::Duration;
    use terranav_core::Point;

    fn service() -> PathfindingService {
        let mut svc = PathfindingService::new(&ServiceConfig { workers: 2 }).unwrap();
        svc.register_graph("flat", flat_graph(12, 12));
        svc.register_graph("basin", basin_5x5());
        svc
    }

    fn run_until_arrived(nav: &mut Navigator, svc: &PathfindingService, graph: &str, dest: Vec3) -> usize {
        for step in 0..2000 {
            match nav.update(svc, graph, dest, 0.1) {
                NavStatus::Arrived => return step,
                NavStatus::Waiting => std::thread::sleep(Duration::from_millis(1)),
                NavStatus::Moving { .. } => {}
                NavStatus::Idle => panic!("went idle before arriving"),
            }
        }
        panic!("never arrived");
    }

    #[test]
    fn move_towards_never_overshoots() {
        let p = move_towards(Vec3::ZERO, Vec3::new(3.0, 0.0, 4.0), 1.0);
        assert!((p.length() - 1.0).abs() < 1e-6);
        assert_eq!(move_towards(Vec3::ZERO, Vec3::X, 5.0), Vec3::X);
        assert_eq!(move_towards(Vec3::ONE, Vec3::ONE, 0.0), Vec3::ONE);
    }

    #[test]
    fn arrives_then_goes_idle() {
        let svc = service();
        let g = svc.graph("flat").unwrap();
        let dest = world(&g, 10, 10);
        let mut nav = Navigator::new(NavigatorConfig::default(), world(&g, 1, 1));

        run_until_arrived(&mut nav, &svc, "flat", dest);
        assert!(horizontal_distance(nav.position(), dest) <= 0.25);
        assert!((nav.position().y - (dest.y + 1.0)).abs() < 1e-4);
        assert!(nav.path().is_empty());
        assert_eq!(nav.update(&svc, "flat", dest, 0.1), NavStatus::Idle);
    }

    #[test]
    fn shortcuts_on_open_ground() {
        let svc = service();
        let g = svc.graph("flat").unwrap();
        let mut nav = Navigator::new(NavigatorConfig::default(), world(&g, 1, 1));
        let status = nav.update(&svc, "flat", world(&g, 10, 10), 0.1);
        // The start node is reached at once; the next five are in line of sight.
        assert_eq!(nav.path().len(), 10);
        assert_eq!(nav.target_index(), 6);
        assert_eq!(
            status,
            NavStatus::Moving {
                target: world(&g, 7, 7) + Vec3::Y
            }
        );
    }

    #[test]
    fn no_shortcut_across_water() {
        let svc = service();
        let g = svc.graph("basin").unwrap();
        let mut nav = Navigator::new(NavigatorConfig::default(), world(&g, 1, 1));
        nav.update(&svc, "basin", world(&g, 3, 3), 0.1);
        let path = nav.path().to_vec();
        assert!(path.len() >= 3);
        // Whatever was skipped, the straight line from the start avoids the water.
        let idx = nav.target_index();
        assert!(terranav_graph::can_walk_between(&g, &path[0], &path[idx]));
        assert_ne!(path[idx].pos, Point::new(3, 3));
    }

    #[test]
    fn unreachable_destination_is_idle() {
        let svc = service();
        let g = svc.graph("basin").unwrap();
        let mut nav = Navigator::new(NavigatorConfig::default(), world(&g, 1, 1));
        assert_eq!(nav.update(&svc, "basin", world(&g, 2, 2), 0.1), NavStatus::Idle);
        assert!(nav.path().is_empty());
        assert_eq!(nav.position(), world(&g, 1, 1));
    }

    #[test]
    fn replans_when_destination_moves() {
        let svc = service();
        let g = svc.graph("flat").unwrap();
        let mut nav = Navigator::new(NavigatorConfig::default(), world(&g, 1, 1));
        nav.update(&svc, "flat", world(&g, 10, 1), 0.1);
        assert_eq!(nav.path().last().unwrap().pos, Point::new(10, 1));

        // A small nudge keeps the current path.
        let nudged = world(&g, 10, 1) + Vec3::new(0.5, 0.0, 0.0);
        nav.update(&svc, "flat", nudged, 0.1);
        assert_eq!(nav.path().last().unwrap().pos, Point::new(10, 1));

        nav.update(&svc, "flat", world(&g, 1, 10), 0.1);
        assert_eq!(nav.path().last().unwrap().pos, Point::new(1, 10));
    }

    #[test]
    fn asynchronous_mode_arrives() {
        let svc = service();
        let g = svc.graph("flat").unwrap();
        let config = NavigatorConfig {
            asynchronous: true,
            ..Default::default()
        };
        let dest = world(&g, 9, 4);
        let mut nav = Navigator::new(config, world(&g, 2, 8));
        run_until_arrived(&mut nav, &svc, "flat", dest);
        assert!(horizontal_distance(nav.position(), dest) <= 0.25);
        assert!(!nav.is_waiting());
    }

    #[test]
    fn late_path_starts_from_nearest_node() {
        let svc = service();
        let g = svc.graph("flat").unwrap();
        let path = svc
            .find_path("flat", world(&g, 1, 1), world(&g, 10, 10), &WorldDistance)
            .unwrap();
        // The agent moved on while the search was running.
        let here = world(&g, 5, 5) + Vec3::new(0.1, 0.0, 0.0);
        let mut nav = Navigator::new(NavigatorConfig::default(), here);
        nav.accept(Ok(path));
        assert_eq!(nav.path().len(), 10);
        assert_eq!(nav.target_index(), 4);
        assert_eq!(nav.path()[nav.target_index()].pos, Point::new(5, 5));
    }

    #[test]
    fn unknown_graph_is_idle() {
        let svc = service();
        let mut nav = Navigator::new(NavigatorConfig::default(), Vec3::ZERO);
        assert_eq!(nav.update(&svc, "missing", Vec3::ONE, 0.1), NavStatus::Idle);
    }

    #[test]
    fn clear_forces_a_new_plan() {
        let svc = service();
        let g = svc.graph("flat").unwrap();
        let dest = world(&g, 8, 8);
        let mut nav = Navigator::new(NavigatorConfig::default(), world(&g, 1, 1));
        nav.update(&svc, "flat", dest, 0.1);
        nav.clear();
        assert!(nav.path().is_empty());
        assert!(matches!(nav.update(&svc, "flat", dest, 0.1), NavStatus::Moving { .. }));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg: NavigatorConfig = serde_json::from_str(r#"{"look_ahead": 8}"#).unwrap();
        assert_eq!(cfg.look_ahead, 8);
        assert_eq!(cfg.move_speed, NavigatorConfig::default().move_speed);
        assert!(!cfg.asynchronous);
    }
}

//! Built graphs keyed by a caller-chosen id.

use std::collections::HashMap;
use std::sync::Arc;

use crate::graph::GridGraph;

/// A set of shared, immutable graphs addressed by string id.
///
/// Graphs are stored behind `Arc` so searches on other threads can hold a
/// graph while the registry changes.
#[derive(Clone, Debug, Default)]
pub struct GraphRegistry {
    graphs: HashMap<String, Arc<GridGraph>>,
}

impl GraphRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `graph` under `id`, returning the graph it replaced.
    pub fn insert(&mut self, id: impl Into<String>, graph: GridGraph) -> Option<Arc<GridGraph>> {
        self.insert_shared(id, Arc::new(graph))
    }

    /// Like [`insert`](Self::insert) for a graph that is already shared.
    pub fn insert_shared(
        &mut self,
        id: impl Into<String>,
        graph: Arc<GridGraph>,
    ) -> Option<Arc<GridGraph>> {
        let id = id.into();
        log::debug!("registering graph {id:?} ({} nodes)", graph.len());
        self.graphs.insert(id, graph)
    }

    pub fn get(&self, id: &str) -> Option<Arc<GridGraph>> {
        self.graphs.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.graphs.contains_key(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<Arc<GridGraph>> {
        self.graphs.remove(id)
    }

    /// Registered ids in sorted order.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.graphs.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }
}

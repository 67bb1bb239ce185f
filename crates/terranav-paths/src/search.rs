//! Per-search scratch state.

/// Search state of one node.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum NodeStatus {
    #[default]
    Unvisited,
    Open,
    Closed,
}

/// Scratch arrays for a single A* search.
///
/// Every array is indexed by node id. A context is owned by exactly one
/// search, so concurrent searches never share state.
#[derive(Clone, Debug)]
pub struct SearchContext {
    pub(crate) status: Vec<NodeStatus>,
    pub(crate) g: Vec<f32>,
    pub(crate) h: Vec<f32>,
    pub(crate) parent: Vec<usize>,
    /// Open node ids in insertion order.
    pub(crate) open: Vec<usize>,
    pub(crate) iterations: usize,
}

impl SearchContext {
    /// Fresh state for a graph of `len` nodes.
    pub fn new(len: usize) -> Self {
        Self {
            status: vec![NodeStatus::Unvisited; len],
            g: vec![f32::MAX; len],
            h: vec![f32::MAX; len],
            parent: vec![usize::MAX; len],
            open: Vec::new(),
            iterations: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.status.len()
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_empty()
    }

    /// Nodes selected from the open list so far.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn status(&self, id: usize) -> NodeStatus {
        self.status.get(id).copied().unwrap_or_default()
    }

    /// Cost from the start to `id`, `f32::MAX` if never reached.
    pub fn g(&self, id: usize) -> f32 {
        self.g.get(id).copied().unwrap_or(f32::MAX)
    }

    /// Add `id` to the open list.
    pub(crate) fn open(&mut self, id: usize, g: f32, h: f32, parent: usize) {
        self.status[id] = NodeStatus::Open;
        self.g[id] = g;
        self.h[id] = h;
        self.parent[id] = parent;
        self.open.push(id);
    }

    /// Remove and close the open node with the lowest `g + h`; ties go to
    /// the node opened first.
    pub(crate) fn pop_best(&mut self) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (slot, &id) in self.open.iter().enumerate() {
            let f = self.g[id] + self.h[id];
            match best {
                Some((_, best_f)) if f >= best_f => {}
                _ => best = Some((slot, f)),
            }
        }
        let (slot, _) = best?;
        let id = self.open.remove(slot);
        self.status[id] = NodeStatus::Closed;
        self.iterations += 1;
        Some(id)
    }

    /// Node ids from the start to `goal`, following parent links.
    pub(crate) fn trace(&self, goal: usize) -> Vec<usize> {
        let mut ids = Vec::new();
        let mut cur = goal;
        while cur != usize::MAX {
            ids.push(cur);
            cur = self.parent[cur];
        }
        ids.reverse();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unvisited() {
        let ctx = SearchContext::new(4);
        assert_eq!(ctx.len(), 4);
        assert_eq!(ctx.status(2), NodeStatus::Unvisited);
        assert_eq!(ctx.g(2), f32::MAX);
        assert_eq!(ctx.iterations(), 0);
        assert_eq!(ctx.status(99), NodeStatus::Unvisited);
    }

    #[test]
    fn pop_best_prefers_lowest_f_then_insertion_order() {
        let mut ctx = SearchContext::new(5);
        ctx.open(3, 1.0, 2.0, usize::MAX);
        ctx.open(1, 2.0, 1.0, 3);
        ctx.open(4, 0.5, 0.5, 3);
        assert_eq!(ctx.pop_best(), Some(4));
        assert_eq!(ctx.pop_best(), Some(3));
        assert_eq!(ctx.pop_best(), Some(1));
        assert_eq!(ctx.pop_best(), None);
        assert_eq!(ctx.iterations(), 3);
        assert_eq!(ctx.status(1), NodeStatus::Closed);
    }

    #[test]
    fn trace_follows_parents() {
        let mut ctx = SearchContext::new(4);
        ctx.open(0, 0.0, 0.0, usize::MAX);
        ctx.open(2, 1.0, 0.0, 0);
        ctx.open(3, 2.0, 0.0, 2);
        assert_eq!(ctx.trace(3), vec![0, 2, 3]);
        assert_eq!(ctx.trace(0), vec![0]);
    }
}

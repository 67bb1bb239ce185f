//! Connected-area labelling.

use terranav_core::Range;

use crate::node::GridNode;

/// Label every connected group of traversable nodes with an area id.
///
/// Ids start at 1 and are handed out in row-major order of each group's
/// first node, so labelling is deterministic. Two nodes share an id when a
/// chain of neighbour links joins them. Boundary and unclassified nodes
/// keep id 0. Returns the number of ids assigned.
pub(crate) fn label_areas(nodes: &mut [GridNode], bounds: Range) -> u32 {
    let columns = bounds.width() as usize;
    for n in nodes.iter_mut() {
        n.area = 0;
    }

    let mut label: u32 = 0;
    let mut stack: Vec<usize> = Vec::new();

    for start in 0..nodes.len() {
        if nodes[start].area != 0 || nodes[start].traversal_class().is_none() {
            continue;
        }

        label += 1;

        // Iterative DFS from `start`.
        stack.clear();
        stack.push(start);
        nodes[start].area = label;

        while let Some(ci) = stack.pop() {
            let current = nodes[ci];
            for dir in current.neighbours.iter() {
                let np = current.pos + dir.offset();
                if !bounds.contains(np) {
                    continue;
                }
                let ni = np.x as usize + np.y as usize * columns;
                let n = &mut nodes[ni];
                if n.area == 0 && n.traversal_class().is_some() {
                    n.area = label;
                    stack.push(ni);
                }
            }
        }
    }

    label
}

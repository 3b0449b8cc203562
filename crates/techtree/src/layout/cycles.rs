//! Depth-first back-edge search over dependency edges.

use crate::model::Node;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

/// Returns the first cycle found, as ids from the node where it was entered back to itself
/// (e.g. `["b", "c", "b"]`). Nodes are visited in input order; ids that name no node are
/// skipped.
pub fn find_cycle(nodes: &[Node]) -> Option<Vec<String>> {
    let index: FxHashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(ix, n)| (n.id.as_str(), ix))
        .collect();
    let mut marks = vec![Mark::Unvisited; nodes.len()];
    // (node, index of the next dependency to look at); doubles as the current path.
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..nodes.len() {
        if marks[root] != Mark::Unvisited {
            continue;
        }
        marks[root] = Mark::OnStack;
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let (v, next) = *frame;
            let Some(dependency) = nodes[v].dependencies.get(next) else {
                marks[v] = Mark::Done;
                stack.pop();
                continue;
            };
            frame.1 += 1;
            let Some(&w) = index.get(dependency.as_str()) else {
                continue;
            };
            match marks[w] {
                Mark::OnStack => {
                    let start = stack.iter().position(|&(p, _)| p == w).unwrap_or(0);
                    let mut cycle: Vec<String> = stack[start..]
                        .iter()
                        .map(|&(p, _)| nodes[p].id.clone())
                        .collect();
                    cycle.push(nodes[w].id.clone());
                    return Some(cycle);
                }
                Mark::Unvisited => {
                    marks[w] = Mark::OnStack;
                    stack.push((w, 0));
                }
                Mark::Done => {}
            }
        }
    }
    None
}

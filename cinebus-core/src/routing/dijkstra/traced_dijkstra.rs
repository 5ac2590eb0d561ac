use std::collections::BinaryHeap;

use hashbrown::HashMap;
use petgraph::{
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use super::state::State;

/// Dijkstra's algorithm over a directed graph with non-negative edge costs.
///
/// Returns the total cost and the node sequence from `start` to `target`
/// (both included), or `None` when `target` cannot be reached.
pub fn dijkstra_path<N, E, F>(
    graph: &DiGraph<N, E>,
    start: NodeIndex,
    target: NodeIndex,
    edge_cost: F,
) -> Option<(f64, Vec<NodeIndex>)>
where
    F: Fn(&E) -> f64,
{
    let mut distances: HashMap<NodeIndex, f64> = HashMap::new();
    let mut predecessors: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut heap = BinaryHeap::new();

    // Start node has distance 0
    heap.push(State {
        cost: 0.0,
        node: start,
    });
    distances.insert(start, 0.0);

    let mut reached = None;
    while let Some(State { cost, node }) = heap.pop() {
        if node == target {
            reached = Some(cost);
            break;
        }

        // Skip if we've found a better path
        if distances.get(&node).is_some_and(|&best| cost > best) {
            continue;
        }

        for edge in graph.edges(node) {
            let next = edge.target();
            let next_cost = cost + edge_cost(edge.weight());

            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                    predecessors.insert(next, node);
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                        predecessors.insert(next, node);
                    }
                }
            }
        }
    }

    let total = reached?;

    // Follow predecessors backward from target to start
    let mut node_path = vec![target];
    let mut current = target;
    while current != start {
        current = *predecessors.get(&current)?;
        node_path.push(current);
    }
    node_path.reverse();

    Some((total, node_path))
}

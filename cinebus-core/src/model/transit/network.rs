use hashbrown::HashMap;
use petgraph::graph::{DiGraph, NodeIndex};

use super::{BusEdge, LineStop, LineStopKey};

/// Directed graph of line-scoped stops, one chain per line
#[derive(Debug, Clone, Default)]
pub struct BusGraph {
    pub graph: DiGraph<LineStop, BusEdge>,
    index: HashMap<LineStopKey, NodeIndex>,
}

impl BusGraph {
    pub fn from_graph(graph: DiGraph<LineStop, BusEdge>) -> Self {
        let index = graph
            .node_indices()
            .map(|idx| (graph[idx].key(), idx))
            .collect();
        Self { graph, index }
    }

    pub fn node(&self, key: &LineStopKey) -> Option<NodeIndex> {
        self.index.get(key).copied()
    }

    /// Returns the node for `stop`, inserting it on first sight
    pub(crate) fn add_stop(&mut self, stop: &LineStop) -> NodeIndex {
        let key = stop.key();
        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }
        let idx = self.graph.add_node(stop.clone());
        self.index.insert(key, idx);
        idx
    }

    pub fn stop_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn segment_count(&self) -> usize {
        self.graph.edge_count()
    }
}

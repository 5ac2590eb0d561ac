//! Directed road network used to give bus segments their geometry

use geo::Point;
use hashbrown::HashMap;
use log::warn;
use petgraph::graph::{DiGraph, NodeIndex};

use super::raw::RoadNetwork;
use crate::model::geometry::SpatialIndex;
use crate::routing::dijkstra::dijkstra_path;
use crate::{Meters, NodeId};

/// Road network as a length-weighted directed graph
#[derive(Debug, Clone)]
pub struct RoadGraph {
    pub graph: DiGraph<Point<f64>, Meters>,
    rtree: SpatialIndex,
}

impl RoadGraph {
    pub fn from_network(network: &RoadNetwork) -> Self {
        let mut graph = DiGraph::with_capacity(network.nodes.len(), network.edges.len());
        let mut index: HashMap<NodeId, NodeIndex> = HashMap::with_capacity(network.nodes.len());

        for node in &network.nodes {
            index
                .entry(node.id)
                .or_insert_with(|| graph.add_node(node.geometry()));
        }

        for edge in &network.edges {
            match (index.get(&edge.from), index.get(&edge.to)) {
                (Some(&from), Some(&to)) => {
                    graph.update_edge(from, to, edge.length.max(0.0));
                }
                _ => warn!(
                    "Road edge {} -> {} references an unknown node, skipping",
                    edge.from, edge.to
                ),
            }
        }

        let rtree = SpatialIndex::new(graph.node_indices().map(|idx| (idx, graph[idx])));
        Self { graph, rtree }
    }

    /// Nearest road node to `point` and the snap distance in meters
    pub fn nearest_node(&self, point: &Point<f64>) -> Option<(NodeIndex, Meters)> {
        self.rtree.nearest(point)
    }

    /// Shortest path by length, as a node sequence
    pub fn shortest_path(&self, from: NodeIndex, to: NodeIndex) -> Option<Vec<NodeIndex>> {
        dijkstra_path(&self.graph, from, to, |length| *length).map(|(_, path)| path)
    }

    pub fn coordinates(&self, idx: NodeIndex) -> Point<f64> {
        self.graph[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::raw::{RoadEdge, RoadNode};

    #[test]
    fn follows_one_way_streets() {
        let network = RoadNetwork {
            nodes: vec![
                RoadNode { id: 1, x: 2.0, y: 41.0 },
                RoadNode { id: 2, x: 2.001, y: 41.0 },
                RoadNode { id: 3, x: 2.002, y: 41.0 },
            ],
            edges: vec![
                RoadEdge { from: 1, to: 2, length: 84.0, name: None },
                RoadEdge { from: 2, to: 3, length: 84.0, name: None },
                RoadEdge { from: 3, to: 99, length: 1.0, name: None },
            ],
        };
        let road = RoadGraph::from_network(&network);
        assert_eq!(road.graph.edge_count(), 2);

        let (a, _) = road.nearest_node(&Point::new(2.0, 41.0)).unwrap();
        let (c, _) = road.nearest_node(&Point::new(2.002, 41.0)).unwrap();
        assert_eq!(road.shortest_path(a, c).map(|p| p.len()), Some(3));
        assert!(road.shortest_path(c, a).is_none());
    }
}

use geo::Point;
use petgraph::graph::{DiGraph, NodeIndex};

use super::{CityEdge, CityNode};
use crate::Meters;
use crate::model::geometry::SpatialIndex;

/// The fused directed multimodal graph.
///
/// Read-only once built; a rebuild produces a new instance.
#[derive(Debug, Clone)]
pub struct CityGraph {
    pub graph: DiGraph<CityNode, CityEdge>,
    /// Spatial index over intersections only, the entry points of a query
    rtree: SpatialIndex,
}

impl CityGraph {
    pub fn from_graph(graph: DiGraph<CityNode, CityEdge>) -> Self {
        let rtree = SpatialIndex::new(
            graph
                .node_indices()
                .filter(|&idx| graph[idx].is_intersection())
                .map(|idx| (idx, graph[idx].geometry())),
        );
        Self { graph, rtree }
    }

    /// Nearest intersection to `point` and the distance to it in meters
    pub fn nearest_intersection(&self, point: &Point<f64>) -> Option<(NodeIndex, Meters)> {
        self.rtree.nearest(point)
    }

    pub fn node(&self, idx: NodeIndex) -> &CityNode {
        &self.graph[idx]
    }

    /// Cheapest edge from `from` to `to`
    pub fn edge_between(&self, from: NodeIndex, to: NodeIndex) -> Option<&CityEdge> {
        self.graph
            .edges_connecting(from, to)
            .map(|edge| edge.weight())
            .min_by(|a, b| a.time.total_cmp(&b.time))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

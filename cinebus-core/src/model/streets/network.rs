//! Undirected walkable street graph

use geo::Point;
use hashbrown::HashMap;
use petgraph::graph::{NodeIndex, UnGraph};

use super::{Intersection, StreetEdge};
use crate::model::geometry::SpatialIndex;
use crate::{Meters, NodeId};

/// Street network with a spatial index over its intersections
#[derive(Debug, Clone)]
pub struct StreetGraph {
    pub graph: UnGraph<Intersection, StreetEdge>,
    rtree: SpatialIndex,
    index: HashMap<NodeId, NodeIndex>,
}

impl StreetGraph {
    /// Wraps a built graph, (re)creating the spatial and id indices
    pub fn from_graph(graph: UnGraph<Intersection, StreetEdge>) -> Self {
        let rtree = SpatialIndex::new(
            graph
                .node_indices()
                .map(|idx| (idx, graph[idx].geometry())),
        );
        let index = graph
            .node_indices()
            .map(|idx| (graph[idx].id(), idx))
            .collect();
        Self {
            graph,
            rtree,
            index,
        }
    }

    /// Nearest intersection to `point` and the distance to it in meters
    pub fn nearest_node(&self, point: &Point<f64>) -> Option<(NodeIndex, Meters)> {
        self.rtree.nearest(point)
    }

    pub fn node_by_id(&self, id: NodeId) -> Option<NodeIndex> {
        self.index.get(&id).copied()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

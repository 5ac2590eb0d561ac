//! Street Network Builder: raw directed road network -> undirected walkable graph

use geo::LineString;
use hashbrown::HashMap;
use log::{info, warn};
use petgraph::graph::{NodeIndex, UnGraph};

use super::raw::RoadNetwork;
use crate::NodeId;
use crate::model::{CostModel, Intersection, StreetEdge, StreetGraph, StreetSegment};

/// Builds the walkable street graph.
///
/// Every raw edge becomes one street segment; both directions of a road
/// collapse into a single undirected segment (the last one seen wins).
pub fn build_street_graph(network: &RoadNetwork, costs: &CostModel) -> StreetGraph {
    let nodes: HashMap<NodeId, _> = network
        .nodes
        .iter()
        .map(|node| (node.id, node.geometry()))
        .collect();

    let mut graph: UnGraph<Intersection, StreetEdge> = UnGraph::new_undirected();
    let mut index: HashMap<NodeId, NodeIndex> = HashMap::with_capacity(nodes.len());

    for edge in &network.edges {
        let (Some(&from_point), Some(&to_point)) = (nodes.get(&edge.from), nodes.get(&edge.to))
        else {
            warn!(
                "Street {} -> {} references an unknown node, skipping",
                edge.from, edge.to
            );
            continue;
        };

        let from = *index
            .entry(edge.from)
            .or_insert_with(|| graph.add_node(Intersection::new(edge.from, from_point)));
        let to = *index
            .entry(edge.to)
            .or_insert_with(|| graph.add_node(Intersection::new(edge.to, to_point)));

        let geometry = LineString::from(vec![from_point, to_point]);
        let segment = StreetSegment::new(edge.length, geometry, edge.display_name());
        graph.update_edge(
            from,
            to,
            StreetEdge {
                weight: costs.walking_time(edge.length),
                segment,
            },
        );
    }

    info!(
        "Street graph built with {} intersections and {} segments",
        graph.node_count(),
        graph.edge_count()
    );

    StreetGraph::from_graph(graph)
}

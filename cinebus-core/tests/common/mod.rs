#![allow(dead_code)]

use cinebus_core::model::geometry::distance;
use cinebus_core::prelude::*;
use geo::Point;

pub const LAT: f64 = 41.0;

/// About 504 m of longitude at 41 degrees north
pub const STEP: f64 = 0.006;

pub fn node(id: NodeId, x: f64, y: f64) -> RoadNode {
    RoadNode { id, x, y }
}

/// Two-way street whose length is the distance between its nodes
pub fn street(nodes: &[RoadNode], from: NodeId, to: NodeId, name: &str) -> [RoadEdge; 2] {
    let point = |id: NodeId| {
        nodes
            .iter()
            .find(|n| n.id == id)
            .map(RoadNode::geometry)
            .unwrap()
    };
    let length = distance(point(from), point(to));
    let edge = |from, to| RoadEdge {
        from,
        to,
        length,
        name: Some(StreetName::Single(name.into())),
    };
    [edge(from, to), edge(to, from)]
}

pub fn stop(id: NodeId, x: f64, name: &str) -> RawStop {
    RawStop {
        id,
        x,
        y: LAT,
        name: name.into(),
    }
}

/// Four intersections in a row along "Avinguda", ids 1 to 4 from west to east
pub fn avenue() -> RoadNetwork {
    let nodes: Vec<RoadNode> = (0..4)
        .map(|i| node(i + 1, 2.0 + STEP * i as f64, LAT))
        .collect();
    let edges = [(1, 2), (2, 3), (3, 4)]
        .into_iter()
        .flat_map(|(from, to)| street(&nodes, from, to, "Avinguda"))
        .collect();
    RoadNetwork { nodes, edges }
}

/// Line "L1" from the first intersection to the third one
pub fn line_l1() -> BusLine {
    BusLine {
        line: "L1".into(),
        stops: vec![stop(100, 2.0, "Plaça"), stop(101, 2.0 + 2.0 * STEP, "Mercat")],
    }
}

pub fn intersection(network: &RoadNetwork, id: NodeId) -> Point<f64> {
    network
        .nodes
        .iter()
        .find(|n| n.id == id)
        .map(RoadNode::geometry)
        .unwrap()
}

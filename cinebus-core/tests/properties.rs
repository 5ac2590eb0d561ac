mod common;

use cinebus_core::model::geometry::distance;
use cinebus_core::prelude::*;
use geo::Point;
use petgraph::visit::EdgeRef;

use common::{LAT, STEP, avenue, intersection, line_l1, node, stop, street};

/// Avenue plus a parallel street and two lines sharing a stop
fn city_data() -> (RoadNetwork, Vec<BusLine>) {
    let mut network = avenue();
    let north = LAT + 0.004;
    network.nodes.push(node(5, 2.0, north));
    network.nodes.push(node(6, 2.0 + STEP, north));
    let nodes = network.nodes.clone();
    for (from, to, name) in [(5, 6, "Carrer Nord"), (1, 5, "Rambla"), (2, 6, "Passeig")] {
        network.edges.extend(street(&nodes, from, to, name));
    }

    let crosstown = BusLine {
        line: "L2".into(),
        stops: vec![
            stop(101, 2.0 + 2.0 * STEP, "Mercat"),
            stop(102, 2.0 + 3.0 * STEP, "Port"),
            RawStop {
                id: 103,
                x: 2.0 + STEP,
                y: north,
                name: "Nord".into(),
            },
        ],
    };
    (network, vec![line_l1(), crosstown])
}

fn session() -> CitySession {
    let (network, lines) = city_data();
    CitySession::build(&network, &lines, &CostModel::default()).unwrap()
}

#[test]
fn weights_and_lengths_are_non_negative() {
    let session = session();
    for edge in session.streets.graph.edge_weights() {
        assert!(edge.weight >= 0.0 && edge.segment.base.length >= 0.0);
    }
    for edge in session.buses.graph.edge_weights() {
        assert!(edge.weight >= 0.0 && edge.segment.length() >= 0.0);
    }
    for edge in session.city.graph.edge_weights() {
        assert!(edge.time >= 0.0 && edge.length() >= 0.0);
    }
}

#[test]
fn bus_segments_join_consecutive_stops_of_their_line() {
    let (_, lines) = city_data();
    let session = session();
    let graph = &session.buses.graph;
    assert_eq!(graph.edge_count(), 3);

    for edge in graph.edge_references() {
        let origin = &graph[edge.source()];
        let destination = &graph[edge.target()];
        assert_eq!(origin.line, edge.weight().segment.line);
        assert_eq!(destination.line, edge.weight().segment.line);

        let line = lines.iter().find(|l| l.line == origin.line).unwrap();
        let position = |id| line.stops.iter().position(|s| s.id == id).unwrap();
        assert_eq!(position(destination.id()), position(origin.id()) + 1);
    }
}

#[test]
fn shared_stop_is_merged_once() {
    let session = session();
    let merged: Vec<&CityNode> = session
        .city
        .graph
        .node_weights()
        .filter(|n| matches!(n, CityNode::MergedStop(_)))
        .collect();
    // Plaça, Mercat, Port and Nord
    assert_eq!(merged.len(), 4);
    assert_eq!(
        merged.iter().filter(|n| n.name() == Some("Mercat")).count(),
        1
    );
}

#[test]
fn path_distances_are_consistent() {
    let (network, _) = city_data();
    let session = session();
    let queries = [
        (intersection(&network, 1), intersection(&network, 4)),
        (intersection(&network, 4), intersection(&network, 6)),
        (Point::new(2.0003, LAT + 0.001), Point::new(2.0125, LAT + 0.0002)),
    ];

    for (source, destination) in queries {
        let path = session.find_path(source, destination).unwrap();
        assert!(path.walking_distance <= path.distance + 1e-9);
        assert!(path.distance + 1e-6 >= distance(source, destination));
        assert_eq!(path.source, source);
        assert_eq!(path.destination, destination);
    }
}

#[test]
fn building_twice_gives_identical_graphs() {
    let first = session();
    let second = session();

    let nodes = |s: &CitySession| s.city.graph.node_weights().cloned().collect::<Vec<_>>();
    let edges = |s: &CitySession| {
        s.city
            .graph
            .edge_references()
            .map(|e| (e.source(), e.target(), e.weight().clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(nodes(&first), nodes(&second));
    assert_eq!(edges(&first), edges(&second));
    assert_eq!(first.buses.segment_count(), second.buses.segment_count());
}

#[test]
fn disconnected_endpoints_never_yield_a_partial_path() {
    let (mut network, lines) = city_data();
    network.nodes.push(node(7, 2.3, 41.3));
    network.nodes.push(node(8, 2.3012, 41.3));
    let nodes = network.nodes.clone();
    network.edges.extend(street(&nodes, 7, 8, "Camí Aïllat"));
    let session = CitySession::build(&network, &lines, &CostModel::default()).unwrap();

    let result = session.find_path(intersection(&network, 1), intersection(&network, 8));
    assert!(matches!(result, Err(Error::NoPathFound)));
}

#[test]
fn cache_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let costs = CostModel::default();

    let built = cache::load_or_build(
        dir.path(),
        || Ok(city_data().0),
        || Ok(city_data().1),
        &costs,
    )
    .unwrap();
    assert!(dir.path().join(cache::CITY_GRAPH_FILE).exists());

    // A second call must not touch the raw data
    let loaded = cache::load_or_build(
        dir.path(),
        || Err(Error::InvalidData("road network requested".into())),
        || Err(Error::InvalidData("bus lines requested".into())),
        &costs,
    )
    .unwrap();

    assert_eq!(built.city.node_count(), loaded.city.node_count());
    assert_eq!(built.city.edge_count(), loaded.city.edge_count());
    assert!(
        built
            .city
            .graph
            .edge_weights()
            .zip(loaded.city.graph.edge_weights())
            .all(|(a, b)| a == b)
    );

    let (network, _) = city_data();
    let from = intersection(&network, 1);
    let to = intersection(&network, 6);
    assert_eq!(
        built.find_path(from, to).unwrap(),
        loaded.find_path(from, to).unwrap()
    );
}

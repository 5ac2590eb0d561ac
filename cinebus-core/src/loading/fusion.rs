//! City Graph Fuser: street graph + bus graph -> one directed multimodal graph

use geo::{LineString, Point};
use hashbrown::HashMap;
use log::{info, warn};
use petgraph::graph::{DiGraph, NodeIndex};
use rayon::prelude::*;

use crate::model::geometry::SegmentBase;
use crate::model::{
    BusGraph, CityEdge, CityGraph, CityNode, CostModel, EdgeKind, LineStop, MergedStop,
    StreetGraph, StreetSegment, TransferKind, TransferSegment,
};
use crate::{Meters, NodeId};

/// Physical identity of a stop: id, exact location and name
type MergedStopKey = (NodeId, u64, u64, String);

/// Fuses the street and bus graphs.
///
/// Streets are expanded to both directions, bus segments are copied as they
/// are, and every line stop gets board/alight edges to the merged stop of its
/// physical location, which in turn is linked on foot to the nearest intersection.
pub fn fuse_city_graph(streets: &StreetGraph, buses: &BusGraph, costs: &CostModel) -> CityGraph {
    let mut graph: DiGraph<CityNode, CityEdge> = DiGraph::with_capacity(
        streets.node_count() + 2 * buses.stop_count(),
        2 * streets.edge_count() + 5 * buses.stop_count(),
    );

    let intersections = add_streets(&mut graph, streets);
    let line_stops = add_buses(&mut graph, buses);
    let merged = add_stop_transfers(&mut graph, streets, buses, &intersections, &line_stops, costs);

    info!(
        "City graph built with {} nodes and {} edges ({} merged stops)",
        graph.node_count(),
        graph.edge_count(),
        merged
    );

    CityGraph::from_graph(graph)
}

/// Copies intersections and both orientations of every street segment.
///
/// Returns the city node of every street node, by street node index.
fn add_streets(graph: &mut DiGraph<CityNode, CityEdge>, streets: &StreetGraph) -> Vec<NodeIndex> {
    let intersections: Vec<NodeIndex> = streets
        .graph
        .node_weights()
        .map(|node| graph.add_node(CityNode::Intersection(node.clone())))
        .collect();

    for edge in streets.graph.edge_indices() {
        let Some((a, b)) = streets.graph.edge_endpoints(edge) else {
            continue;
        };
        let street = &streets.graph[edge];
        let (from, to) = (intersections[a.index()], intersections[b.index()]);

        let forward = oriented(&street.segment, streets.graph[a].geometry());
        let backward = StreetSegment {
            base: forward.base.reversed(),
            name: forward.name.clone(),
        };

        graph.add_edge(
            from,
            to,
            CityEdge {
                time: street.weight,
                kind: EdgeKind::Street(forward),
            },
        );
        if a != b {
            graph.add_edge(
                to,
                from,
                CityEdge {
                    time: street.weight,
                    kind: EdgeKind::Street(backward),
                },
            );
        }
    }

    intersections
}

/// Segment with its polyline starting at `start`
fn oriented(segment: &StreetSegment, start: Point<f64>) -> StreetSegment {
    let starts_here = segment
        .base
        .geometry
        .0
        .first()
        .is_none_or(|first| *first == start.0);
    if starts_here {
        segment.clone()
    } else {
        StreetSegment {
            base: segment.base.reversed(),
            name: segment.name.clone(),
        }
    }
}

/// Copies line stops and bus segments, returning the city node of every bus node
fn add_buses(graph: &mut DiGraph<CityNode, CityEdge>, buses: &BusGraph) -> Vec<NodeIndex> {
    let line_stops: Vec<NodeIndex> = buses
        .graph
        .node_weights()
        .map(|stop| graph.add_node(CityNode::LineStop(stop.clone())))
        .collect();

    for edge in buses.graph.edge_indices() {
        let Some((a, b)) = buses.graph.edge_endpoints(edge) else {
            continue;
        };
        let bus = &buses.graph[edge];
        graph.add_edge(
            line_stops[a.index()],
            line_stops[b.index()],
            CityEdge {
                time: bus.weight,
                kind: EdgeKind::Bus(bus.segment.clone()),
            },
        );
    }

    line_stops
}

/// Adds merged stops with their access, board and alight edges.
///
/// Returns the number of merged stops created.
fn add_stop_transfers(
    graph: &mut DiGraph<CityNode, CityEdge>,
    streets: &StreetGraph,
    buses: &BusGraph,
    intersections: &[NodeIndex],
    line_stops: &[NodeIndex],
    costs: &CostModel,
) -> usize {
    // Snap all line stops to their nearest intersection
    let snaps: Vec<Option<(NodeIndex, Meters)>> = buses
        .graph
        .raw_nodes()
        .par_iter()
        .map(|node| streets.nearest_node(&node.weight.geometry()))
        .collect();

    let mut merged_stops: HashMap<MergedStopKey, NodeIndex> = HashMap::new();

    for (bus_idx, stop) in buses.graph.node_weights().enumerate() {
        let line_stop = line_stops[bus_idx];
        let key = merged_key(stop);

        let merged = match merged_stops.get(&key) {
            Some(&merged) => merged,
            None => {
                let merged =
                    graph.add_node(CityNode::MergedStop(MergedStop::from_line_stop(stop)));
                merged_stops.insert(key, merged);

                match snaps[bus_idx] {
                    Some((street_idx, dist)) => add_access(
                        graph,
                        intersections[street_idx.index()],
                        merged,
                        dist,
                        &stop.name,
                        costs,
                    ),
                    None => warn!(
                        "Stop {} ({}) has no nearby intersection, \
                        it will not be reachable on foot",
                        stop.id(),
                        stop.name
                    ),
                }
                merged
            }
        };

        graph.add_edge(
            merged,
            line_stop,
            transfer_edge(TransferKind::Board, costs.bus_waiting_time, &stop.name),
        );
        graph.add_edge(
            line_stop,
            merged,
            transfer_edge(TransferKind::Alight, 0.0, &stop.name),
        );
    }

    merged_stops.len()
}

fn merged_key(stop: &LineStop) -> MergedStopKey {
    let point = stop.geometry();
    (
        stop.id(),
        point.x().to_bits(),
        point.y().to_bits(),
        stop.name.clone(),
    )
}

/// Walking link between an intersection and a merged stop, both ways
fn add_access(
    graph: &mut DiGraph<CityNode, CityEdge>,
    intersection: NodeIndex,
    merged: NodeIndex,
    dist: Meters,
    name: &str,
    costs: &CostModel,
) {
    let geometry = LineString::from(vec![
        graph[intersection].geometry(),
        graph[merged].geometry(),
    ]);
    let to_stop = SegmentBase::new(dist, geometry);
    let to_street = to_stop.reversed();
    let time = costs.walking_time(dist);

    for (from, to, base) in [
        (intersection, merged, to_stop),
        (merged, intersection, to_street),
    ] {
        graph.add_edge(
            from,
            to,
            CityEdge {
                time,
                kind: EdgeKind::Transfer(TransferSegment {
                    base,
                    kind: TransferKind::Access,
                    name: name.to_string(),
                }),
            },
        );
    }
}

fn transfer_edge(kind: TransferKind, time: f64, name: &str) -> CityEdge {
    CityEdge {
        time,
        kind: EdgeKind::Transfer(TransferSegment {
            base: SegmentBase::empty(),
            kind,
            name: name.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::raw::{BusLine, RawStop, RoadEdge, RoadNetwork, RoadNode};
    use crate::loading::{build_bus_graph, build_street_graph};

    fn stop(id: u64, x: f64, name: &str) -> RawStop {
        RawStop {
            id,
            x,
            y: 41.0,
            name: name.into(),
        }
    }

    fn fused() -> CityGraph {
        let network = RoadNetwork {
            nodes: vec![
                RoadNode { id: 1, x: 2.0, y: 41.0 },
                RoadNode { id: 2, x: 2.005, y: 41.0 },
                RoadNode { id: 3, x: 2.01, y: 41.0 },
            ],
            edges: vec![
                RoadEdge { from: 1, to: 2, length: 420.0, name: None },
                RoadEdge { from: 2, to: 3, length: 420.0, name: None },
            ],
        };
        // Two lines sharing stop 11
        let lines = vec![
            BusLine {
                line: "H12".into(),
                stops: vec![stop(10, 2.0, "A"), stop(11, 2.005, "B")],
            },
            BusLine {
                line: "V3".into(),
                stops: vec![stop(11, 2.005, "B"), stop(12, 2.01, "C")],
            },
        ];
        let costs = CostModel::default();
        let streets = build_street_graph(&network, &costs);
        let buses = build_bus_graph(&lines, &network, &costs);
        fuse_city_graph(&streets, &buses, &costs)
    }

    fn transfers(city: &CityGraph, kind: TransferKind) -> Vec<&CityEdge> {
        city.graph
            .edge_weights()
            .filter(|edge| edge.transfer_kind() == Some(kind))
            .collect()
    }

    #[test]
    fn node_families() {
        let city = fused();
        let count = |pred: fn(&CityNode) -> bool| {
            city.graph.node_weights().filter(|n| pred(n)).count()
        };
        assert_eq!(count(|n| matches!(n, CityNode::Intersection(_))), 3);
        assert_eq!(count(|n| matches!(n, CityNode::LineStop(_))), 4);
        assert_eq!(count(|n| matches!(n, CityNode::MergedStop(_))), 3);
    }

    #[test]
    fn streets_go_both_ways() {
        let city = fused();
        let streets = city
            .graph
            .edge_weights()
            .filter(|edge| matches!(edge.kind, EdgeKind::Street(_)))
            .count();
        assert_eq!(streets, 4);
    }

    #[test]
    fn transfer_weights() {
        let city = fused();
        let costs = CostModel::default();

        let board = transfers(&city, TransferKind::Board);
        assert_eq!(board.len(), 4);
        assert!(board.iter().all(|edge| edge.time == costs.bus_waiting_time));

        let alight = transfers(&city, TransferKind::Alight);
        assert_eq!(alight.len(), 4);
        assert!(alight.iter().all(|edge| edge.time == 0.0));

        // Both directions for each merged stop
        let access = transfers(&city, TransferKind::Access);
        assert_eq!(access.len(), 6);
        assert!(access.iter().all(|edge| edge.is_walking()));
    }

    #[test]
    fn board_leads_to_a_line_stop() {
        let city = fused();
        for edge in city.graph.edge_indices() {
            if city.graph[edge].transfer_kind() != Some(TransferKind::Board) {
                continue;
            }
            let (from, to) = city.graph.edge_endpoints(edge).unwrap();
            assert!(matches!(city.graph[from], CityNode::MergedStop(_)));
            assert!(matches!(city.graph[to], CityNode::LineStop(_)));
        }
    }
}

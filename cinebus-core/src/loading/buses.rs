//! Bus Network Builder: lines of stops -> directed graph of road-snapped bus segments

use geo::{LineString, Point};
use hashbrown::{HashMap, HashSet};
use itertools::Itertools;
use log::{debug, info};
use petgraph::graph::NodeIndex;
use rayon::prelude::*;

use super::raw::{BusLine, RoadNetwork};
use super::road::RoadGraph;
use crate::Meters;
use crate::model::geometry::polyline_length;
use crate::model::{BusEdge, BusGraph, BusSegment, CostModel, LineStop, LineStopKey};

/// Why a candidate bus segment was left out of the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Origin and destination are the same stop
    DegenerateEdge,
    /// A stop lies too far from the road network to be trusted
    LowConfidenceSnap,
}

type RoadPair = (NodeIndex, NodeIndex);

/// Builds the bus graph, snapping every segment to the given road network.
pub fn build_bus_graph(lines: &[BusLine], network: &RoadNetwork, costs: &CostModel) -> BusGraph {
    let road = RoadGraph::from_network(network);
    build_bus_graph_on(lines, &road, costs)
}

/// Same as [`build_bus_graph`] over an already indexed road graph
pub fn build_bus_graph_on(lines: &[BusLine], road: &RoadGraph, costs: &CostModel) -> BusGraph {
    let candidates = candidate_segments(lines);
    info!(
        "Building bus graph from {} lines and {} candidate segments",
        lines.len(),
        candidates.len()
    );

    let snaps = snap_stops_to_roads(road, &candidates);

    let mut skipped: HashMap<SkipReason, usize> = HashMap::new();
    let accepted: Vec<(&LineStop, &LineStop, RoadPair)> = candidates
        .iter()
        .filter_map(|(origin, destination)| {
            match check_candidate(origin, destination, &snaps, costs) {
                Ok(pair) => Some((origin, destination, pair)),
                Err(reason) => {
                    debug!(
                        "Skipping bus segment {} -> {} on line {}: {reason:?}",
                        origin.id(),
                        destination.id(),
                        origin.line
                    );
                    *skipped.entry(reason).or_default() += 1;
                    None
                }
            }
        })
        .collect();

    let road_paths = shortest_road_paths(road, accepted.iter().map(|(_, _, pair)| *pair));

    let mut bus_graph = BusGraph::default();
    for (origin, destination, pair) in accepted {
        let path = road_paths.get(&pair).and_then(Option::as_ref);
        let segment = snapped_segment(road, origin, destination, path);
        let weight = costs.bus_time(segment.length());

        let from = bus_graph.add_stop(origin);
        let to = bus_graph.add_stop(destination);
        bus_graph.graph.update_edge(from, to, BusEdge { weight, segment });
    }

    info!(
        "Bus graph built with {} stops and {} segments ({} degenerate, {} low-confidence skipped)",
        bus_graph.stop_count(),
        bus_graph.segment_count(),
        skipped.get(&SkipReason::DegenerateEdge).copied().unwrap_or(0),
        skipped.get(&SkipReason::LowConfidenceSnap).copied().unwrap_or(0),
    );

    bus_graph
}

/// Consecutive stop pairs of every line, first occurrence of each pair kept
fn candidate_segments(lines: &[BusLine]) -> Vec<(LineStop, LineStop)> {
    let mut seen: HashSet<(LineStopKey, LineStopKey)> = HashSet::new();
    lines
        .iter()
        .flat_map(|line| {
            line.stops
                .iter()
                .map(|stop| {
                    LineStop::new(stop.id, stop.geometry(), stop.name.clone(), line.line.clone())
                })
                .tuple_windows()
        })
        .filter(|(origin, destination)| seen.insert((origin.key(), destination.key())))
        .collect()
}

/// Nearest road node of every distinct stop, computed in parallel
fn snap_stops_to_roads(
    road: &RoadGraph,
    candidates: &[(LineStop, LineStop)],
) -> HashMap<LineStopKey, Option<(NodeIndex, Meters)>> {
    let stops: Vec<&LineStop> = candidates
        .iter()
        .flat_map(|(origin, destination)| [origin, destination])
        .unique_by(|stop| stop.key())
        .collect();

    stops
        .par_iter()
        .map(|stop| (stop.key(), road.nearest_node(&stop.geometry())))
        .collect::<Vec<_>>()
        .into_iter()
        .collect()
}

fn check_candidate(
    origin: &LineStop,
    destination: &LineStop,
    snaps: &HashMap<LineStopKey, Option<(NodeIndex, Meters)>>,
    costs: &CostModel,
) -> Result<RoadPair, SkipReason> {
    if origin.key() == destination.key() {
        return Err(SkipReason::DegenerateEdge);
    }

    let snap = |stop: &LineStop| {
        snaps
            .get(&stop.key())
            .copied()
            .flatten()
            .filter(|(_, dist)| *dist <= costs.max_snap_distance)
    };

    match (snap(origin), snap(destination)) {
        (Some((from, _)), Some((to, _))) => Ok((from, to)),
        _ => Err(SkipReason::LowConfidenceSnap),
    }
}

/// Road shortest paths, computed once per distinct pair of road nodes.
///
/// Results are keyed by pair, so completion order does not matter.
fn shortest_road_paths(
    road: &RoadGraph,
    pairs: impl Iterator<Item = RoadPair>,
) -> HashMap<RoadPair, Option<Vec<NodeIndex>>> {
    let unique: Vec<RoadPair> = pairs.unique().collect();
    debug!("Computing {} road shortest paths", unique.len());

    unique
        .into_par_iter()
        .map(|(from, to)| ((from, to), road.shortest_path(from, to)))
        .collect::<Vec<_>>()
        .into_iter()
        .collect()
}

/// Origin, the road nodes in between, then destination.
///
/// A missing road path degrades to a straight link between the two stops.
fn snapped_segment(
    road: &RoadGraph,
    origin: &LineStop,
    destination: &LineStop,
    path: Option<&Vec<NodeIndex>>,
) -> BusSegment {
    let mut points: Vec<Point<f64>> = Vec::with_capacity(path.map_or(0, Vec::len) + 2);
    points.push(origin.geometry());
    points.extend(path.into_iter().flatten().map(|&idx| road.coordinates(idx)));
    points.push(destination.geometry());

    let geometry = LineString::from(points);
    let length = polyline_length(&geometry);
    BusSegment::new(length, geometry, origin.line.clone())
}

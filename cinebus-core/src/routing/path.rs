use chrono::TimeDelta;
use geo::Point;
use itertools::Itertools;
use petgraph::graph::NodeIndex;

use super::dijkstra::dijkstra_path;
use crate::model::{CityGraph, CostModel};
use crate::{Error, Meters, Seconds};

/// Least-time route between two coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub source: Point<f64>,
    pub destination: Point<f64>,
    /// City graph nodes from the source intersection to the destination one
    pub route: Vec<NodeIndex>,
    /// Total travel time, including the walks to and from the snapped intersections
    pub duration: Seconds,
    pub distance: Meters,
    pub walking_distance: Meters,
}

impl Path {
    pub fn duration(&self) -> TimeDelta {
        seconds_to_delta(self.duration)
    }
}

#[allow(clippy::cast_possible_truncation)]
pub(crate) fn seconds_to_delta(seconds: Seconds) -> TimeDelta {
    TimeDelta::milliseconds((seconds * 1000.0).round() as i64)
}

/// Finds the least-time path from `source` to `destination`.
///
/// Both coordinates are snapped to their nearest intersection; the walk to
/// and from those intersections counts towards every total.
///
/// # Errors
///
/// Returns [`Error::NoPathFound`] if the graph has no intersections or the
/// two intersections are not connected.
pub fn find_path(
    city: &CityGraph,
    source: Point<f64>,
    destination: Point<f64>,
    costs: &CostModel,
) -> Result<Path, Error> {
    let (source_node, dist_start) = city
        .nearest_intersection(&source)
        .ok_or(Error::NoPathFound)?;
    let (target_node, dist_end) = city
        .nearest_intersection(&destination)
        .ok_or(Error::NoPathFound)?;

    let (_, route) = dijkstra_path(&city.graph, source_node, target_node, |edge| edge.time)
        .ok_or(Error::NoPathFound)?;

    let mut distance = dist_start + dist_end;
    let mut walking_distance = distance;
    let mut duration = costs.walking_time(distance);

    for (from, to) in route.iter().copied().tuple_windows() {
        let edge = city.edge_between(from, to).ok_or(Error::NoPathFound)?;
        duration += edge.time;
        distance += edge.length();
        if edge.is_walking() {
            walking_distance += edge.length();
        }
    }

    log::debug!(
        "Found path with {} nodes: {:.0}s, {:.0}m ({:.0}m walking)",
        route.len(),
        duration,
        distance,
        walking_distance
    );

    Ok(Path {
        source,
        destination,
        route,
        duration,
        distance,
        walking_distance,
    })
}

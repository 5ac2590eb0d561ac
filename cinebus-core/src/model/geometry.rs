//! Shared node/edge payloads and geodesic helpers

use geo::{Distance, Haversine, LineString, Point};
use itertools::Itertools;
use petgraph::graph::NodeIndex;
use rstar::{RTree, primitives::GeomWithData};
use serde::{Deserialize, Serialize};

use crate::{Meters, NodeId};

/// Projected point stored in the spatial index, carrying its graph node and
/// its original lon/lat
pub type IndexedPoint = GeomWithData<[f64; 2], (NodeIndex, Point<f64>)>;

/// Fields shared by every node kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeBase {
    /// Id given by the data source
    pub id: NodeId,
    /// x = longitude, y = latitude
    pub geometry: Point<f64>,
}

/// Fields shared by every edge kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentBase {
    /// Length in meters
    pub length: Meters,
    /// Polyline followed by the segment, empty for board/alight edges
    pub geometry: LineString<f64>,
}

impl SegmentBase {
    pub fn new(length: Meters, geometry: LineString<f64>) -> Self {
        Self { length, geometry }
    }

    /// Zero-length segment without geometry
    pub fn empty() -> Self {
        Self {
            length: 0.0,
            geometry: LineString::new(vec![]),
        }
    }

    /// The same segment walked the other way round
    pub fn reversed(&self) -> Self {
        let mut coords = self.geometry.0.clone();
        coords.reverse();
        Self {
            length: self.length,
            geometry: LineString::new(coords),
        }
    }
}

/// Great-circle distance in meters
pub fn distance(a: Point<f64>, b: Point<f64>) -> Meters {
    Haversine.distance(a, b)
}

/// Sum of great-circle distances along a polyline
pub fn polyline_length(line: &LineString<f64>) -> Meters {
    line.points()
        .tuple_windows()
        .map(|(a, b)| distance(a, b))
        .sum()
}

/// Mean Earth radius used for the planar projection of the spatial index
const EARTH_RADIUS: Meters = 6_371_008.8;

/// Candidates whose planar distance exceeds the best great-circle one by
/// this factor cannot be nearer
const RERANK_SLACK: f64 = 1.05;

/// Equirectangular coordinates in meters around a reference latitude
fn project(point: Point<f64>, cos_lat: f64) -> [f64; 2] {
    [
        point.x().to_radians() * cos_lat * EARTH_RADIUS,
        point.y().to_radians() * EARTH_RADIUS,
    ]
}

/// Nearest-node index over lon/lat points, ranked by great-circle distance.
///
/// Points are stored projected around their mean latitude, so the planar
/// search only proposes candidates; the answer is the one with the smallest
/// Haversine distance.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    rtree: RTree<IndexedPoint>,
    cos_lat: f64,
}

impl SpatialIndex {
    #[allow(clippy::cast_precision_loss)]
    pub fn new(points: impl Iterator<Item = (NodeIndex, Point<f64>)>) -> Self {
        let points: Vec<(NodeIndex, Point<f64>)> = points.collect();
        let cos_lat = if points.is_empty() {
            1.0
        } else {
            let mean_lat = points.iter().map(|(_, p)| p.y()).sum::<f64>() / points.len() as f64;
            mean_lat.to_radians().cos()
        };

        let indexed_points = points
            .into_iter()
            .map(|(idx, point)| IndexedPoint::new(project(point, cos_lat), (idx, point)))
            .collect::<Vec<_>>();
        Self {
            rtree: RTree::bulk_load(indexed_points),
            cos_lat,
        }
    }

    /// Nearest indexed node and its great-circle distance from `point`
    pub fn nearest(&self, point: &Point<f64>) -> Option<(NodeIndex, Meters)> {
        let query = project(*point, self.cos_lat);
        let mut best: Option<(NodeIndex, Meters)> = None;

        for (candidate, planar_2) in self.rtree.nearest_neighbor_iter_with_distance_2(&query) {
            let planar = planar_2.sqrt();
            if best.is_some_and(|(_, dist)| planar > dist * RERANK_SLACK + 1.0) {
                break;
            }
            let (idx, location) = candidate.data;
            let dist = distance(*point, location);
            if best.is_none_or(|(_, best_dist)| dist < best_dist) {
                best = Some((idx, dist));
            }
        }
        best
    }

    pub fn len(&self) -> usize {
        self.rtree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.rtree.size() == 0
    }
}

#[cfg(test)]
mod tests {
    use geo::line_string;

    use super::*;

    #[test]
    fn distance_one_degree_latitude() {
        let d = distance(Point::new(2.0, 41.0), Point::new(2.0, 42.0));
        assert!((d - 111_195.0).abs() < 100.0, "got {d}");
    }

    #[test]
    fn polyline_length_sums_pieces() {
        let line = line_string![(x: 2.0, y: 41.0), (x: 2.0, y: 41.001), (x: 2.0, y: 41.002)];
        let direct = distance(Point::new(2.0, 41.0), Point::new(2.0, 41.002));
        assert!((polyline_length(&line) - direct).abs() < 1e-6);
        assert_eq!(polyline_length(&LineString::new(vec![])), 0.0);
    }

    #[test]
    fn nearest_reports_snap_distance() {
        let index = SpatialIndex::new(
            [
                (NodeIndex::new(0), Point::new(2.0, 41.0)),
                (NodeIndex::new(1), Point::new(2.01, 41.0)),
            ]
            .into_iter(),
        );
        let (node, dist) = index.nearest(&Point::new(2.009, 41.0)).unwrap();
        assert_eq!(node, NodeIndex::new(1));
        assert!(dist > 0.0 && dist < 100.0);

        let empty = SpatialIndex::new(std::iter::empty());
        assert!(empty.is_empty());
        assert!(empty.nearest(&Point::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn nearest_is_measured_in_meters() {
        // East is nearer on the ground although north is nearer in degrees
        let query = Point::new(2.0, 41.0);
        let east = Point::new(2.002, 41.0);
        let north = Point::new(2.0, 41.0019);
        assert!(distance(query, east) < distance(query, north));

        let index = SpatialIndex::new(
            [(NodeIndex::new(0), north), (NodeIndex::new(1), east)].into_iter(),
        );
        let (node, dist) = index.nearest(&query).unwrap();
        assert_eq!(node, NodeIndex::new(1));
        assert!((dist - distance(query, east)).abs() < 1e-9);
        assert!((dist - 167.8).abs() < 1.0, "got {dist}");
    }

    #[test]
    fn reversed_segment_keeps_length() {
        let seg = SegmentBase::new(12.0, line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)]);
        let back = seg.reversed();
        assert_eq!(back.length, 12.0);
        assert_eq!(back.geometry.0[0], seg.geometry.0[1]);
    }
}

use geo::{Coord, LineString, Point, line_string};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use itertools::Itertools;
use serde_json::json;

use crate::model::{CityGraph, EdgeKind, TransferKind};
use crate::routing::Path;
use crate::{Error, Meters, Seconds};

#[derive(Debug, Clone, PartialEq)]
enum LegKind {
    Walk,
    Bus(String),
}

/// Contiguous stretch of a path travelled in one mode
#[derive(Debug, Clone)]
struct Leg {
    kind: LegKind,
    coords: Vec<Coord<f64>>,
    length: Meters,
    duration: Seconds,
}

impl Leg {
    fn new(kind: LegKind) -> Self {
        Self {
            kind,
            coords: Vec::new(),
            length: 0.0,
            duration: 0.0,
        }
    }

    fn extend(&mut self, geometry: &LineString<f64>, length: Meters, duration: Seconds) {
        let mut coords = geometry.0.iter().copied().peekable();
        // Shared junction with the previous piece
        if self.coords.last() == coords.peek() {
            coords.next();
        }
        self.coords.extend(coords);
        self.length += length;
        self.duration += duration;
    }

    fn to_feature(&self, leg_idx: usize) -> Result<Feature, Error> {
        let (leg_type, line) = match &self.kind {
            LegKind::Walk => ("walk", None),
            LegKind::Bus(line) => ("bus", Some(line)),
        };
        let geometry = Geometry::new(GeoJsonValue::from(&LineString::new(self.coords.clone())));

        let value = json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": {
                "leg_type": leg_type,
                "leg_index": leg_idx,
                "line": line,
                "length": self.length,
                "duration": self.duration,
            }
        });

        serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

/// Converts a path into a `GeoJSON` `FeatureCollection`.
///
/// The collection holds the walk from the source to the first intersection,
/// one line per walking or bus leg, the walk from the last intersection to
/// the destination and the two endpoints as points.
pub fn route_to_geojson(city: &CityGraph, path: &Path) -> Result<FeatureCollection, Error> {
    let mut features = Vec::new();

    features.push(point_feature(path.source, "source")?);

    if let Some(&first) = path.route.first() {
        features.push(direct_walk_feature(
            path.source,
            city.node(first).geometry(),
            "access_walk",
        )?);
    }

    for (idx, leg) in route_legs(city, path).iter().enumerate() {
        features.push(leg.to_feature(idx)?);
    }

    if let Some(&last) = path.route.last() {
        features.push(direct_walk_feature(
            city.node(last).geometry(),
            path.destination,
            "egress_walk",
        )?);
    }

    features.push(point_feature(path.destination, "destination")?);

    Ok(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    })
}

pub fn route_to_geojson_string(city: &CityGraph, path: &Path) -> Result<String, Error> {
    serde_json::to_string(&route_to_geojson(city, path)?)
        .map_err(|e| Error::GeoJsonError(e.to_string()))
}

/// Groups the path edges into legs; boarding and alighting close the current leg
fn route_legs(city: &CityGraph, path: &Path) -> Vec<Leg> {
    let mut legs: Vec<Leg> = Vec::new();
    let mut current: Option<Leg> = None;

    for (from, to) in path.route.iter().copied().tuple_windows() {
        let Some(edge) = city.edge_between(from, to) else {
            continue;
        };

        let kind = match &edge.kind {
            EdgeKind::Street(_) => LegKind::Walk,
            EdgeKind::Transfer(transfer) if transfer.kind == TransferKind::Access => LegKind::Walk,
            EdgeKind::Bus(bus) => LegKind::Bus(bus.line.clone()),
            EdgeKind::Transfer(_) => {
                legs.extend(current.take());
                continue;
            }
        };

        if current.as_ref().is_some_and(|leg| leg.kind != kind) {
            legs.extend(current.take());
        }
        current
            .get_or_insert_with(|| Leg::new(kind))
            .extend(edge.geometry(), edge.length(), edge.time);
    }
    legs.extend(current);

    legs.retain(|leg| leg.coords.len() > 1);
    legs
}

fn direct_walk_feature(
    from: Point<f64>,
    to: Point<f64>,
    leg_type: &str,
) -> Result<Feature, Error> {
    let line = line_string![
        (x: from.x(), y: from.y()),
        (x: to.x(), y: to.y()),
    ];

    let value = json!({
        "type": "Feature",
        "geometry": Geometry::new(GeoJsonValue::from(&line)),
        "properties": {
            "leg_type": leg_type,
            "length": crate::model::geometry::distance(from, to),
        }
    });

    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn point_feature(point: Point<f64>, role: &str) -> Result<Feature, Error> {
    let value = json!({
        "type": "Feature",
        "geometry": Geometry::new(GeoJsonValue::from(&point)),
        "properties": {
            "role": role,
        }
    });

    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

//! Street network components - intersections and street segments

use geo::{LineString, Point};
use serde::{Deserialize, Serialize};

use crate::{Meters, NodeId, Seconds};
use crate::model::geometry::{NodeBase, SegmentBase};

/// Street graph node, a road-network junction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intersection {
    pub base: NodeBase,
}

impl Intersection {
    pub fn new(id: NodeId, geometry: Point<f64>) -> Self {
        Self {
            base: NodeBase { id, geometry },
        }
    }

    pub fn id(&self) -> NodeId {
        self.base.id
    }

    pub fn geometry(&self) -> Point<f64> {
        self.base.geometry
    }
}

/// Street graph edge, a walkable link between two intersections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreetSegment {
    pub base: SegmentBase,
    /// Display name, aliases joined; empty when the street is unnamed
    pub name: String,
}

impl StreetSegment {
    pub fn new(length: Meters, geometry: LineString<f64>, name: String) -> Self {
        Self {
            base: SegmentBase::new(length, geometry),
            name,
        }
    }

    pub fn length(&self) -> Meters {
        self.base.length
    }
}

/// Street graph edge (street segment) with its pedestrian crossing time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreetEdge {
    /// Pedestrian crossing time in seconds
    pub weight: Seconds,
    pub segment: StreetSegment,
}

impl StreetEdge {
    pub fn walking_time(&self) -> Seconds {
        self.weight
    }
}

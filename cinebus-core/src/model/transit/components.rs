use geo::{LineString, Point};
use serde::{Deserialize, Serialize};

use crate::model::geometry::{NodeBase, SegmentBase};
use crate::{Meters, NodeId, Seconds};

/// A bus stop as served by one line.
///
/// The same physical stop served by two lines yields two distinct `LineStop`s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStop {
    pub base: NodeBase,
    pub name: String,
    pub line: String,
}

/// Identity of a [`LineStop`] inside the bus graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineStopKey {
    pub stop_id: NodeId,
    pub line: String,
}

impl LineStop {
    pub fn new(id: NodeId, geometry: Point<f64>, name: String, line: String) -> Self {
        Self {
            base: NodeBase { id, geometry },
            name,
            line,
        }
    }

    pub fn id(&self) -> NodeId {
        self.base.id
    }

    pub fn geometry(&self) -> Point<f64> {
        self.base.geometry
    }

    pub fn key(&self) -> LineStopKey {
        LineStopKey {
            stop_id: self.base.id,
            line: self.line.clone(),
        }
    }
}

/// Scheduled link between two consecutive stops of one line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusSegment {
    pub base: SegmentBase,
    pub line: String,
}

impl BusSegment {
    pub fn new(length: Meters, geometry: LineString<f64>, line: String) -> Self {
        Self {
            base: SegmentBase::new(length, geometry),
            line,
        }
    }

    pub fn length(&self) -> Meters {
        self.base.length
    }
}

/// Bus graph edge: dwell time plus riding time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusEdge {
    pub weight: Seconds,
    pub segment: BusSegment,
}

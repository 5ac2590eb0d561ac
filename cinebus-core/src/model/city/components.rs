//! Node and edge kinds of the fused graph

use geo::{LineString, Point};
use serde::{Deserialize, Serialize};

use crate::model::geometry::{NodeBase, SegmentBase};
use crate::model::streets::{Intersection, StreetSegment};
use crate::model::transit::{BusSegment, LineStop};
use crate::{Meters, NodeId, Seconds};

/// A physical bus stop shared by every line serving it, the hub for transfers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedStop {
    pub base: NodeBase,
    pub name: String,
}

impl MergedStop {
    pub fn from_line_stop(stop: &LineStop) -> Self {
        Self {
            base: stop.base.clone(),
            name: stop.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CityNode {
    Intersection(Intersection),
    MergedStop(MergedStop),
    LineStop(LineStop),
}

impl CityNode {
    pub fn base(&self) -> &NodeBase {
        match self {
            CityNode::Intersection(node) => &node.base,
            CityNode::MergedStop(node) => &node.base,
            CityNode::LineStop(node) => &node.base,
        }
    }

    pub fn id(&self) -> NodeId {
        self.base().id
    }

    pub fn geometry(&self) -> Point<f64> {
        self.base().geometry
    }

    /// Stop name, `None` for intersections
    pub fn name(&self) -> Option<&str> {
        match self {
            CityNode::Intersection(_) => None,
            CityNode::MergedStop(node) => Some(&node.name),
            CityNode::LineStop(node) => Some(&node.name),
        }
    }

    pub fn is_intersection(&self) -> bool {
        matches!(self, CityNode::Intersection(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferKind {
    /// Walk between a merged stop and its nearest intersection
    Access,
    /// Merged stop -> line stop, costs the expected wait
    Board,
    /// Line stop -> merged stop, free
    Alight,
}

/// Mode or line change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferSegment {
    pub base: SegmentBase,
    pub kind: TransferKind,
    /// Name of the stop the transfer happens at
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EdgeKind {
    Street(StreetSegment),
    Bus(BusSegment),
    Transfer(TransferSegment),
}

/// Edge of the fused graph, weighted by travel time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityEdge {
    pub time: Seconds,
    pub kind: EdgeKind,
}

impl CityEdge {
    pub fn base(&self) -> &SegmentBase {
        match &self.kind {
            EdgeKind::Street(segment) => &segment.base,
            EdgeKind::Bus(segment) => &segment.base,
            EdgeKind::Transfer(segment) => &segment.base,
        }
    }

    pub fn length(&self) -> Meters {
        self.base().length
    }

    pub fn geometry(&self) -> &LineString<f64> {
        &self.base().geometry
    }

    /// Whether the distance of this edge is covered on foot
    pub fn is_walking(&self) -> bool {
        match &self.kind {
            EdgeKind::Street(_) => true,
            EdgeKind::Transfer(segment) => segment.kind == TransferKind::Access,
            EdgeKind::Bus(_) => false,
        }
    }

    pub fn transfer_kind(&self) -> Option<TransferKind> {
        match &self.kind {
            EdgeKind::Transfer(segment) => Some(segment.kind),
            _ => None,
        }
    }
}

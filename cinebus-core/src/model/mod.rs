//! Data model for multimodal routing
//!
//! Contains the street, bus and fused city networks together with the
//! cost model that turns lengths into travel times.

pub mod city;
pub mod costs;
pub mod geometry;
pub mod streets;
pub mod transit;

pub use city::{
    CityEdge, CityGraph, CityNode, EdgeKind, MergedStop, TransferKind, TransferSegment,
};
pub use costs::CostModel;
pub use geometry::{IndexedPoint, NodeBase, SegmentBase, SpatialIndex};
pub use streets::{Intersection, StreetEdge, StreetGraph, StreetSegment};
pub use transit::{BusEdge, BusGraph, BusSegment, LineStop, LineStopKey};

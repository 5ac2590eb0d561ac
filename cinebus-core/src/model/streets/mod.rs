//! Pedestrian street network model

pub mod components;
pub mod network;

pub use components::{Intersection, StreetEdge, StreetSegment};
pub use network::StreetGraph;

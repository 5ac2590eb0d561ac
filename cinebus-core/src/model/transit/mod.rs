//! Bus network model

pub mod components;
pub mod network;

pub use components::{BusEdge, BusSegment, LineStop, LineStopKey};
pub use network::BusGraph;

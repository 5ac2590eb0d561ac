//! Fused multimodal city network

pub mod components;
pub mod network;

pub use components::{CityEdge, CityNode, EdgeKind, MergedStop, TransferKind, TransferSegment};
pub use network::CityGraph;

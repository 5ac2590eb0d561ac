//! This module is responsible for turning raw road and bus data into the
//! street, bus and fused city graphs, and for caching them on disk.

mod builder;
mod buses;
pub mod cache;
mod fusion;
pub mod raw;
pub mod road;
mod streets;

pub use builder::build_city_session;
pub use buses::{SkipReason, build_bus_graph, build_bus_graph_on};
pub use fusion::fuse_city_graph;
pub use raw::{BusLine, RawStop, RoadEdge, RoadNetwork, RoadNode, StreetName};
pub use road::RoadGraph;
pub use streets::build_street_graph;

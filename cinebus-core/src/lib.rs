//! Door-to-cinema journey planning over a fused street and bus network.
//!
//! The crate builds three graphs from raw data:
//!
//! - a walkable street graph of intersections ([`StreetGraph`]),
//! - a per-line bus graph whose segments follow real road geometry ([`BusGraph`]),
//! - the fused multimodal [`CityGraph`] with access, board and alight edges,
//!
//! and answers least-time queries over the latter, turning the resulting
//! [`Path`] into a step-by-step [`Itinerary`].

pub mod error;
pub mod itinerary;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;
pub mod session;

pub use error::Error;
pub use itinerary::{
    Direction, Instruction, Itinerary, TimingContext, TimingFacts, compose_itinerary,
    route_to_geojson,
};
pub use loading::{
    BusLine, RawStop, RoadEdge, RoadNetwork, RoadNode, StreetName, build_bus_graph,
    build_street_graph, fuse_city_graph,
};
pub use model::{BusGraph, CityGraph, CostModel, StreetGraph};
pub use routing::{Path, find_path};
pub use session::{CitySession, ReachableShowtime, Showtime};

/// Seconds, the single unit shared by every edge weight
pub type Seconds = f64;
/// Meters
pub type Meters = f64;

/// Stable id of a road-network node or a bus stop, as given by the data source
pub type NodeId = u64;

/// Average walking speed of a person (m/s)
pub const WALKING_SPEED: f64 = 1.5;
/// Average cruising speed of a bus (m/s)
pub const BUS_SPEED: f64 = 5.0;
/// Dwell time of a bus at each stop (s)
pub const BUS_STOP_TIME: Seconds = 10.0;
/// Expected wait for a bus when boarding (s)
pub const BUS_WAITING_TIME: Seconds = 300.0;
/// Stops further than this from the road network are not trusted (m)
pub const MAX_SNAP_DISTANCE: Meters = 200.0;

// Re-export key components
pub use crate::itinerary::{
    Direction, Instruction, Itinerary, TimingContext, TimingFacts, compose_itinerary,
    route_to_geojson,
};
pub use crate::loading::{
    BusLine, RawStop, RoadEdge, RoadNetwork, RoadNode, StreetName, build_bus_graph,
    build_street_graph, cache, fuse_city_graph,
};
pub use crate::model::{
    BusGraph, CityEdge, CityGraph, CityNode, CostModel, EdgeKind, StreetGraph, TransferKind,
};
pub use crate::routing::{Path, find_path};
pub use crate::session::{CitySession, ReachableShowtime, Showtime};

// Units
pub use crate::Error;
pub use crate::Meters;
pub use crate::NodeId;
pub use crate::Seconds;

//! Itinerary Composer: path -> instructions, totals, timing facts and map geometry

mod compose;
mod timing;
mod to_geojson;

pub use compose::{Instruction, Itinerary, compose_itinerary};
pub use timing::{Direction, TimingContext, TimingFacts, format_clock, format_duration};
pub use to_geojson::{route_to_geojson, route_to_geojson_string};

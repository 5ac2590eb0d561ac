//! Built graphs plus the queries a journey planner front end needs

use chrono::NaiveDateTime;
use geo::Point;
use hashbrown::HashMap;
use itertools::Itertools;
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::itinerary::{Itinerary, TimingContext, compose_itinerary};
use crate::loading::{BusLine, RoadNetwork, build_city_session};
use crate::model::{BusGraph, CityGraph, CostModel, StreetGraph};
use crate::routing::{Path, find_path};
use crate::Error;

/// A projection of a film at a cinema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Showtime {
    pub film: String,
    pub cinema: String,
    pub location: Point<f64>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// A showtime that can still be reached, with the path to its cinema
#[derive(Debug, Clone)]
pub struct ReachableShowtime {
    pub showtime: Showtime,
    pub path: Path,
}

/// The three built graphs and the cost model they were built with
#[derive(Debug, Clone)]
pub struct CitySession {
    pub streets: StreetGraph,
    pub buses: BusGraph,
    pub city: CityGraph,
    pub costs: CostModel,
}

impl CitySession {
    pub fn new(streets: StreetGraph, buses: BusGraph, city: CityGraph, costs: CostModel) -> Self {
        Self {
            streets,
            buses,
            city,
            costs,
        }
    }

    /// Builds all graphs from raw data
    pub fn build(
        network: &RoadNetwork,
        lines: &[BusLine],
        costs: &CostModel,
    ) -> Result<Self, Error> {
        build_city_session(network, lines, costs)
    }

    pub fn find_path(&self, source: Point<f64>, destination: Point<f64>) -> Result<Path, Error> {
        find_path(&self.city, source, destination, &self.costs)
    }

    pub fn itinerary(
        &self,
        path: &Path,
        destination: &str,
        timing: Option<&TimingContext>,
    ) -> Result<Itinerary, Error> {
        compose_itinerary(&self.city, path, destination, timing)
    }

    /// Showtimes reachable from `source` when leaving at `now`, sorted by start.
    ///
    /// One path is computed per cinema; cinemas without a route are left out.
    pub fn reachable_showtimes(
        &self,
        source: Point<f64>,
        showtimes: &[Showtime],
        now: NaiveDateTime,
    ) -> Vec<ReachableShowtime> {
        let cinemas: Vec<(&str, Point<f64>)> = showtimes
            .iter()
            .map(|showtime| (showtime.cinema.as_str(), showtime.location))
            .unique_by(|(cinema, _)| *cinema)
            .collect();

        let paths: HashMap<&str, Path> = cinemas
            .par_iter()
            .filter_map(|&(cinema, location)| match self.find_path(source, location) {
                Ok(path) => Some((cinema, path)),
                Err(e) => {
                    debug!("No route to cinema {cinema}: {e}");
                    None
                }
            })
            .collect::<Vec<_>>()
            .into_iter()
            .collect();

        showtimes
            .iter()
            .filter_map(|showtime| {
                let path = paths.get(showtime.cinema.as_str())?;
                (now + path.duration() < showtime.start).then(|| ReachableShowtime {
                    showtime: showtime.clone(),
                    path: path.clone(),
                })
            })
            .sorted_by_key(|reachable| reachable.showtime.start)
            .collect()
    }

    /// Itinerary from `home` to the cinema of `showtime`
    pub fn outbound_itinerary(
        &self,
        home: Point<f64>,
        showtime: &Showtime,
        now: NaiveDateTime,
    ) -> Result<Itinerary, Error> {
        let path = self.find_path(home, showtime.location)?;
        let timing = TimingContext::outbound(now, showtime.start, showtime.end);
        self.itinerary(&path, &showtime.cinema, Some(&timing))
    }

    /// Itinerary from the cinema of `showtime` back to `home` once the film ends
    pub fn return_itinerary(
        &self,
        showtime: &Showtime,
        home: Point<f64>,
        now: NaiveDateTime,
    ) -> Result<Itinerary, Error> {
        let path = self.find_path(showtime.location, home)?;
        let timing = TimingContext::return_trip(now, showtime.end);
        self.itinerary(&path, "home", Some(&timing))
    }
}

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use cinebus_core::itinerary::{format_clock, route_to_geojson_string};
use cinebus_core::prelude::*;
use clap::Args;
use geo::Point;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::config::CliConfig;
use crate::error::CliError;

/// Parses `LON,LAT`
pub fn parse_point(text: &str) -> Result<Point<f64>, String> {
    let (lon, lat) = text
        .split_once(',')
        .ok_or_else(|| format!("expected LON,LAT, got '{text}'"))?;
    let parse = |value: &str| {
        value
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid coordinate '{value}': {e}"))
    };
    Ok(Point::new(parse(lon)?, parse(lat)?))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let file = File::open(path).map_err(|e| {
        io::Error::new(
            e.kind(),
            format!("Failed to open '{}': {}", path.display(), e),
        )
    })?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

fn now_or(now: Option<NaiveDateTime>) -> NaiveDateTime {
    now.unwrap_or_else(|| chrono::Local::now().naive_local())
}

/// Cached graphs when present, built from the configured inputs otherwise
pub fn open_session(config: &CliConfig) -> Result<CitySession, CliError> {
    let session = cache::load_or_build(
        &config.cache_dir,
        || read_json(&config.road_network),
        || read_json(&config.bus_lines),
        &config.costs,
    )?;
    Ok(session)
}

#[derive(Args, Clone, Debug)]
pub struct BuildArgs {
    #[arg(long, help = "Rebuild even if the cache is complete.")]
    force: bool,
}

pub fn build(config: &CliConfig, args: &BuildArgs) -> Result<(), CliError> {
    let session = if args.force {
        let network: RoadNetwork = read_json(&config.road_network)?;
        let lines: Vec<BusLine> = read_json(&config.bus_lines)?;
        let session = CitySession::build(&network, &lines, &config.costs)?;
        cache::save_session(&config.cache_dir, &session)?;
        session
    } else {
        open_session(config)?
    };

    info!("Graphs cached in {}", config.cache_dir.display());
    println!(
        "Streets: {} intersections, {} segments",
        session.streets.node_count(),
        session.streets.edge_count()
    );
    println!(
        "Buses: {} line stops, {} segments",
        session.buses.stop_count(),
        session.buses.segment_count()
    );
    println!(
        "City: {} nodes, {} edges",
        session.city.node_count(),
        session.city.edge_count()
    );
    Ok(())
}

#[derive(Args, Clone, Debug)]
pub struct RouteArgs {
    #[arg(long, value_parser = parse_point, help = "Origin as LON,LAT.")]
    from: Point<f64>,

    #[arg(long, value_parser = parse_point, help = "Destination as LON,LAT.")]
    to: Point<f64>,

    #[arg(long, default_value = "your destination", help = "Name of the destination.")]
    name: String,

    #[arg(long, help = "Event start, e.g. 2026-10-18T20:00:00.")]
    start: Option<NaiveDateTime>,

    #[arg(long, help = "Event end, e.g. 2026-10-18T22:00:00.")]
    end: Option<NaiveDateTime>,

    #[arg(
        long = "return",
        help = "Route from the destination back to the origin once the event ends."
    )]
    return_trip: bool,

    #[arg(long, help = "Departure reference time, the current time when absent.")]
    now: Option<NaiveDateTime>,

    #[arg(long, help = "Write the route as GeoJSON to this file.")]
    geojson: Option<PathBuf>,
}

impl RouteArgs {
    fn timing(&self) -> Option<TimingContext> {
        let now = now_or(self.now);
        if self.return_trip {
            return Some(TimingContext {
                now,
                event_start: self.start,
                event_end: self.end,
                direction: Direction::Return,
            });
        }
        if self.start.is_none() && self.end.is_none() {
            return None;
        }
        Some(TimingContext {
            now,
            event_start: self.start,
            event_end: self.end,
            direction: Direction::Outbound,
        })
    }
}

pub fn route(config: &CliConfig, args: &RouteArgs) -> Result<(), CliError> {
    let session = open_session(config)?;
    let (source, destination, name) = if args.return_trip {
        (args.to, args.from, "home")
    } else {
        (args.from, args.to, args.name.as_str())
    };

    let path = session.find_path(source, destination)?;
    let itinerary = session.itinerary(&path, name, args.timing().as_ref())?;
    print!("{itinerary}");

    if let Some(output) = &args.geojson {
        let geojson = route_to_geojson_string(&session.city, &path)?;
        std::fs::write(output, geojson).map_err(Error::from)?;
        info!("Route written to {}", output.display());
    }
    Ok(())
}

#[derive(Args, Clone, Debug)]
pub struct ShowtimesArgs {
    #[arg(long, value_parser = parse_point, help = "Origin as LON,LAT.")]
    from: Point<f64>,

    #[arg(long, help = "JSON array of showtimes.")]
    file: PathBuf,

    #[arg(long, help = "Departure reference time, the current time when absent.")]
    now: Option<NaiveDateTime>,
}

pub fn showtimes(config: &CliConfig, args: &ShowtimesArgs) -> Result<(), CliError> {
    let session = open_session(config)?;
    let showtimes: Vec<Showtime> = read_json(&args.file)?;
    let now = now_or(args.now);

    let reachable = session.reachable_showtimes(args.from, &showtimes, now);
    info!(
        "{} of {} showtimes reachable in time",
        reachable.len(),
        showtimes.len()
    );
    if reachable.is_empty() {
        println!("No showtime can be reached in time");
    }
    for ReachableShowtime { showtime, path } in &reachable {
        println!(
            "{} {} at {} (arrive {})",
            format_clock(&showtime.start),
            showtime.film,
            showtime.cinema,
            format_clock(&(now + path.duration()))
        );
    }
    Ok(())
}

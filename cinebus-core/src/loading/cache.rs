//! Persisted graph cache
//!
//! Each graph kind lives in a fixed file inside a cache directory, next to the
//! cost model the graphs were weighted with. Only the graphs themselves are
//! stored; spatial and id indices are rebuilt on load.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::info;
use serde::{Serialize, de::DeserializeOwned};

use super::builder::build_graphs;
use super::raw::{BusLine, RoadNetwork};
use crate::model::{BusGraph, CityGraph, CostModel, StreetGraph};
use crate::{Error, session::CitySession};

pub const STREET_GRAPH_FILE: &str = "streets.graph.json";
pub const BUS_GRAPH_FILE: &str = "buses.graph.json";
pub const CITY_GRAPH_FILE: &str = "city.graph.json";
pub const COSTS_FILE: &str = "costs.json";

pub fn save_graph<T: Serialize>(path: &Path, graph: &T) -> Result<(), Error> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(writer, graph)?;
    Ok(())
}

pub fn load_graph<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open graph file '{}': {}", path.display(), e),
        )
    })?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Writes the three graphs of `session` and its cost model into `dir`
pub fn save_session(dir: &Path, session: &CitySession) -> Result<(), Error> {
    std::fs::create_dir_all(dir)?;
    save_graph(&dir.join(STREET_GRAPH_FILE), &session.streets.graph)?;
    save_graph(&dir.join(BUS_GRAPH_FILE), &session.buses.graph)?;
    save_graph(&dir.join(CITY_GRAPH_FILE), &session.city.graph)?;
    save_graph(&dir.join(COSTS_FILE), &session.costs)?;
    Ok(())
}

/// Reads the three graphs from `dir` with the cost model they were built with
pub fn load_session(dir: &Path) -> Result<CitySession, Error> {
    let costs: CostModel = load_graph(&dir.join(COSTS_FILE))?;
    let streets = StreetGraph::from_graph(load_graph(&dir.join(STREET_GRAPH_FILE))?);
    let buses = BusGraph::from_graph(load_graph(&dir.join(BUS_GRAPH_FILE))?);
    let city = CityGraph::from_graph(load_graph(&dir.join(CITY_GRAPH_FILE))?);
    Ok(CitySession::new(streets, buses, city, costs))
}

/// Cost model the cached graphs were weighted with, if readable
fn cached_costs(dir: &Path) -> Option<CostModel> {
    load_graph(&dir.join(COSTS_FILE)).ok()
}

fn file_exists_and_not_empty(path: &Path) -> bool {
    path.metadata().is_ok_and(|meta| meta.len() > 0)
}

/// Loads the cached graphs, building and saving them first if any is missing
/// or they were weighted with a different cost model
pub fn load_or_build(
    dir: &Path,
    network: impl FnOnce() -> Result<RoadNetwork, Error>,
    lines: impl FnOnce() -> Result<Vec<BusLine>, Error>,
    costs: &CostModel,
) -> Result<CitySession, Error> {
    costs.validate()?;

    let complete = [STREET_GRAPH_FILE, BUS_GRAPH_FILE, CITY_GRAPH_FILE, COSTS_FILE]
        .iter()
        .all(|name| file_exists_and_not_empty(&dir.join(name)));

    if complete {
        if cached_costs(dir).as_ref() == Some(costs) {
            info!("Loading cached graphs from {}", dir.display());
            return load_session(dir);
        }
        info!("Graph cache in {} uses another cost model, rebuilding", dir.display());
    } else {
        info!("Graph cache in {} is incomplete, rebuilding", dir.display());
    }

    let network = network()?;
    let lines = lines()?;
    let (streets, buses, city) = build_graphs(&network, &lines, costs)?;
    let session = CitySession::new(streets, buses, city, *costs);
    save_session(dir, &session)?;
    Ok(session)
}

use geo::{ConvexHull, Intersects, MultiPoint};
use log::info;

use super::buses::build_bus_graph_on;
use super::fusion::fuse_city_graph;
use super::raw::{BusLine, RoadNetwork};
use super::road::RoadGraph;
use super::streets::build_street_graph;
use crate::model::{BusGraph, CityGraph, CostModel, StreetGraph};
use crate::{Error, session::CitySession};

/// Builds the street, bus and city graphs from raw data
///
/// # Errors
///
/// Returns an error if the input data is empty, the cost model is invalid
/// or a builder thread panics
pub fn build_city_session(
    network: &RoadNetwork,
    lines: &[BusLine],
    costs: &CostModel,
) -> Result<CitySession, Error> {
    let (streets, buses, city) = build_graphs(network, lines, costs)?;
    Ok(CitySession::new(streets, buses, city, *costs))
}

pub(crate) fn build_graphs(
    network: &RoadNetwork,
    lines: &[BusLine],
    costs: &CostModel,
) -> Result<(StreetGraph, BusGraph, CityGraph), Error> {
    validate_input(network, lines, costs)?;

    info!(
        "Processing road network: {} nodes, {} edges",
        network.nodes.len(),
        network.edges.len()
    );

    let (streets, buses) = std::thread::scope(|scope| {
        // Street graph in a separate thread while the bus graph is built
        let streets_handle = scope.spawn(|| build_street_graph(network, costs));

        info!("Processing {} bus lines", lines.len());
        let road = RoadGraph::from_network(network);
        let buses = build_bus_graph_on(lines, &road, costs);

        let streets = streets_handle
            .join()
            .map_err(|_| Error::UnrecoverableError("street graph thread panicked"))?;
        Ok::<_, Error>((streets, buses))
    })?;

    validate_street_bus_overlap(&streets, &buses);

    let city = fuse_city_graph(&streets, &buses, costs);
    info!("City graph created successfully");

    Ok((streets, buses, city))
}

fn validate_input(
    network: &RoadNetwork,
    lines: &[BusLine],
    costs: &CostModel,
) -> Result<(), Error> {
    costs.validate()?;
    if network.nodes.is_empty() {
        return Err(Error::InvalidData(
            "Road network contains no nodes".to_string(),
        ));
    }
    if lines.is_empty() {
        log::warn!("No bus lines provided - the city graph will be walking only");
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn validate_street_bus_overlap(streets: &StreetGraph, buses: &BusGraph) {
    let street_nodes: MultiPoint = streets
        .graph
        .node_weights()
        .map(|node| node.geometry())
        .collect();
    let street_hull = street_nodes.convex_hull();

    let stops_outside_hull = buses
        .graph
        .node_weights()
        .filter(|stop| !stop.geometry().intersects(&street_hull))
        .count();

    let total_stops = buses.stop_count();
    if stops_outside_hull > 0 {
        let percentage = (stops_outside_hull as f64 / total_stops as f64) * 100.0;
        log::warn!(
            "{stops_outside_hull} of {total_stops} bus stops ({percentage:.1}%) are outside \
        the street network coverage area. These stops may be unreachable on foot."
        );
    }
}

use std::hint::black_box;

use cinebus_core::model::geometry::distance;
use cinebus_core::prelude::*;
use criterion::{Criterion, criterion_group, criterion_main};
use geo::Point;

const SIZE: u64 = 30;
const STEP: f64 = 0.002;

fn node_id(row: u64, col: u64) -> NodeId {
    row * SIZE + col
}

fn point(row: u64, col: u64) -> Point<f64> {
    Point::new(2.0 + STEP * col as f64, 41.0 + STEP * row as f64)
}

/// Square grid of two-way streets
fn grid_network() -> RoadNetwork {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    for row in 0..SIZE {
        for col in 0..SIZE {
            let p = point(row, col);
            nodes.push(RoadNode {
                id: node_id(row, col),
                x: p.x(),
                y: p.y(),
            });
            let mut link = |to_row, to_col, name: String| {
                let length = distance(p, point(to_row, to_col));
                for (from, to) in [
                    (node_id(row, col), node_id(to_row, to_col)),
                    (node_id(to_row, to_col), node_id(row, col)),
                ] {
                    edges.push(RoadEdge {
                        from,
                        to,
                        length,
                        name: Some(StreetName::Single(name.clone())),
                    });
                }
            };
            if col + 1 < SIZE {
                link(row, col + 1, format!("Carrer {row}"));
            }
            if row + 1 < SIZE {
                link(row + 1, col, format!("Avinguda {col}"));
            }
        }
    }
    RoadNetwork { nodes, edges }
}

/// One line per fifth row, stopping at every third intersection
fn grid_lines() -> Vec<BusLine> {
    (0..SIZE)
        .step_by(5)
        .map(|row| BusLine {
            line: format!("H{row}"),
            stops: (0..SIZE)
                .step_by(3)
                .map(|col| {
                    let p = point(row, col);
                    RawStop {
                        id: 10_000 + node_id(row, col),
                        x: p.x(),
                        y: p.y(),
                        name: format!("Parada {row}-{col}"),
                    }
                })
                .collect(),
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let network = grid_network();
    let lines = grid_lines();
    let costs = CostModel::default();

    c.bench_function("build_city_session", |b| {
        b.iter(|| CitySession::build(black_box(&network), black_box(&lines), &costs))
    });
}

fn bench_find_path(c: &mut Criterion) {
    let session = CitySession::build(&grid_network(), &grid_lines(), &CostModel::default())
        .expect("grid city builds");
    let source = point(0, 0);
    let destination = point(SIZE - 1, SIZE - 1);

    c.bench_function("find_path_corner_to_corner", |b| {
        b.iter(|| session.find_path(black_box(source), black_box(destination)))
    });

    let path = session
        .find_path(source, destination)
        .expect("corners are connected");
    c.bench_function("compose_itinerary", |b| {
        b.iter(|| session.itinerary(black_box(&path), "Cinema", None))
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = bench_build, bench_find_path
}
criterion_main!(benches);

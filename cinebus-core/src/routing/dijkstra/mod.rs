mod state;
pub mod traced_dijkstra;

pub use traced_dijkstra::dijkstra_path;

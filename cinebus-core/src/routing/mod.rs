//! Least-time routing over the fused city graph

pub mod dijkstra;
mod path;

pub use path::{Path, find_path};

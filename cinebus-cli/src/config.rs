//! TOML configuration of the command line tool

use std::path::{Path, PathBuf};

use cinebus_core::CostModel;
use serde::Deserialize;

use crate::error::CliError;

fn default_cache_dir() -> PathBuf {
    PathBuf::from("cache")
}

/// Input files, cache location and cost model.
///
/// Relative paths are resolved against the directory of the configuration file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// JSON [`cinebus_core::RoadNetwork`]
    pub road_network: PathBuf,
    /// JSON array of [`cinebus_core::BusLine`]
    pub bus_lines: PathBuf,
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
    /// Size of the global worker pool, all cores when absent
    #[serde(default)]
    pub workers: Option<usize>,
    #[serde(default)]
    pub costs: CostModel,
}

impl CliConfig {
    /// Parses and validates a configuration, costs included
    pub fn parse(text: &str) -> Result<Self, CliError> {
        let config: Self = toml::from_str(text)?;
        config.costs.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&text)?;
        Ok(config.relative_to(path.parent().unwrap_or(Path::new(""))))
    }

    fn relative_to(mut self, base: &Path) -> Self {
        for path in [&mut self.road_network, &mut self.bus_lines, &mut self.cache_dir] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }
}

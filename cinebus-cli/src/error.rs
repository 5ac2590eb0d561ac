use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Failed to configure worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("No route available")]
    NoRoute,

    #[error(transparent)]
    Core(cinebus_core::Error),
}

impl From<cinebus_core::Error> for CliError {
    fn from(error: cinebus_core::Error) -> Self {
        match error {
            cinebus_core::Error::NoPathFound => CliError::NoRoute,
            other => CliError::Core(other),
        }
    }
}

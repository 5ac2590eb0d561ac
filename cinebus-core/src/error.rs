use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No path found between the requested points")]
    NoPathFound,
    #[error("Missing timing context: {0}")]
    MissingTimingContext(&'static str),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
    #[error("Unrecoverable error: {0}")]
    UnrecoverableError(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            Error::NoPathFound.to_string(),
            "No path found between the requested points"
        );
        assert_eq!(
            Error::MissingTimingContext("event start").to_string(),
            "Missing timing context: event start"
        );
        assert_eq!(
            Error::InvalidData("unknown node 7".into()).to_string(),
            "Invalid data: unknown node 7"
        );
    }
}

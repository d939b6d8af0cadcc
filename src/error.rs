//! Error types for the cuisine-atlas host.

use restaurant_search::SearchError;

/// Top-level error type for the host process.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Configuration file could not be parsed or serialized.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Aggregator construction or aggregation failure.
    #[error("search error: {0}")]
    Search(#[from] SearchError),

    /// HTTP server bind or serve failure.
    #[error("server error: {0}")]
    Server(String),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, HostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_error_converts() {
        let err: HostError = SearchError::Config("timeout_seconds must be greater than 0".into()).into();
        assert_eq!(
            err.to_string(),
            "search error: config error: timeout_seconds must be greater than 0"
        );
    }

    #[test]
    fn io_error_converts() {
        let err: HostError = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, HostError::Io(_)));
    }
}

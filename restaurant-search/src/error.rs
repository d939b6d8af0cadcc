//! Error types for the restaurant-search crate.
//!
//! Provider-level errors never reach callers of the aggregator; they are
//! absorbed during fan-out and surface only as `false` source flags.
//! Only configuration and aggregation errors propagate.

/// Errors that can occur while fetching or aggregating restaurants.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// An HTTP request to a relay provider failed or returned non-2xx.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A provider response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A provider failed for a reason other than transport or decoding.
    #[error("provider error: {0}")]
    Provider(String),

    /// The merge, dedup or sort stage failed.
    #[error("aggregation error: {0}")]
    Aggregation(String),
}

/// Convenience type alias for restaurant-search results.
pub type Result<T> = std::result::Result<T, SearchError>;

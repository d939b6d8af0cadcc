//! # cuisine-atlas
//!
//! Backend host for the cuisine explorer. Loads configuration, builds the
//! restaurant aggregator from [`restaurant_search`] and serves it over
//! HTTP.

pub mod config;
pub mod error;
pub mod server;

pub use config::HostConfig;
pub use error::{HostError, Result};

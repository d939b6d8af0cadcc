//! Provider adapter implementations.
//!
//! Each module provides a type implementing [`crate::provider::RestaurantProvider`]
//! for one family of data sources.

pub mod local;
pub mod relay;

pub use local::LocalProvider;
pub use relay::RelayProvider;

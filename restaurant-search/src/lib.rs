//! # restaurant-search
//!
//! Multi-source restaurant aggregation for cuisine-atlas.
//!
//! Given a free-text location, this crate queries four independent data
//! sources at once, keeps whatever succeeds, collapses near-duplicate
//! records and ranks what is left. It is a library; the HTTP surface lives
//! in the host crate.
//!
//! ## Design
//!
//! - One bundled local dataset plus three JSON relays (Yelp, Google Maps, Apify)
//! - All four providers are queried concurrently and always awaited in full
//! - A failing or panicking provider contributes nothing and is reported
//!   through [`SourceStatus`]; it never fails the aggregation
//! - Dedup uses a coarse normalised name + address-prefix key, see
//!   [`orchestrator::dedup`]
//! - Sorting by rating, distance or an additive relevance score, see
//!   [`orchestrator::scoring`]
//! - Results are request scoped; nothing is cached

pub mod config;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod provider;
pub mod providers;
pub mod types;

pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use orchestrator::Aggregator;
pub use provider::RestaurantProvider;
pub use types::{
    AggregateResult, Restaurant, RestaurantSource, SearchOptions, SortBy, SourceStatus,
};

/// Aggregate restaurants for `location` from the default providers.
///
/// Builds an [`Aggregator`] from `config` (bundled dataset plus the three
/// relays) and runs one aggregation. Hosts serving many requests should
/// build the aggregator once and call
/// [`Aggregator::fetch_all_restaurants`] directly.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` is invalid. Provider
/// failures are reported through [`AggregateResult::sources`], not as
/// errors.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> restaurant_search::Result<()> {
/// let config = restaurant_search::SearchConfig::default();
/// let options = restaurant_search::SearchOptions::default();
/// let result = restaurant_search::fetch_all_restaurants("Washington, DC", &options, &config).await?;
/// for restaurant in &result.restaurants {
///     println!("{} ({:?})", restaurant.name, restaurant.source);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn fetch_all_restaurants(
    location: &str,
    options: &SearchOptions,
    config: &SearchConfig,
) -> Result<AggregateResult> {
    Aggregator::from_config(config)?
        .fetch_all_restaurants(location, options)
        .await
}

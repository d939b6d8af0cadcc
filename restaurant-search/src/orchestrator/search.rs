//! Core aggregator: concurrent four-provider fan-out, dedup, sort, truncate.
//!
//! Queries every provider concurrently, absorbs per-provider failures into
//! the `sources` flags, merges in fan-out order, deduplicates by fuzzy
//! name/address key, sorts by the requested mode and truncates.

use std::sync::Arc;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::provider::RestaurantProvider;
use crate::providers::{LocalProvider, RelayProvider};
use crate::types::{AggregateResult, Restaurant, RestaurantSource, SearchOptions, SourceStatus};

use super::dedup::deduplicate;
use super::scoring::sort_restaurants;

/// Fans a location query out to four providers and merges the results.
///
/// Providers are always invoked in the order local, Yelp, Google Maps,
/// Apify; that order is also the merge order and therefore the tie-break
/// for dedup and sorting. The aggregator keeps no state between calls and
/// caches nothing.
#[derive(Clone)]
pub struct Aggregator {
    providers: [Arc<dyn RestaurantProvider>; 4],
}

impl std::fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sources: Vec<RestaurantSource> = self.providers.iter().map(|p| p.source()).collect();
        f.debug_struct("Aggregator")
            .field("providers", &sources)
            .finish()
    }
}

impl Aggregator {
    /// Create an aggregator over explicit providers.
    ///
    /// The `sources` flag each provider reports into is taken from its
    /// position here, not from [`RestaurantProvider::source`].
    pub fn new(
        local: Arc<dyn RestaurantProvider>,
        yelp: Arc<dyn RestaurantProvider>,
        google_maps: Arc<dyn RestaurantProvider>,
        apify: Arc<dyn RestaurantProvider>,
    ) -> Self {
        Self {
            providers: [local, yelp, google_maps, apify],
        }
    }

    /// Create an aggregator over the bundled dataset and the three relays
    /// described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` is invalid, or any error
    /// raised while building a provider.
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self::new(
            Arc::new(LocalProvider::bundled()?),
            Arc::new(RelayProvider::yelp(config)?),
            Arc::new(RelayProvider::google_maps(config)?),
            Arc::new(RelayProvider::apify(config)?),
        ))
    }

    /// Aggregate restaurants for `location`.
    ///
    /// # Pipeline
    ///
    /// 1. Spawn one task per provider; each task is its own error boundary
    /// 2. Wait for all four to settle with [`futures::future::join_all`]
    /// 3. Flag in [`SourceStatus`] each provider that contributed at least
    ///    one record; failures, panics and empty answers are all `false`
    /// 4. Concatenate in fan-out order
    /// 5. Deduplicate by fuzzy name/address key
    /// 6. Sort by `options.sort_by`
    /// 7. Truncate to `options.limit`, reporting the pre-truncation count
    ///
    /// There is no aggregator-level timeout or cancellation; a hung
    /// provider is bounded only by its own HTTP client timeout.
    ///
    /// # Errors
    ///
    /// Provider failures never surface here. Only a failure in the merge,
    /// dedup or sort stages is returned, as [`SearchError::Aggregation`].
    pub async fn fetch_all_restaurants(
        &self,
        location: &str,
        options: &SearchOptions,
    ) -> Result<AggregateResult, SearchError> {
        tracing::trace!(location, cuisine = %options.cuisine, "aggregating restaurants");

        // 1. Fan out to all providers concurrently.
        let handles: Vec<_> = self
            .providers
            .iter()
            .map(|provider| {
                let provider = Arc::clone(provider);
                let location = location.to_owned();
                let options = options.clone();
                tokio::spawn(async move { provider.fetch(&location, &options).await })
            })
            .collect();

        let outcomes = futures::future::join_all(handles).await;

        // 2. Collect in fan-out order, absorbing failures.
        let mut sources = SourceStatus::default();
        let mut collected: Vec<Restaurant> = Vec::new();

        for (&slot, outcome) in RestaurantSource::all().iter().zip(outcomes) {
            match outcome {
                Ok(Ok(restaurants)) => {
                    tracing::debug!(source = %slot, count = restaurants.len(), "provider returned restaurants");
                    // An empty answer counts as no contribution.
                    sources.set(slot, !restaurants.is_empty());
                    collected.extend(restaurants);
                }
                Ok(Err(err)) => {
                    tracing::warn!(source = %slot, error = %err, "provider query failed");
                }
                Err(join_err) => {
                    tracing::warn!(source = %slot, error = %join_err, "provider task aborted");
                }
            }
        }

        // 3. Dedup, sort and truncate. A panic here surfaces as an
        //    aggregation error instead of tearing down the caller.
        let sort_by = options.sort_by;
        let limit = options.limit;
        let collected_count = collected.len();
        let (restaurants, total_count) = tokio::task::spawn_blocking(move || {
            let mut unique = deduplicate(collected);
            sort_restaurants(&mut unique, sort_by);
            let total = unique.len();
            unique.truncate(limit);
            (unique, total)
        })
        .await
        .map_err(|e| SearchError::Aggregation(format!("merge stage failed: {e}")))?;

        tracing::info!(
            collected = collected_count,
            unique = total_count,
            returned = restaurants.len(),
            providers_ok = sources.succeeded(),
            ?sort_by,
            "restaurant aggregation complete"
        );

        Ok(AggregateResult {
            restaurants,
            sources,
            total_count,
        })
    }
}

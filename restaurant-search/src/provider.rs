//! Trait definition for pluggable restaurant data providers.
//!
//! Each data source (local dataset, Yelp relay, Google Maps relay, Apify
//! relay) implements [`RestaurantProvider`] so the aggregator can invoke
//! and collect from all of them without source-specific knowledge.

use async_trait::async_trait;

use crate::error::SearchError;
use crate::types::{Restaurant, RestaurantSource, SearchOptions};

/// A pluggable restaurant data source.
///
/// Implementors must:
///
/// - tag every returned record with [`RestaurantProvider::source`]
/// - keep no state shared with other providers
/// - report failures as `Err`; the aggregator absorbs them
///
/// All implementations must be `Send + Sync` so they can be fanned out
/// across tasks. The trait is object safe; the aggregator holds
/// providers as `Arc<dyn RestaurantProvider>`.
#[async_trait]
pub trait RestaurantProvider: Send + Sync {
    /// Fetch restaurants for a location.
    ///
    /// # Arguments
    ///
    /// * `location`: Free-text location query; not validated.
    /// * `options`: Request options; `cuisine` is a filter hint.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the source cannot be reached or its
    /// response cannot be decoded.
    async fn fetch(
        &self,
        location: &str,
        options: &SearchOptions,
    ) -> Result<Vec<Restaurant>, SearchError>;

    /// Returns which [`RestaurantSource`] this provider represents.
    fn source(&self) -> RestaurantSource;
}

/// Stamp `source` onto every record.
pub fn tag_source(mut restaurants: Vec<Restaurant>, source: RestaurantSource) -> Vec<Restaurant> {
    for restaurant in &mut restaurants {
        restaurant.source = Some(source);
    }
    restaurants
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A mock provider for testing trait bounds and async execution.
    struct MockProvider {
        source: RestaurantSource,
        results: Vec<Restaurant>,
    }

    impl MockProvider {
        fn new(source: RestaurantSource, results: Vec<Restaurant>) -> Self {
            Self { source, results }
        }

        fn failing(source: RestaurantSource) -> Self {
            Self {
                source,
                results: vec![],
            }
        }
    }

    #[async_trait]
    impl RestaurantProvider for MockProvider {
        async fn fetch(
            &self,
            _location: &str,
            _options: &SearchOptions,
        ) -> Result<Vec<Restaurant>, SearchError> {
            if self.results.is_empty() {
                return Err(SearchError::Provider("mock provider failure".into()));
            }
            Ok(tag_source(self.results.clone(), self.source))
        }

        fn source(&self) -> RestaurantSource {
            self.source
        }
    }

    #[test]
    fn mock_provider_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MockProvider>();
    }

    #[test]
    fn trait_is_object_safe() {
        let provider: Box<dyn RestaurantProvider> =
            Box::new(MockProvider::new(RestaurantSource::Yelp, vec![]));
        assert_eq!(provider.source(), RestaurantSource::Yelp);
    }

    #[tokio::test]
    async fn mock_provider_tags_results() {
        let provider = MockProvider::new(
            RestaurantSource::Apify,
            vec![Restaurant::named("Bukka Hut")],
        );
        let results = provider
            .fetch("Lagos", &SearchOptions::default())
            .await
            .expect("should succeed");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].source, Some(RestaurantSource::Apify));
    }

    #[tokio::test]
    async fn mock_provider_propagates_errors() {
        let provider = MockProvider::failing(RestaurantSource::Google);
        let result = provider.fetch("Accra", &SearchOptions::default()).await;
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("mock provider failure"));
    }

    #[test]
    fn tag_source_overwrites_existing_label() {
        let mut r = Restaurant::named("Kilimanjaro");
        r.source = Some(RestaurantSource::Local);
        let tagged = tag_source(vec![r], RestaurantSource::Yelp);
        assert_eq!(tagged[0].source, Some(RestaurantSource::Yelp));
    }
}

//! HTTP relay providers for Yelp, Google Maps and Apify.
//!
//! All three remote sources are reached through the host's own relay
//! endpoints, which share one contract: `GET {path}?location=..&cuisine=..`
//! answering `{ "restaurants": [...] }`. One [`RelayProvider`] type covers
//! them; the source label and path are all that differ.

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::provider::{tag_source, RestaurantProvider};
use crate::types::{Restaurant, RestaurantSource, SearchOptions};

/// Body shape shared by every relay endpoint.
///
/// Records stay as raw JSON so one malformed entry cannot sink the rest.
#[derive(Debug, Deserialize)]
struct RelayResponse {
    #[serde(default)]
    restaurants: Vec<serde_json::Value>,
}

/// A provider backed by one relay endpoint.
#[derive(Debug, Clone)]
pub struct RelayProvider {
    source: RestaurantSource,
    endpoint: Url,
    client: reqwest::Client,
}

impl RelayProvider {
    /// Create a relay provider for `source` at the relay origin + `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the relay origin or endpoint URL
    /// is invalid, or [`SearchError::Http`] if the HTTP client cannot be
    /// built.
    pub fn new(
        source: RestaurantSource,
        path: &str,
        config: &SearchConfig,
    ) -> Result<Self, SearchError> {
        let endpoint = config
            .relay_origin()?
            .join(path)
            .map_err(|e| SearchError::Config(format!("invalid {source} relay endpoint: {e}")))?;
        let client = http::build_client(config)?;
        Ok(Self {
            source,
            endpoint,
            client,
        })
    }

    /// Yelp scrape relay.
    ///
    /// # Errors
    ///
    /// See [`RelayProvider::new`].
    pub fn yelp(config: &SearchConfig) -> Result<Self, SearchError> {
        Self::new(RestaurantSource::Yelp, &config.yelp_path, config)
    }

    /// Google Maps places relay.
    ///
    /// # Errors
    ///
    /// See [`RelayProvider::new`].
    pub fn google_maps(config: &SearchConfig) -> Result<Self, SearchError> {
        Self::new(RestaurantSource::Google, &config.google_maps_path, config)
    }

    /// Apify scraping-actor relay.
    ///
    /// # Errors
    ///
    /// See [`RelayProvider::new`].
    pub fn apify(config: &SearchConfig) -> Result<Self, SearchError> {
        Self::new(RestaurantSource::Apify, &config.apify_path, config)
    }

    /// The endpoint this provider queries, without query string.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn request_url(&self, location: &str, cuisine: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("location", location)
            .append_pair("cuisine", cuisine);
        url
    }
}

#[async_trait]
impl RestaurantProvider for RelayProvider {
    async fn fetch(
        &self,
        location: &str,
        options: &SearchOptions,
    ) -> Result<Vec<Restaurant>, SearchError> {
        let source = self.source;
        let url = self.request_url(location, &options.cuisine);
        tracing::trace!(%source, %url, "relay request");

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("{source} relay request failed: {e}")))?
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("{source} relay HTTP error: {e}")))?;

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Http(format!("{source} relay response read failed: {e}")))?;

        tracing::trace!(%source, bytes = body.len(), "relay response received");

        parse_relay_body(&body, source)
    }

    fn source(&self) -> RestaurantSource {
        self.source
    }
}

/// Decode a relay body and tag its records.
///
/// A body that is not a relay envelope is a [`SearchError::Parse`]. Inside
/// a valid envelope, records that do not decode (e.g. no `name`) are
/// skipped with a warning.
///
/// Extracted as a separate function for testability with canned JSON.
pub(crate) fn parse_relay_body(
    body: &str,
    source: RestaurantSource,
) -> Result<Vec<Restaurant>, SearchError> {
    let parsed: RelayResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("{source} relay body is malformed: {e}")))?;

    let restaurants: Vec<Restaurant> = parsed
        .restaurants
        .into_iter()
        .enumerate()
        .filter_map(
            |(index, raw)| match serde_json::from_value::<Restaurant>(raw) {
                Ok(restaurant) => Some(restaurant),
                Err(e) => {
                    tracing::warn!(%source, index, error = %e, "skipping malformed relay record");
                    None
                }
            },
        )
        .collect();

    Ok(tag_source(restaurants, source))
}

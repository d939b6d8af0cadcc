//! Local provider backed by the bundled restaurant dataset.
//!
//! The dataset is compiled into the crate, so this provider never touches
//! the network. It is the only source whose records carry an `id`.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::SearchError;
use crate::provider::{tag_source, RestaurantProvider};
use crate::types::{Restaurant, RestaurantSource, SearchOptions};

/// The bundled dataset, as JSON.
const BUNDLED_DATASET: &str = include_str!("../../data/restaurants.json");

/// One dataset entry: a restaurant plus the cuisine tags it answers to.
#[derive(Debug, Clone, Deserialize)]
struct LocalRecord {
    #[serde(flatten)]
    restaurant: Restaurant,
    /// Broader cuisine labels, e.g. `["African", "West African"]`.
    #[serde(default)]
    tags: Vec<String>,
}

impl LocalRecord {
    fn matches_location(&self, location: &str) -> bool {
        if location.is_empty() {
            return true;
        }
        [&self.restaurant.address, &self.restaurant.country]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(location))
    }

    fn matches_cuisine(&self, cuisine: &str) -> bool {
        if cuisine.is_empty() {
            return true;
        }
        let by_type = self
            .restaurant
            .cuisine_type
            .as_deref()
            .is_some_and(|t| t.to_lowercase().contains(cuisine));
        by_type || self.tags.iter().any(|tag| tag.to_lowercase() == cuisine)
    }
}

/// Lookup over the bundled restaurant dataset.
///
/// A record matches when its address or country contains the location
/// and its cuisine type contains the cuisine (or one of its tags equals
/// it). Both comparisons are case-insensitive; an empty location or
/// cuisine matches everything.
#[derive(Debug, Clone)]
pub struct LocalProvider {
    records: Vec<LocalRecord>,
}

impl LocalProvider {
    /// Load the dataset compiled into the crate.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Parse`] if the bundled JSON is malformed.
    pub fn bundled() -> Result<Self, SearchError> {
        Self::from_json(BUNDLED_DATASET)
    }

    /// Load a dataset from a JSON array of restaurant records.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Parse`] if `json` is not a valid dataset.
    pub fn from_json(json: &str) -> Result<Self, SearchError> {
        let records: Vec<LocalRecord> = serde_json::from_str(json)
            .map_err(|e| SearchError::Parse(format!("local dataset is malformed: {e}")))?;
        Ok(Self { records })
    }

    /// Number of records in the dataset.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RestaurantProvider for LocalProvider {
    async fn fetch(
        &self,
        location: &str,
        options: &SearchOptions,
    ) -> Result<Vec<Restaurant>, SearchError> {
        let location = location.trim().to_lowercase();
        let cuisine = options.cuisine.trim().to_lowercase();

        let matches: Vec<Restaurant> = self
            .records
            .iter()
            .filter(|r| r.matches_location(&location) && r.matches_cuisine(&cuisine))
            .map(|r| r.restaurant.clone())
            .collect();

        tracing::trace!(count = matches.len(), "local dataset lookup");
        Ok(tag_source(matches, RestaurantSource::Local))
    }

    fn source(&self) -> RestaurantSource {
        RestaurantSource::Local
    }
}

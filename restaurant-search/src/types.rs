//! Core types: restaurant records, provider identity, request options and
//! the aggregate response shape.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Cuisine hint passed to providers when the caller does not supply one.
pub const DEFAULT_CUISINE: &str = "African";

/// Result limit applied when the caller does not supply one.
pub const DEFAULT_LIMIT: usize = 50;

/// A single restaurant record as produced by a provider.
///
/// Numeric-looking fields (`rating`, `review_count`, `distance`) are kept
/// as provider-supplied text and parsed only when scoring or sorting.
/// Relay JSON may carry them as numbers; they are normalised to strings
/// on the way in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    /// Display name. Part of the dedup key.
    pub name: String,
    /// Free-text postal address. Its normalised prefix completes the dedup key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Average rating as a decimal string, e.g. `"4.5"`.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<String>,
    /// Review count as an integer string, e.g. `"212"`.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub review_count: Option<String>,
    /// Distance from the searched location, e.g. `"1.2 mi"`.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub distance: Option<String>,
    /// Which provider produced this record. Set by the provider adapter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<RestaurantSource>,
    /// Identifier in the local store; absent for remote records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl Restaurant {
    /// Create a record with only a name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Number of populated fields, unweighted.
    ///
    /// A string field counts when present and non-empty; `source` and `id`
    /// count when present. Used to pick the richer of two duplicates.
    pub fn populated_field_count(&self) -> usize {
        let text_fields = [
            Some(self.name.as_str()),
            self.address.as_deref(),
            self.description.as_deref(),
            self.cuisine_type.as_deref(),
            self.country.as_deref(),
            self.phone_number.as_deref(),
            self.website.as_deref(),
            self.image_url.as_deref(),
            self.rating.as_deref(),
            self.review_count.as_deref(),
            self.distance.as_deref(),
        ];
        let text = text_fields
            .iter()
            .filter(|field| field.is_some_and(|s| !s.is_empty()))
            .count();
        text + usize::from(self.source.is_some()) + usize::from(self.id.is_some())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Number(serde_json::Number),
}

/// Accept either a JSON string or a JSON number, storing it as text.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        StringOrNumber::Text(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    }))
}

/// The data sources the aggregator queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestaurantSource {
    /// Bundled local dataset. Records carry ids.
    Local,
    /// Yelp scrape relay.
    Yelp,
    /// Google Maps places relay.
    Google,
    /// Apify scraping-actor relay.
    Apify,
}

impl RestaurantSource {
    /// Returns the wire label of this source.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Yelp => "yelp",
            Self::Google => "google",
            Self::Apify => "apify",
        }
    }

    /// All sources in fan-out order.
    pub fn all() -> &'static [RestaurantSource] {
        &[Self::Local, Self::Yelp, Self::Google, Self::Apify]
    }
}

impl fmt::Display for RestaurantSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordering applied to the deduplicated result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Highest rating first.
    #[default]
    Rating,
    /// Nearest first; records without a distance go last.
    Distance,
    /// Highest completeness + quality score first.
    Relevance,
}

impl SortBy {
    /// Parse a sort mode, falling back to [`SortBy::Relevance`] for
    /// anything unrecognised.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "rating" => Self::Rating,
            "distance" => Self::Distance,
            _ => Self::Relevance,
        }
    }
}

/// Per-request options for an aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Cuisine hint forwarded to providers. Not enforced by the aggregator.
    pub cuisine: String,
    pub sort_by: SortBy,
    /// Maximum number of records returned.
    pub limit: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            cuisine: DEFAULT_CUISINE.to_owned(),
            sort_by: SortBy::default(),
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Which providers contributed at least one record during one aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceStatus {
    pub local: bool,
    pub yelp: bool,
    pub google_maps: bool,
    pub apify: bool,
}

impl SourceStatus {
    /// Record the outcome for one provider.
    pub fn set(&mut self, source: RestaurantSource, ok: bool) {
        match source {
            RestaurantSource::Local => self.local = ok,
            RestaurantSource::Yelp => self.yelp = ok,
            RestaurantSource::Google => self.google_maps = ok,
            RestaurantSource::Apify => self.apify = ok,
        }
    }

    /// Returns the recorded outcome for one provider.
    pub fn get(&self, source: RestaurantSource) -> bool {
        match source {
            RestaurantSource::Local => self.local,
            RestaurantSource::Yelp => self.yelp,
            RestaurantSource::Google => self.google_maps,
            RestaurantSource::Apify => self.apify,
        }
    }

    /// Number of providers that contributed records.
    pub fn succeeded(&self) -> usize {
        RestaurantSource::all()
            .iter()
            .filter(|s| self.get(**s))
            .count()
    }
}

/// The aggregator's response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    /// Sorted, deduplicated records truncated to the requested limit.
    pub restaurants: Vec<Restaurant>,
    pub sources: SourceStatus,
    /// Deduplicated count before truncation.
    pub total_count: usize,
}

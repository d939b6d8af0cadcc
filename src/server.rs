//! HTTP surface: the restaurant search endpoint and a health probe.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use restaurant_search::types::{DEFAULT_CUISINE, DEFAULT_LIMIT};
use restaurant_search::{Aggregator, SearchOptions, SortBy};

use crate::config::HostConfig;
use crate::error::HostError;

#[derive(Clone)]
struct AppState {
    aggregator: Arc<Aggregator>,
}

/// Query string accepted by `GET /api/restaurants/search`.
///
/// Nothing is validated here: a missing location is searched as the empty
/// string and an unknown `sortBy` ranks by relevance.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchQuery {
    #[serde(default)]
    location: String,
    cuisine: Option<String>,
    sort_by: Option<String>,
    limit: Option<usize>,
}

impl SearchQuery {
    fn into_options(self) -> (String, SearchOptions) {
        let options = SearchOptions {
            cuisine: self.cuisine.unwrap_or_else(|| DEFAULT_CUISINE.to_owned()),
            sort_by: self
                .sort_by
                .as_deref()
                .map_or(SortBy::default(), SortBy::parse),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
        };
        (self.location, options)
    }
}

/// Build the router over a ready aggregator.
pub fn router(aggregator: Arc<Aggregator>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/restaurants/search", get(search_restaurants))
        .with_state(AppState { aggregator })
}

/// Bind to the configured address and serve until the listener fails.
///
/// # Errors
///
/// Returns [`HostError::Config`] or [`HostError::Search`] if the config is
/// rejected or the aggregator cannot be built, or [`HostError::Server`] if
/// binding or serving fails.
pub async fn run_server(config: HostConfig) -> crate::error::Result<()> {
    config.validate()?;
    let aggregator = Arc::new(Aggregator::from_config(&config.search)?);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| HostError::Server(format!("failed to bind {addr}: {e}")))?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        relay = %config.search.relay_base_url,
        "restaurant search listening on http://{local_addr}"
    );
    axum::serve(listener, router(aggregator))
        .await
        .map_err(|e| HostError::Server(e.to_string()))
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok"
    }))
}

async fn search_restaurants(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let (location, options) = query.into_options();

    match state
        .aggregator
        .fetch_all_restaurants(&location, &options)
        .await
    {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "restaurant search failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": err.to_string()})),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_uses_defaults() {
        let (location, options) = SearchQuery::default().into_options();
        assert_eq!(location, "");
        assert_eq!(options, SearchOptions::default());
    }

    #[test]
    fn query_overrides_are_applied() {
        let query = SearchQuery {
            location: "Accra".into(),
            cuisine: Some("Ghanaian".into()),
            sort_by: Some("distance".into()),
            limit: Some(5),
        };
        let (location, options) = query.into_options();
        assert_eq!(location, "Accra");
        assert_eq!(options.cuisine, "Ghanaian");
        assert_eq!(options.sort_by, SortBy::Distance);
        assert_eq!(options.limit, 5);
    }

    #[test]
    fn unknown_sort_by_means_relevance() {
        let query = SearchQuery {
            sort_by: Some("newest".into()),
            ..Default::default()
        };
        assert_eq!(query.into_options().1.sort_by, SortBy::Relevance);
    }
}

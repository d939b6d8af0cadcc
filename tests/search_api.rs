//! End-to-end tests for the search HTTP API.
//!
//! Each test starts the real router on an ephemeral port with the relay
//! providers pointed at a wiremock server, then talks to it over HTTP.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::net::SocketAddr;
use std::sync::Arc;

use cuisine_atlas::server::router;
use restaurant_search::{Aggregator, SearchConfig};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn start_host(relays: &MockServer) -> SocketAddr {
    let config = SearchConfig {
        relay_base_url: relays.uri(),
        timeout_seconds: 5,
        ..Default::default()
    };
    let aggregator = Arc::new(Aggregator::from_config(&config).unwrap());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(aggregator)).await.unwrap();
    });
    addr
}

async fn mount_relay(server: &MockServer, relay_path: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(relay_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn get_json(url: String) -> (u16, Value) {
    let response = reqwest::get(url).await.unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn health_reports_ok() {
    let relays = MockServer::start().await;
    let addr = start_host(&relays).await;

    let (status, body) = get_json(format!("http://{addr}/health")).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn search_merges_sources_and_reports_flags() {
    let relays = MockServer::start().await;
    mount_relay(
        &relays,
        "/api/yelp/restaurants",
        json!({"restaurants": [
            {"name": "Dukem", "address": "1114 U St NW", "rating": 4.3, "reviewCount": 410}
        ]}),
    )
    .await;
    mount_relay(
        &relays,
        "/api/google-places/restaurants",
        json!({"restaurants": [
            {"name": "Lalibela Cafe", "address": "1415 U St NW, Washington", "rating": "4.2"}
        ]}),
    )
    .await;
    // Apify relay is not mounted: wiremock answers 404.
    let addr = start_host(&relays).await;

    let (status, body) = get_json(format!(
        "http://{addr}/api/restaurants/search?location=Washington&sortBy=rating"
    ))
    .await;
    assert_eq!(status, 200);
    assert_eq!(
        body["sources"],
        json!({"local": true, "yelp": true, "googleMaps": true, "apify": false})
    );
    // Abyssinia + Lalibela (local) + Dukem; Google's Lalibela is a duplicate.
    assert_eq!(body["totalCount"], 3);

    let restaurants = body["restaurants"].as_array().unwrap();
    let names: Vec<&str> = restaurants
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Abyssinia Kitchen", "Dukem", "Lalibela Cafe"]);
    assert_eq!(restaurants[1]["source"], "yelp");
    assert_eq!(restaurants[1]["reviewCount"], "410");
    assert_eq!(restaurants[2]["source"], "local");
}

#[tokio::test]
async fn search_forwards_cuisine_and_applies_limit() {
    let relays = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/yelp/restaurants"))
        .and(query_param("location", "Minneapolis"))
        .and(query_param("cuisine", "East African"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"restaurants": [
            {"name": "Safari Restaurant", "address": "3010 4th Ave S", "rating": "4.9"}
        ]})))
        .expect(1)
        .mount(&relays)
        .await;
    let addr = start_host(&relays).await;

    let (status, body) = get_json(format!(
        "http://{addr}/api/restaurants/search?location=Minneapolis&cuisine=East%20African&limit=1"
    ))
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["totalCount"], 3);
    assert_eq!(body["restaurants"].as_array().unwrap().len(), 1);
    assert_eq!(body["restaurants"][0]["name"], "Safari Restaurant");
}

#[tokio::test]
async fn unknown_sort_by_ranks_by_relevance() {
    let relays = MockServer::start().await;
    mount_relay(
        &relays,
        "/api/apify/restaurants",
        json!({"restaurants": [
            // Higher rating but nearly empty: loses on relevance.
            {"name": "Pop-up Stall", "rating": "5.0"}
        ]}),
    )
    .await;
    let addr = start_host(&relays).await;

    let (_, by_rating) = get_json(format!(
        "http://{addr}/api/restaurants/search?location=Washington&sortBy=rating"
    ))
    .await;
    assert_eq!(by_rating["restaurants"][0]["name"], "Pop-up Stall");

    let (status, fallback) = get_json(format!(
        "http://{addr}/api/restaurants/search?location=Washington&sortBy=newest"
    ))
    .await;
    assert_eq!(status, 200);
    assert_eq!(fallback["restaurants"][0]["name"], "Abyssinia Kitchen");
}

#[tokio::test]
async fn all_relays_down_and_no_local_match_is_empty_success() {
    let relays = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&relays)
        .await;
    let addr = start_host(&relays).await;

    let (status, body) = get_json(format!(
        "http://{addr}/api/restaurants/search?location=Reykjavik"
    ))
    .await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({
            "restaurants": [],
            "sources": {"local": false, "yelp": false, "googleMaps": false, "apify": false},
            "totalCount": 0
        })
    );
}

//! Aggregation orchestrator: concurrent fan-out, dedup, scoring, ranking.
//!
//! This module fans a location query out to the four restaurant
//! providers, deduplicates the merged records by fuzzy name/address key,
//! sorts them by rating, distance or relevance, and truncates to the
//! requested limit.

pub mod dedup;
pub mod scoring;
pub mod search;

pub use search::Aggregator;

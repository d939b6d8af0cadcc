//! Restaurant deduplication by fuzzy name/address key.
//!
//! Two records are treated as the same restaurant when their normalised
//! names match and the first ten normalised characters of their addresses
//! match. This is a heuristic, not identity resolution:
//!
//! - false positives: distinct restaurants with the same name whose
//!   addresses share a ten-character prefix collapse into one
//!   (`"12 Main Street North"` and `"12 Main Street South"` both key on
//!   `12mainstre`)
//! - false negatives: the same restaurant spelled differently by two
//!   providers (`"Cafe Africa"` vs `"Café Africa"`) stays duplicated
//!
//! Callers that need exact dedup should not rely on this key.

use std::collections::HashMap;

use crate::types::Restaurant;

/// Number of normalised address characters that take part in the key.
pub const ADDRESS_PREFIX_LEN: usize = 10;

/// Lowercase `raw` and drop everything outside `[a-z0-9]`.
///
/// Non-ASCII letters are dropped rather than folded, so `"Café"`
/// normalises to `"caf"`.
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Build the dedup key for a record:
/// `normalize(name) + "-" + first 10 chars of normalize(address)`.
///
/// # Examples
///
/// ```
/// use restaurant_search::orchestrator::dedup::dedup_key;
/// use restaurant_search::Restaurant;
///
/// let mut a = Restaurant::named("Cafe Africa");
/// a.address = Some("12 Main Street".into());
/// let mut b = Restaurant::named("Cafe Africa");
/// b.address = Some("12 Main St".into());
/// assert_eq!(dedup_key(&a), "cafeafrica-12mainstre");
/// assert_eq!(dedup_key(&b), "cafeafrica-12mainst");
/// ```
pub fn dedup_key(restaurant: &Restaurant) -> String {
    let name = normalize(&restaurant.name);
    let address = restaurant
        .address
        .as_deref()
        .map(normalize)
        .unwrap_or_default();
    let prefix: String = address.chars().take(ADDRESS_PREFIX_LEN).collect();
    format!("{name}-{prefix}")
}

/// Collapse records sharing a dedup key.
///
/// Walks `restaurants` in order. The first record for a key claims that
/// key's slot in the output; a later record with the same key replaces
/// the kept one only if it has strictly more populated fields. Ties keep
/// the earlier record. Output order is first-seen key order, so the
/// function is idempotent.
pub fn deduplicate(restaurants: Vec<Restaurant>) -> Vec<Restaurant> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut kept: Vec<Restaurant> = Vec::with_capacity(restaurants.len());

    for restaurant in restaurants {
        let key = dedup_key(&restaurant);
        match slots.get(&key) {
            Some(&slot) => {
                if restaurant.populated_field_count() > kept[slot].populated_field_count() {
                    tracing::trace!(key, "duplicate replaced by richer record");
                    kept[slot] = restaurant;
                }
            }
            None => {
                slots.insert(key, kept.len());
                kept.push(restaurant);
            }
        }
    }

    kept
}

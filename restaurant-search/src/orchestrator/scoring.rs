//! Scoring and ordering of deduplicated restaurants.
//!
//! Three orderings are supported:
//! - `Rating`: descending by parsed rating; records without a usable
//!   rating go after every rated record, including those rated 0
//! - `Distance`: ascending by the numeric part of `distance`
//!   (absent or unparsable ⇒ last)
//! - `Relevance`: descending by [`relevance_score`]
//!
//! Every ordering uses a stable sort, so ties keep collection order.

use std::cmp::Ordering;

use crate::types::{Restaurant, SortBy};

/// Parse the longest leading decimal number in `raw`, after leading
/// whitespace. `"4.5 stars"` ⇒ `4.5`, `"n/a"` ⇒ `None`.
fn leading_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let int_digits = end - digits_start;
    let mut frac_digits = 0;
    if end < bytes.len() && bytes[end] == b'.' {
        let dot = end;
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            frac_digits += 1;
        }
        if frac_digits == 0 {
            end = dot;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }
    s[..end].parse().ok()
}

/// Numeric rating, or `None` when absent or unparsable.
pub fn parsed_rating(restaurant: &Restaurant) -> Option<f64> {
    restaurant
        .rating
        .as_deref()
        .and_then(leading_number)
        .filter(|v| v.is_finite())
}

/// Numeric rating, or `0.0` when absent or unparsable.
pub fn rating_value(restaurant: &Restaurant) -> f64 {
    parsed_rating(restaurant).unwrap_or(0.0)
}

/// Review count truncated to an integer, or `0` when absent or unparsable.
pub fn review_count_value(restaurant: &Restaurant) -> u64 {
    restaurant
        .review_count
        .as_deref()
        .and_then(leading_number)
        .filter(|v| v.is_finite() && *v > 0.0)
        .map_or(0, |v| v.trunc() as u64)
}

/// Distance with every character except digits and `.` stripped, or
/// `f64::MAX` when nothing numeric remains.
pub fn distance_value(restaurant: &Restaurant) -> f64 {
    restaurant
        .distance
        .as_deref()
        .and_then(|raw| {
            let digits: String = raw
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            leading_number(&digits)
        })
        .unwrap_or(f64::MAX)
}

fn filled(field: Option<&str>) -> bool {
    field.is_some_and(|s| !s.is_empty())
}

/// Completeness + quality score used by [`SortBy::Relevance`].
///
/// # Scoring Formula
///
/// ```text
/// +1 each: name, address, phoneNumber, website
/// +2 each: description, cuisineType, country, imageUrl
/// +3     : rating present
/// rating tier : >= 4.5 → +5, >= 4.0 → +3, >= 3.5 → +1
/// review tier : >= 200 → +4, >= 100 → +2, >= 50  → +1
/// ```
///
/// A fully populated record rated 5.0 with 500 reviews scores 24.
pub fn relevance_score(restaurant: &Restaurant) -> u32 {
    let mut score = 0;

    if !restaurant.name.is_empty() {
        score += 1;
    }
    for field in [
        restaurant.address.as_deref(),
        restaurant.phone_number.as_deref(),
        restaurant.website.as_deref(),
    ] {
        if filled(field) {
            score += 1;
        }
    }
    for field in [
        restaurant.description.as_deref(),
        restaurant.cuisine_type.as_deref(),
        restaurant.country.as_deref(),
        restaurant.image_url.as_deref(),
    ] {
        if filled(field) {
            score += 2;
        }
    }
    if filled(restaurant.rating.as_deref()) {
        score += 3;
    }

    let rating = rating_value(restaurant);
    score += if rating >= 4.5 {
        5
    } else if rating >= 4.0 {
        3
    } else if rating >= 3.5 {
        1
    } else {
        0
    };

    let reviews = review_count_value(restaurant);
    score += if reviews >= 200 {
        4
    } else if reviews >= 100 {
        2
    } else if reviews >= 50 {
        1
    } else {
        0
    };

    score
}

/// Sort restaurants in place according to `sort_by`.
pub fn sort_restaurants(restaurants: &mut [Restaurant], sort_by: SortBy) {
    match sort_by {
        // `None` orders below every `Some`, so unrated records trail.
        SortBy::Rating => restaurants.sort_by(|a, b| {
            parsed_rating(b)
                .partial_cmp(&parsed_rating(a))
                .unwrap_or(Ordering::Equal)
        }),
        SortBy::Distance => restaurants.sort_by(|a, b| {
            distance_value(a)
                .partial_cmp(&distance_value(b))
                .unwrap_or(Ordering::Equal)
        }),
        SortBy::Relevance => {
            restaurants.sort_by_key(|r| std::cmp::Reverse(relevance_score(r)));
        }
    }
}

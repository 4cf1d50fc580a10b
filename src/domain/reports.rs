//! Read-time aggregate reports over store listings.
//!
//! Storage groups the raw rows (tags unwound per store, reviews joined per
//! store); the ranking rules live here so they are identical whichever
//! repository produced the rows.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Minimum number of reviews a store needs to appear in the top-rated report.
pub const MIN_REVIEWS_FOR_RANKING: i64 = 2;

/// Default size of the top-rated report.
pub const DEFAULT_TOP_LIMIT: usize = 10;

/// How many listings carry a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: i64,
}

/// Review aggregate for one store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub store_id: i64,
    pub name: String,
    pub slug: String,
    pub photo: Option<String>,
    pub review_count: i64,
    pub average_rating: f64,
}

/// Orders tag counts by count descending, then tag ascending.
pub fn rank_tags(mut counts: Vec<TagCount>) -> Vec<TagCount> {
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
    counts
}

/// Keeps stores with at least [`MIN_REVIEWS_FOR_RANKING`] reviews and returns
/// the `limit` best by mean rating.
///
/// Ties on the mean go to the store with more reviews, then by name.
pub fn rank_top_rated(summaries: Vec<RatingSummary>, limit: usize) -> Vec<RatingSummary> {
    let mut ranked: Vec<RatingSummary> = summaries
        .into_iter()
        .filter(|s| s.review_count >= MIN_REVIEWS_FOR_RANKING)
        .collect();

    ranked.sort_by(|a, b| {
        b.average_rating
            .partial_cmp(&a.average_rating)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.review_count.cmp(&a.review_count))
            .then_with(|| a.name.cmp(&b.name))
    });
    ranked.truncate(limit);
    ranked
}

//! Store listing entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::review::Review;

/// Geographic point plus the human-readable address it was geocoded from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub longitude: f64,
    pub latitude: f64,
    pub address: String,
}

/// A store listing.
#[derive(Debug, Clone)]
pub struct Store {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub tags: Vec<String>,
    pub location: Location,
    pub photo: Option<String>,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Input data for inserting a listing. The slug is already resolved.
#[derive(Debug, Clone)]
pub struct NewStore {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub tags: Vec<String>,
    pub location: Location,
    pub photo: Option<String>,
    pub author_id: i64,
}

/// Partial update requested by a caller.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct StorePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub location: Option<Location>,
    pub photo: Option<String>,
}

/// Fully resolved row written back by an update.
#[derive(Debug, Clone)]
pub struct StoreUpdate {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub tags: Vec<String>,
    pub location: Location,
    pub photo: Option<String>,
}

impl Store {
    /// Returns true if applying `patch` would change the store's name.
    pub fn renames(&self, patch: &StorePatch) -> bool {
        patch
            .name
            .as_deref()
            .is_some_and(|name| name.trim() != self.name)
    }

    /// Merges `patch` over the current values, keeping `slug` as given.
    pub fn apply(&self, patch: StorePatch, slug: String) -> StoreUpdate {
        StoreUpdate {
            name: patch
                .name
                .map(|n| n.trim().to_string())
                .unwrap_or_else(|| self.name.clone()),
            slug,
            description: patch
                .description
                .map(|d| d.trim().to_string())
                .unwrap_or_else(|| self.description.clone()),
            tags: patch.tags.unwrap_or_else(|| self.tags.clone()),
            location: patch.location.unwrap_or_else(|| self.location.clone()),
            photo: patch.photo.or_else(|| self.photo.clone()),
        }
    }
}

/// A store with its reviews attached.
#[derive(Debug, Clone)]
pub struct StoreWithReviews {
    pub store: Store,
    pub reviews: Vec<Review>,
}

impl StoreWithReviews {
    /// Mean rating, or `None` for a store nobody has reviewed.
    pub fn average_rating(&self) -> Option<f64> {
        if self.reviews.is_empty() {
            return None;
        }
        let sum: i64 = self.reviews.iter().map(|r| i64::from(r.rating)).sum();
        Some(sum as f64 / self.reviews.len() as f64)
    }
}

/// A listing found by a proximity search.
#[derive(Debug, Clone)]
pub struct NearbyStore {
    pub store: Store,
    /// Great-circle distance from the searched point, in meters.
    pub distance_m: f64,
}

/// Whether an account hearts a listing after a toggle, and how many
/// listings it hearts in total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartState {
    pub store_id: i64,
    pub hearted: bool,
    pub total: i64,
}

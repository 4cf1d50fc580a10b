//! Repository trait for store listings.

use crate::domain::entities::{NearbyStore, NewStore, Store, StoreUpdate};
use crate::domain::reports::{RatingSummary, TagCount};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for store listings.
///
/// Slug uniqueness is backed by a unique index: [`StoreRepository::create`] and
/// [`StoreRepository::update`] report a taken slug as [`AppError::Conflict`]
/// with `details.constraint == "stores_slug_key"`.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgStoreRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_store.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// Inserts a listing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the slug is taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_store: NewStore) -> Result<Store, AppError>;

    /// Overwrites a listing's editable fields.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no listing has `id`.
    /// Returns [`AppError::Conflict`] if the slug is taken.
    async fn update(&self, id: i64, update: StoreUpdate) -> Result<Store, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Store>, AppError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Store>, AppError>;

    /// Returns every slug equal to `base` or `base` followed by `-<digits>`,
    /// compared case-insensitively.
    ///
    /// `exclude_id` leaves one listing out of the result (the listing being renamed).
    async fn find_slugs_matching(
        &self,
        base: &str,
        exclude_id: Option<i64>,
    ) -> Result<Vec<String>, AppError>;

    /// Lists listings, newest first.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Store>, AppError>;

    /// Counts all listings.
    async fn count(&self) -> Result<i64, AppError>;

    /// Lists listings carrying `tag`, newest first.
    async fn list_by_tag(&self, tag: &str) -> Result<Vec<Store>, AppError>;

    /// Case-insensitive substring search over name and description.
    async fn search(&self, query: &str, limit: i64) -> Result<Vec<Store>, AppError>;

    /// Tags unwound across all listings and grouped. Order is unspecified.
    async fn tag_counts(&self) -> Result<Vec<TagCount>, AppError>;

    /// Review count and mean rating for every listing with at least one review.
    /// Order is unspecified.
    async fn rating_summaries(&self) -> Result<Vec<RatingSummary>, AppError>;

    /// Listings within `max_distance_m` meters of the point, nearest first,
    /// at most `limit` of them.
    async fn find_near(
        &self,
        longitude: f64,
        latitude: f64,
        max_distance_m: f64,
        limit: i64,
    ) -> Result<Vec<NearbyStore>, AppError>;

    /// Hearts the listing for the account, or removes the heart if present.
    ///
    /// Returns `true` if the listing is hearted afterwards.
    async fn toggle_heart(&self, account_id: i64, store_id: i64) -> Result<bool, AppError>;

    /// Ids of every listing the account hearts.
    async fn hearted_ids(&self, account_id: i64) -> Result<Vec<i64>, AppError>;

    /// Listings the account hearts, most recently hearted first.
    async fn list_hearted(&self, account_id: i64) -> Result<Vec<Store>, AppError>;
}

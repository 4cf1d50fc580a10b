//! Store listings, reviews and the aggregate reports built from them.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::json;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use crate::domain::entities::{
    Account, HeartState, Location, NearbyStore, NewReview, NewStore, Review, Store, StorePatch,
    StoreWithReviews,
};
use crate::domain::reports::{RatingSummary, TagCount, rank_tags, rank_top_rated};
use crate::domain::repositories::{ReviewRepository, StoreRepository};
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::db_error::{STORE_SLUG_CONSTRAINT, is_unique_violation_on};
use crate::utils::slug::{derive_slug, ensure_unique_slug, nth_suffix};

/// Cache key for the tag report.
pub const TAGS_CACHE_KEY: &str = "reports:tags";

/// Cache key for the top-rated report, stored at [`MAX_TOP_LIMIT`] entries.
pub const TOP_CACHE_KEY: &str = "reports:top";

/// Largest top-rated report a caller can ask for.
pub const MAX_TOP_LIMIT: usize = 50;

/// Results returned by a search.
pub const SEARCH_LIMIT: i64 = 5;

/// Largest page size for listings.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Search radius for nearby listings, in meters.
pub const NEAR_MAX_DISTANCE_M: f64 = 10_000.0;

/// Results returned by a nearby search.
pub const NEAR_LIMIT: i64 = 10;

/// Write attempts before giving up on finding a free slug.
const MAX_SLUG_ATTEMPTS: usize = 10;

/// Fields supplied when creating a listing.
#[derive(Debug, Clone)]
pub struct StoreInput {
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub location: Location,
    pub photo: Option<String>,
}

/// One page of listings.
#[derive(Debug, Clone)]
pub struct StorePage {
    pub stores: Vec<StoreWithReviews>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

impl StorePage {
    /// Number of pages needed for `total` listings; at least 1.
    pub fn page_count(&self) -> i64 {
        ((self.total + self.page_size - 1) / self.page_size).max(1)
    }
}

/// Service for writing listings and reviews and reading the reports over them.
///
/// Slugs are assigned here, before the write reaches storage: the name is
/// slugified, numbered after any listings already using it, and renumbered if
/// the unique index reports a concurrent writer took the same slug.
pub struct StoreService {
    stores: Arc<dyn StoreRepository>,
    reviews: Arc<dyn ReviewRepository>,
    cache: Arc<dyn CacheService>,
}

impl StoreService {
    /// Creates a new store service.
    pub fn new(
        stores: Arc<dyn StoreRepository>,
        reviews: Arc<dyn ReviewRepository>,
        cache: Arc<dyn CacheService>,
    ) -> Self {
        Self {
            stores,
            reviews,
            cache,
        }
    }

    /// Creates a listing owned by `author`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - Name is blank or has no letters or digits to build a slug from
    /// - Address is blank or coordinates are out of range
    ///
    /// Returns [`AppError::Conflict`] if no free slug was found after retries.
    pub async fn create_store(&self, author: &Account, input: StoreInput) -> Result<Store, AppError> {
        let name = validate_name(&input.name)?;
        validate_location(&input.location)?;
        let base = slug_base(&name)?;

        let template = NewStore {
            name,
            slug: String::new(),
            description: input.description.trim().to_string(),
            tags: normalize_tags(input.tags),
            location: input.location,
            photo: input.photo.filter(|p| !p.trim().is_empty()),
            author_id: author.id,
        };

        let store = self
            .with_unique_slug(&base, None, |slug| {
                self.stores.create(NewStore {
                    slug,
                    ..template.clone()
                })
            })
            .await?;

        tracing::info!(store_id = store.id, slug = %store.slug, "Store created");
        self.invalidate(&[TAGS_CACHE_KEY, TOP_CACHE_KEY]).await;

        Ok(store)
    }

    /// Applies `patch` to a listing. Only its author may edit it.
    ///
    /// The slug is recomputed only when the name actually changes; the listing
    /// itself is left out of the collision count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown id and
    /// [`AppError::Forbidden`] when `actor` is not the author.
    pub async fn update_store(
        &self,
        actor: &Account,
        id: i64,
        mut patch: StorePatch,
    ) -> Result<Store, AppError> {
        let store = self
            .stores
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Store not found", json!({ "id": id })))?;

        if store.author_id != actor.id {
            return Err(AppError::forbidden(
                "You must own a store in order to edit it!",
                json!({ "id": id }),
            ));
        }

        if let Some(ref name) = patch.name {
            patch.name = Some(validate_name(name)?);
        }
        if let Some(ref location) = patch.location {
            validate_location(location)?;
        }
        patch.tags = patch.tags.map(normalize_tags);

        let store = if store.renames(&patch) {
            let base = slug_base(patch.name.as_deref().unwrap_or_default())?;
            self.with_unique_slug(&base, Some(id), |slug| {
                self.stores.update(id, store.apply(patch.clone(), slug))
            })
            .await?
        } else {
            let slug = store.slug.clone();
            self.stores.update(id, store.apply(patch, slug)).await?
        };

        tracing::info!(store_id = store.id, slug = %store.slug, "Store updated");
        self.invalidate(&[TAGS_CACHE_KEY, TOP_CACHE_KEY]).await;

        Ok(store)
    }

    /// Runs `write` with a slug derived from `base`, renumbering on collisions.
    async fn with_unique_slug<F, Fut>(
        &self,
        base: &str,
        exclude_id: Option<i64>,
        mut write: F,
    ) -> Result<Store, AppError>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<Store, AppError>>,
    {
        let existing = self.stores.find_slugs_matching(base, exclude_id).await?;
        let mut slug = ensure_unique_slug(base, &existing);
        let mut next = existing.len() + 2;

        for _ in 0..MAX_SLUG_ATTEMPTS {
            match write(slug.clone()).await {
                Err(e) if is_unique_violation_on(&e, STORE_SLUG_CONSTRAINT) => {
                    metrics::counter!("slug_collisions_total").increment(1);
                    tracing::warn!(slug = %slug, "Slug taken by a concurrent write, renumbering");
                    slug = nth_suffix(base, next);
                    next += 1;
                }
                result => return result,
            }
        }

        Err(AppError::conflict(
            "Could not assign a unique slug",
            json!({ "base": base, "attempts": MAX_SLUG_ATTEMPTS }),
        ))
    }

    /// Finds a listing by slug with its reviews.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no listing has that slug.
    pub async fn get_store_by_slug(&self, slug: &str) -> Result<StoreWithReviews, AppError> {
        let store = self
            .stores
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found("Store not found", json!({ "slug": slug })))?;

        let mut attached = self.attach_reviews(vec![store]).await?;
        attached
            .pop()
            .ok_or_else(|| AppError::internal("Store vanished while loading reviews", json!({})))
    }

    /// Returns one page of listings, newest first, with reviews attached.
    ///
    /// `page` starts at 1; both arguments are clamped into range.
    pub async fn list_stores(&self, page: i64, page_size: i64) -> Result<StorePage, AppError> {
        let page = page.max(1);
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);

        let offset = (page - 1).saturating_mul(page_size);
        let stores = self.stores.list(offset, page_size).await?;
        let total = self.stores.count().await?;

        Ok(StorePage {
            stores: self.attach_reviews(stores).await?,
            total,
            page,
            page_size,
        })
    }

    /// Loads the reviews for `stores` in one query and pairs them up.
    async fn attach_reviews(&self, stores: Vec<Store>) -> Result<Vec<StoreWithReviews>, AppError> {
        if stores.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = stores.iter().map(|s| s.id).collect();
        let mut by_store: HashMap<i64, Vec<Review>> = HashMap::new();
        for review in self.reviews.list_for_stores(&ids).await? {
            by_store.entry(review.store_id).or_default().push(review);
        }

        Ok(stores
            .into_iter()
            .map(|store| {
                let reviews = by_store.remove(&store.id).unwrap_or_default();
                StoreWithReviews { store, reviews }
            })
            .collect())
    }

    /// Listings carrying `tag`, newest first.
    pub async fn stores_by_tag(&self, tag: &str) -> Result<Vec<Store>, AppError> {
        self.stores.list_by_tag(tag.trim()).await
    }

    /// Case-insensitive match on name or description. A blank query finds nothing.
    pub async fn search_stores(&self, query: &str) -> Result<Vec<Store>, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        self.stores.search(query, SEARCH_LIMIT).await
    }

    /// Adds a review to a listing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a rating outside 1..=5 or blank text,
    /// and [`AppError::NotFound`] if the listing does not exist.
    pub async fn add_review(
        &self,
        author: &Account,
        store_id: i64,
        text: &str,
        rating: i16,
    ) -> Result<Review, AppError> {
        if !(1..=5).contains(&rating) {
            return Err(AppError::bad_request(
                "Rating must be between 1 and 5",
                json!({ "field": "rating", "value": rating }),
            ));
        }

        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::bad_request(
                "Your review must have text!",
                json!({ "field": "text" }),
            ));
        }

        if self.stores.find_by_id(store_id).await?.is_none() {
            return Err(AppError::not_found(
                "Store not found",
                json!({ "id": store_id }),
            ));
        }

        let review = self
            .reviews
            .create(NewReview {
                store_id,
                author_id: author.id,
                text: text.to_string(),
                rating,
            })
            .await?;

        self.invalidate(&[TOP_CACHE_KEY]).await;
        Ok(review)
    }

    /// Listings within [`NEAR_MAX_DISTANCE_M`] of a point, nearest first,
    /// at most [`NEAR_LIMIT`] of them.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for coordinates out of range.
    pub async fn stores_near(
        &self,
        longitude: f64,
        latitude: f64,
    ) -> Result<Vec<NearbyStore>, AppError> {
        validate_coordinates(longitude, latitude)?;
        self.stores
            .find_near(longitude, latitude, NEAR_MAX_DISTANCE_M, NEAR_LIMIT)
            .await
    }

    /// Hearts a listing for `account`, or removes the heart if it has one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the listing does not exist.
    pub async fn toggle_heart(
        &self,
        account: &Account,
        store_id: i64,
    ) -> Result<HeartState, AppError> {
        if self.stores.find_by_id(store_id).await?.is_none() {
            return Err(AppError::not_found(
                "Store not found",
                json!({ "id": store_id }),
            ));
        }

        let hearted = self.stores.toggle_heart(account.id, store_id).await?;
        let total = self.stores.hearted_ids(account.id).await?.len() as i64;

        tracing::info!(account_id = account.id, store_id, hearted, "Heart toggled");

        Ok(HeartState {
            store_id,
            hearted,
            total,
        })
    }

    /// Ids of the listings `account` hearts.
    pub async fn hearted_store_ids(&self, account: &Account) -> Result<Vec<i64>, AppError> {
        self.stores.hearted_ids(account.id).await
    }

    /// Listings `account` hearts, most recently hearted first.
    pub async fn hearted_stores(&self, account: &Account) -> Result<Vec<Store>, AppError> {
        self.stores.list_hearted(account.id).await
    }

    /// Tag frequencies across all listings, most used first.
    pub async fn tag_counts(&self) -> Result<Vec<TagCount>, AppError> {
        if let Some(cached) = self.cached::<Vec<TagCount>>(TAGS_CACHE_KEY).await {
            return Ok(cached);
        }

        let ranked = rank_tags(self.stores.tag_counts().await?);
        self.store_cached(TAGS_CACHE_KEY, &ranked).await;
        Ok(ranked)
    }

    /// Best-rated listings with at least two reviews, at most `limit` of them.
    ///
    /// `limit` is clamped to 1..=[`MAX_TOP_LIMIT`].
    pub async fn top_rated_stores(&self, limit: usize) -> Result<Vec<RatingSummary>, AppError> {
        let limit = limit.clamp(1, MAX_TOP_LIMIT);

        let mut ranked = match self.cached::<Vec<RatingSummary>>(TOP_CACHE_KEY).await {
            Some(cached) => cached,
            None => {
                let ranked = rank_top_rated(self.stores.rating_summaries().await?, MAX_TOP_LIMIT);
                self.store_cached(TOP_CACHE_KEY, &ranked).await;
                ranked
            }
        };

        ranked.truncate(limit);
        Ok(ranked)
    }

    /// Total number of listings.
    pub async fn count_stores(&self) -> Result<i64, AppError> {
        self.stores.count().await
    }

    async fn cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.cache.get(key).await.ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Discarding unreadable cache entry");
                None
            }
        }
    }

    async fn store_cached<T: Serialize>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to serialize report for cache");
                return;
            }
        };

        if let Err(e) = self.cache.set(key, &raw, None).await {
            tracing::warn!(key, error = %e, "Failed to cache report");
        }
    }

    async fn invalidate(&self, keys: &[&str]) {
        let keys: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        if let Err(e) = self.cache.invalidate(&keys).await {
            tracing::warn!(error = %e, "Failed to invalidate report cache");
        }
    }
}

fn validate_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request(
            "Please enter a store name!",
            json!({ "field": "name" }),
        ));
    }
    Ok(name.to_string())
}

fn slug_base(name: &str) -> Result<String, AppError> {
    let base = derive_slug(name);
    if base.is_empty() {
        return Err(AppError::bad_request(
            "Store name must contain letters or digits",
            json!({ "field": "name" }),
        ));
    }
    Ok(base)
}

fn validate_location(location: &Location) -> Result<(), AppError> {
    if location.address.trim().is_empty() {
        return Err(AppError::bad_request(
            "You must supply an address!",
            json!({ "field": "location.address" }),
        ));
    }
    validate_coordinates(location.longitude, location.latitude)
}

fn validate_coordinates(longitude: f64, latitude: f64) -> Result<(), AppError> {
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(AppError::bad_request(
            "Longitude must be between -180 and 180",
            json!({ "field": "location.longitude" }),
        ));
    }
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(AppError::bad_request(
            "Latitude must be between -90 and 90",
            json!({ "field": "location.latitude" }),
        ));
    }
    Ok(())
}

/// Trims tags and drops blanks. Repeats are kept and counted by the tag report.
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

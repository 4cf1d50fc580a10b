//! DTOs for store listing endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::pagination::PaginationMeta;
use super::review::ReviewResponse;
use crate::application::services::StoreInput;
use crate::domain::entities::{
    HeartState, Location, NearbyStore, Store, StorePatch, StoreWithReviews,
};

/// Location payload shared by create and update requests.
///
/// Coordinate ranges are checked by the store service.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LocationRequest {
    pub longitude: f64,
    pub latitude: f64,

    #[validate(length(min = 1, message = "You must supply an address!"))]
    pub address: String,
}

impl From<LocationRequest> for Location {
    fn from(req: LocationRequest) -> Self {
        Location {
            longitude: req.longitude,
            latitude: req.latitude,
            address: req.address,
        }
    }
}

/// Request body for `POST /api/stores`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStoreRequest {
    #[validate(length(min = 1, max = 200, message = "Please enter a store name!"))]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[validate(nested)]
    pub location: LocationRequest,

    #[validate(url(message = "Photo must be a URL"))]
    pub photo: Option<String>,
}

impl From<CreateStoreRequest> for StoreInput {
    fn from(req: CreateStoreRequest) -> Self {
        StoreInput {
            name: req.name,
            description: req.description,
            tags: req.tags,
            location: req.location.into(),
            photo: req.photo,
        }
    }
}

/// Request body for `PATCH /api/stores/{id}`.
///
/// All fields are optional; only provided fields are changed.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStoreRequest {
    #[validate(length(min = 1, max = 200, message = "Please enter a store name!"))]
    pub name: Option<String>,

    pub description: Option<String>,

    pub tags: Option<Vec<String>>,

    #[validate(nested)]
    pub location: Option<LocationRequest>,

    #[validate(url(message = "Photo must be a URL"))]
    pub photo: Option<String>,
}

impl From<UpdateStoreRequest> for StorePatch {
    fn from(req: UpdateStoreRequest) -> Self {
        StorePatch {
            name: req.name,
            description: req.description,
            tags: req.tags,
            location: req.location.map(Into::into),
            photo: req.photo,
        }
    }
}

/// A listing as returned by the API.
#[derive(Debug, Serialize)]
pub struct StoreResponse {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub tags: Vec<String>,
    pub location: Location,
    pub photo: Option<String>,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<ReviewResponse>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
}

impl From<Store> for StoreResponse {
    fn from(store: Store) -> Self {
        Self {
            id: store.id,
            name: store.name,
            slug: store.slug,
            description: store.description,
            tags: store.tags,
            location: store.location,
            photo: store.photo,
            author_id: store.author_id,
            created_at: store.created_at,
            reviews: None,
            average_rating: None,
        }
    }
}

impl From<StoreWithReviews> for StoreResponse {
    fn from(with_reviews: StoreWithReviews) -> Self {
        let average_rating = with_reviews.average_rating();
        let reviews = with_reviews
            .reviews
            .into_iter()
            .map(ReviewResponse::from)
            .collect();

        Self {
            reviews: Some(reviews),
            average_rating,
            ..Self::from(with_reviews.store)
        }
    }
}

/// Paginated listings.
#[derive(Debug, Serialize)]
pub struct StoreListResponse {
    pub pagination: PaginationMeta,
    pub items: Vec<StoreResponse>,
}

/// Query parameters for `GET /api/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Query parameters for `GET /api/stores/near`.
#[derive(Debug, Deserialize)]
pub struct NearParams {
    pub lng: f64,
    pub lat: f64,
}

/// A listing with its distance from the searched point.
#[derive(Debug, Serialize)]
pub struct NearbyStoreResponse {
    #[serde(flatten)]
    pub store: StoreResponse,
    pub distance_m: f64,
}

impl From<NearbyStore> for NearbyStoreResponse {
    fn from(nearby: NearbyStore) -> Self {
        Self {
            store: nearby.store.into(),
            distance_m: nearby.distance_m,
        }
    }
}

/// Result of toggling a heart.
#[derive(Debug, Serialize)]
pub struct HeartResponse {
    pub store_id: i64,
    pub hearted: bool,
    /// Listings the caller hearts after the toggle.
    pub hearts: i64,
}

impl From<HeartState> for HeartResponse {
    fn from(state: HeartState) -> Self {
        Self {
            store_id: state.store_id,
            hearted: state.hearted,
            hearts: state.total,
        }
    }
}

//! Handlers for store listing endpoints.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::pagination::{PaginationMeta, PaginationParams};
use crate::api::dto::store::{
    CreateStoreRequest, HeartResponse, NearParams, NearbyStoreResponse, SearchParams,
    StoreListResponse, StoreResponse, UpdateStoreRequest,
};
use crate::domain::entities::Account;
use crate::error::AppError;
use crate::state::AppState;

/// Lists stores, newest first, with their reviews.
///
/// # Endpoint
///
/// `GET /api/stores`
///
/// # Query Parameters
///
/// - `page` (optional): Page number (default: 1)
/// - `page_size` (optional): Items per page (default: 6, max: 100)
///
/// # Errors
///
/// Returns 400 Bad Request if pagination parameters are invalid.
pub async fn list_stores_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<StoreListResponse>, AppError> {
    let (page, page_size) = params
        .validate()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let page = state.store_service.list_stores(page, page_size).await?;

    Ok(Json(StoreListResponse {
        pagination: PaginationMeta::from(&page),
        items: page.stores.into_iter().map(StoreResponse::from).collect(),
    }))
}

/// Creates a store owned by the authenticated account.
///
/// # Endpoint
///
/// `POST /api/stores`
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Coffee & Co.",
///   "description": "Espresso bar",
///   "tags": ["Wifi", "Open Late"],
///   "location": { "longitude": -79.38, "latitude": 43.65, "address": "1 King St W" }
/// }
/// ```
///
/// # Response
///
/// `201 Created` with the stored listing; `slug` is derived from the name
/// (`coffee-and-co`, numbered if already taken).
pub async fn create_store_handler(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    Json(payload): Json<CreateStoreRequest>,
) -> Result<(StatusCode, Json<StoreResponse>), AppError> {
    payload.validate()?;

    let store = state
        .store_service
        .create_store(&account, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(store.into())))
}

/// Fetches one store by slug with its reviews.
///
/// # Endpoint
///
/// `GET /api/stores/{slug}`
pub async fn get_store_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<StoreResponse>, AppError> {
    let store = state.store_service.get_store_by_slug(&slug).await?;
    Ok(Json(store.into()))
}

/// Partially updates a store. Only its author may do so.
///
/// # Endpoint
///
/// `PATCH /api/stores/{id}`
///
/// # Errors
///
/// - `403 Forbidden` when the caller is not the author
/// - `404 Not Found` for an unknown id
pub async fn update_store_handler(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateStoreRequest>,
) -> Result<Json<StoreResponse>, AppError> {
    payload.validate()?;

    let store = state
        .store_service
        .update_store(&account, id, payload.into())
        .await?;

    Ok(Json(store.into()))
}

/// Searches store names and descriptions.
///
/// # Endpoint
///
/// `GET /api/search?q=coffee`
///
/// Returns at most five matches; an empty query returns an empty list.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<StoreResponse>>, AppError> {
    let stores = state.store_service.search_stores(&params.q).await?;
    Ok(Json(stores.into_iter().map(StoreResponse::from).collect()))
}

/// Finds listings near a point, nearest first.
///
/// # Endpoint
///
/// `GET /api/stores/near?lng=-79.38&lat=43.65`
///
/// Returns at most ten listings within 10 km, each with `distance_m`.
///
/// # Errors
///
/// Returns 400 Bad Request for missing or out-of-range coordinates.
pub async fn near_handler(
    State(state): State<AppState>,
    Query(params): Query<NearParams>,
) -> Result<Json<Vec<NearbyStoreResponse>>, AppError> {
    let stores = state
        .store_service
        .stores_near(params.lng, params.lat)
        .await?;
    Ok(Json(stores.into_iter().map(NearbyStoreResponse::from).collect()))
}

/// Hearts a listing for the caller, or removes the heart.
///
/// # Endpoint
///
/// `POST /api/stores/{id}/heart`
///
/// # Response
///
/// ```json
/// { "store_id": 4, "hearted": true, "hearts": 3 }
/// ```
pub async fn heart_handler(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    Path(id): Path<i64>,
) -> Result<Json<HeartResponse>, AppError> {
    let heart = state.store_service.toggle_heart(&account, id).await?;
    Ok(Json(heart.into()))
}

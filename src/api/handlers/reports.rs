//! Handlers for aggregate reports.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::dto::report::TopQueryParams;
use crate::domain::reports::{DEFAULT_TOP_LIMIT, RatingSummary, TagCount};
use crate::error::AppError;
use crate::state::AppState;

/// Tag frequencies across all stores.
///
/// # Endpoint
///
/// `GET /api/tags`
///
/// # Response
///
/// ```json
/// [{ "tag": "Wifi", "count": 12 }, { "tag": "Family Friendly", "count": 4 }]
/// ```
///
/// Sorted by count descending, then tag ascending.
pub async fn tags_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<TagCount>>, AppError> {
    Ok(Json(state.store_service.tag_counts().await?))
}

/// Best-rated stores with at least two reviews.
///
/// # Endpoint
///
/// `GET /api/top?limit=10`
///
/// `limit` defaults to 10 and is capped at 50.
pub async fn top_handler(
    State(state): State<AppState>,
    Query(params): Query<TopQueryParams>,
) -> Result<Json<Vec<RatingSummary>>, AppError> {
    let limit = params.limit.unwrap_or(DEFAULT_TOP_LIMIT);
    Ok(Json(state.store_service.top_rated_stores(limit).await?))
}

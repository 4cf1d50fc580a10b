//! Handler for posting reviews.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::review::{CreateReviewRequest, ReviewResponse};
use crate::domain::entities::Account;
use crate::error::AppError;
use crate::state::AppState;

/// Adds a review by the authenticated account.
///
/// # Endpoint
///
/// `POST /api/stores/{id}/reviews`
///
/// # Request Body
///
/// ```json
/// { "text": "Great espresso", "rating": 5 }
/// ```
///
/// # Errors
///
/// - `400 Bad Request` for empty text or a rating outside 1 to 5
/// - `404 Not Found` for an unknown store
pub async fn create_review_handler(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    Path(store_id): Path<i64>,
    Json(payload): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), AppError> {
    payload.validate()?;

    let review = state
        .store_service
        .add_review(&account, store_id, &payload.text, payload.rating)
        .await?;

    Ok((StatusCode::CREATED, Json(review.into())))
}

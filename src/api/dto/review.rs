//! DTOs for review endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Review;

/// Request body for `POST /api/stores/{id}/reviews`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[validate(length(min = 1, max = 2000, message = "Your review must have text!"))]
    pub text: String,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i16,
}

/// A review as returned by the API.
#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub id: i64,
    pub store_id: i64,
    pub author_id: i64,
    pub text: String,
    pub rating: i16,
    pub created_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            store_id: review.store_id,
            author_id: review.author_id,
            text: review.text,
            rating: review.rating,
            created_at: review.created_at,
        }
    }
}

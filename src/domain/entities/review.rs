//! Review entity.

use chrono::{DateTime, Utc};

/// A rating and comment left on a store.
#[derive(Debug, Clone)]
pub struct Review {
    pub id: i64,
    pub store_id: i64,
    pub author_id: i64,
    pub text: String,
    /// 1 to 5 inclusive.
    pub rating: i16,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a review.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub store_id: i64,
    pub author_id: i64,
    pub text: String,
    pub rating: i16,
}

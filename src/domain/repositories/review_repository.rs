//! Repository trait for reviews.

use crate::domain::entities::{NewReview, Review};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for store reviews.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgReviewRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Creates a review.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_review: NewReview) -> Result<Review, AppError>;

    /// Returns all reviews for the given stores, newest first.
    async fn list_for_stores(&self, store_ids: &[i64]) -> Result<Vec<Review>, AppError>;
}

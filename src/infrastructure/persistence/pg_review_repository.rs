//! PostgreSQL implementation of review repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewReview, Review};
use crate::domain::repositories::ReviewRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct ReviewRow {
    id: i64,
    store_id: i64,
    author_id: i64,
    text: String,
    rating: i16,
    created_at: DateTime<Utc>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Review {
            id: row.id,
            store_id: row.store_id,
            author_id: row.author_id,
            text: row.text,
            rating: row.rating,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL repository for reviews.
pub struct PgReviewRepository {
    pool: Arc<PgPool>,
}

impl PgReviewRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    async fn create(&self, new_review: NewReview) -> Result<Review, AppError> {
        let row = sqlx::query_as::<_, ReviewRow>(
            r#"
            INSERT INTO reviews (store_id, author_id, text, rating)
            VALUES ($1, $2, $3, $4)
            RETURNING id, store_id, author_id, text, rating, created_at
            "#,
        )
        .bind(new_review.store_id)
        .bind(new_review.author_id)
        .bind(&new_review.text)
        .bind(new_review.rating)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn list_for_stores(&self, store_ids: &[i64]) -> Result<Vec<Review>, AppError> {
        if store_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT id, store_id, author_id, text, rating, created_at
            FROM reviews
            WHERE store_id = ANY($1)
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(store_ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

//! PostgreSQL implementation of store repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Location, NearbyStore, NewStore, Store, StoreUpdate};
use crate::domain::reports::{RatingSummary, TagCount};
use crate::domain::repositories::StoreRepository;
use crate::error::AppError;
use crate::utils::slug::slug_pattern;

#[derive(FromRow)]
struct StoreRow {
    id: i64,
    name: String,
    slug: String,
    description: String,
    tags: Vec<String>,
    longitude: f64,
    latitude: f64,
    address: String,
    photo: Option<String>,
    author_id: i64,
    created_at: DateTime<Utc>,
}

impl From<StoreRow> for Store {
    fn from(row: StoreRow) -> Self {
        Store {
            id: row.id,
            name: row.name,
            slug: row.slug,
            description: row.description,
            tags: row.tags,
            location: Location {
                longitude: row.longitude,
                latitude: row.latitude,
                address: row.address,
            },
            photo: row.photo,
            author_id: row.author_id,
            created_at: row.created_at,
        }
    }
}

#[derive(FromRow)]
struct NearbyRow {
    #[sqlx(flatten)]
    store: StoreRow,
    distance_m: f64,
}

/// Shortest length of one degree of latitude, in meters. Dividing by it
/// gives a latitude band that never cuts off a point within range.
const MIN_METERS_PER_DEGREE_LAT: f64 = 110_574.0;

#[derive(FromRow)]
struct RatingRow {
    id: i64,
    name: String,
    slug: String,
    photo: Option<String>,
    review_count: i64,
    average_rating: f64,
}

/// Escapes `%`, `_` and `\` so user input matches literally inside `ILIKE`.
fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// PostgreSQL repository for store listings.
///
/// Location is stored as plain longitude/latitude columns; tags as `TEXT[]`
/// with a GIN index for tag filtering. Proximity uses the haversine distance,
/// pre-filtered by an indexed latitude band.
pub struct PgStoreRepository {
    pool: Arc<PgPool>,
}

impl PgStoreRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreRepository for PgStoreRepository {
    async fn create(&self, new_store: NewStore) -> Result<Store, AppError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r#"
            INSERT INTO stores
                (name, slug, description, tags, longitude, latitude, address, photo, author_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, name, slug, description, tags, longitude, latitude, address,
                      photo, author_id, created_at
            "#,
        )
        .bind(&new_store.name)
        .bind(&new_store.slug)
        .bind(&new_store.description)
        .bind(&new_store.tags)
        .bind(new_store.location.longitude)
        .bind(new_store.location.latitude)
        .bind(&new_store.location.address)
        .bind(&new_store.photo)
        .bind(new_store.author_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn update(&self, id: i64, update: StoreUpdate) -> Result<Store, AppError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r#"
            UPDATE stores
            SET name = $2, slug = $3, description = $4, tags = $5,
                longitude = $6, latitude = $7, address = $8, photo = $9
            WHERE id = $1
            RETURNING id, name, slug, description, tags, longitude, latitude, address,
                      photo, author_id, created_at
            "#,
        )
        .bind(id)
        .bind(&update.name)
        .bind(&update.slug)
        .bind(&update.description)
        .bind(&update.tags)
        .bind(update.location.longitude)
        .bind(update.location.latitude)
        .bind(&update.location.address)
        .bind(&update.photo)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Into::into)
            .ok_or_else(|| AppError::not_found("Store not found", json!({ "id": id })))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Store>, AppError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r#"
            SELECT id, name, slug, description, tags, longitude, latitude, address,
                   photo, author_id, created_at
            FROM stores
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Store>, AppError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r#"
            SELECT id, name, slug, description, tags, longitude, latitude, address,
                   photo, author_id, created_at
            FROM stores
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_slugs_matching(
        &self,
        base: &str,
        exclude_id: Option<i64>,
    ) -> Result<Vec<String>, AppError> {
        let slugs = sqlx::query_scalar::<_, String>(
            r#"
            SELECT slug
            FROM stores
            WHERE slug ~* $1
              AND ($2::bigint IS NULL OR id <> $2)
            "#,
        )
        .bind(slug_pattern(base))
        .bind(exclude_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(slugs)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Store>, AppError> {
        let rows = sqlx::query_as::<_, StoreRow>(
            r#"
            SELECT id, name, slug, description, tags, longitude, latitude, address,
                   photo, author_id, created_at
            FROM stores
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM stores")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn list_by_tag(&self, tag: &str) -> Result<Vec<Store>, AppError> {
        let rows = sqlx::query_as::<_, StoreRow>(
            r#"
            SELECT id, name, slug, description, tags, longitude, latitude, address,
                   photo, author_id, created_at
            FROM stores
            WHERE $1 = ANY(tags)
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(tag)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn search(&self, query: &str, limit: i64) -> Result<Vec<Store>, AppError> {
        let rows = sqlx::query_as::<_, StoreRow>(
            r#"
            SELECT id, name, slug, description, tags, longitude, latitude, address,
                   photo, author_id, created_at
            FROM stores
            WHERE name ILIKE $1 OR description ILIKE $1
            ORDER BY (name ILIKE $1) DESC, name ASC
            LIMIT $2
            "#,
        )
        .bind(like_pattern(query))
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn tag_counts(&self) -> Result<Vec<TagCount>, AppError> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT tag, COUNT(*) AS count
            FROM stores, UNNEST(tags) AS tag
            GROUP BY tag
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(tag, count)| TagCount { tag, count })
            .collect())
    }

    async fn rating_summaries(&self) -> Result<Vec<RatingSummary>, AppError> {
        let rows = sqlx::query_as::<_, RatingRow>(
            r#"
            SELECT s.id, s.name, s.slug, s.photo,
                   COUNT(r.id) AS review_count,
                   AVG(r.rating)::float8 AS average_rating
            FROM stores s
            JOIN reviews r ON r.store_id = s.id
            GROUP BY s.id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| RatingSummary {
                store_id: r.id,
                name: r.name,
                slug: r.slug,
                photo: r.photo,
                review_count: r.review_count,
                average_rating: r.average_rating,
            })
            .collect())
    }

    async fn find_near(
        &self,
        longitude: f64,
        latitude: f64,
        max_distance_m: f64,
        limit: i64,
    ) -> Result<Vec<NearbyStore>, AppError> {
        let rows = sqlx::query_as::<_, NearbyRow>(
            r#"
            SELECT id, name, slug, description, tags, longitude, latitude, address,
                   photo, author_id, created_at, distance_m
            FROM (
                SELECT s.*,
                       2 * 6371008.8 * ASIN(LEAST(1.0, SQRT(
                           POWER(SIN(RADIANS(s.latitude - $2) / 2), 2)
                           + COS(RADIANS($2)) * COS(RADIANS(s.latitude))
                             * POWER(SIN(RADIANS(s.longitude - $1) / 2), 2)
                       ))) AS distance_m
                FROM stores s
                WHERE s.latitude BETWEEN $2 - $5 AND $2 + $5
            ) nearby
            WHERE distance_m <= $3
            ORDER BY distance_m ASC, id ASC
            LIMIT $4
            "#,
        )
        .bind(longitude)
        .bind(latitude)
        .bind(max_distance_m)
        .bind(limit)
        .bind(max_distance_m / MIN_METERS_PER_DEGREE_LAT)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| NearbyStore {
                store: row.store.into(),
                distance_m: row.distance_m,
            })
            .collect())
    }

    async fn toggle_heart(&self, account_id: i64, store_id: i64) -> Result<bool, AppError> {
        let inserted = sqlx::query_scalar::<_, i64>(
            r#"
            WITH removed AS (
                DELETE FROM hearts
                WHERE account_id = $1 AND store_id = $2
                RETURNING store_id
            )
            INSERT INTO hearts (account_id, store_id)
            SELECT $1, $2
            WHERE NOT EXISTS (SELECT 1 FROM removed)
            RETURNING store_id
            "#,
        )
        .bind(account_id)
        .bind(store_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(inserted.is_some())
    }

    async fn hearted_ids(&self, account_id: i64) -> Result<Vec<i64>, AppError> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT store_id FROM hearts WHERE account_id = $1 ORDER BY store_id",
        )
        .bind(account_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(ids)
    }

    async fn list_hearted(&self, account_id: i64) -> Result<Vec<Store>, AppError> {
        let rows = sqlx::query_as::<_, StoreRow>(
            r#"
            SELECT s.id, s.name, s.slug, s.description, s.tags, s.longitude, s.latitude,
                   s.address, s.photo, s.author_id, s.created_at
            FROM stores s
            JOIN hearts h ON h.store_id = s.id
            WHERE h.account_id = $1
            ORDER BY h.created_at DESC, s.id DESC
            "#,
        )
        .bind(account_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

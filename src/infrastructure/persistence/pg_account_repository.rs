//! PostgreSQL implementation of account repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Account, NewAccount, PendingReset};
use crate::domain::repositories::AccountRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct AccountRow {
    id: i64,
    name: String,
    email: String,
    password_hash: String,
    reset_token: Option<String>,
    reset_expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Account::new(
            row.id,
            row.name,
            row.email,
            row.password_hash,
            Account::reset_from_columns(row.reset_token, row.reset_expires_at),
            row.created_at,
        )
    }
}

/// PostgreSQL repository for accounts.
///
/// The reset pair lives in two nullable columns guarded by a CHECK constraint
/// so they are always set or cleared together.
pub struct PgAccountRepository {
    pool: Arc<PgPool>,
}

impl PgAccountRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn create(&self, new_account: NewAccount) -> Result<Account, AppError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO accounts (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_hash, reset_token, reset_expires_at, created_at
            "#,
        )
        .bind(&new_account.name)
        .bind(&new_account.email)
        .bind(&new_account.password_hash)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, AppError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, name, email, password_hash, reset_token, reset_expires_at, created_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, name, email, password_hash, reset_token, reset_expires_at, created_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_reset_token(&self, token: &str) -> Result<Option<Account>, AppError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, name, email, password_hash, reset_token, reset_expires_at, created_at
            FROM accounts
            WHERE reset_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn save_reset(&self, account_id: i64, reset: &PendingReset) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET reset_token = $2, reset_expires_at = $3
            WHERE id = $1
            "#,
        )
        .bind(account_id)
        .bind(&reset.token)
        .bind(reset.expires_at)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Account not found",
                json!({ "account_id": account_id }),
            ));
        }

        Ok(())
    }

    async fn complete_reset(
        &self,
        account_id: i64,
        token: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Account>, AppError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            UPDATE accounts
            SET password_hash = $3, reset_token = NULL, reset_expires_at = NULL
            WHERE id = $1
              AND reset_token = $2
              AND reset_expires_at > $4
            RETURNING id, name, email, password_hash, reset_token, reset_expires_at, created_at
            "#,
        )
        .bind(account_id)
        .bind(token)
        .bind(password_hash)
        .bind(now)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }
}

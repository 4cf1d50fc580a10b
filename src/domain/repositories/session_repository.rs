//! Repository trait for login sessions.

use crate::domain::entities::Session;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for sessions.
///
/// Sessions are looked up by the HMAC hash of the raw token; raw tokens are
/// never persisted.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSessionRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Creates a session for an account.
    async fn create(
        &self,
        account_id: i64,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Session, AppError>;

    /// Finds an unexpired session by token hash.
    async fn find_active(&self, token_hash: &str) -> Result<Option<Session>, AppError>;

    /// Deletes one session. Deleting an unknown session is not an error.
    async fn delete(&self, token_hash: &str) -> Result<(), AppError>;

    /// Deletes every session of an account, returning how many were removed.
    async fn delete_for_account(&self, account_id: i64) -> Result<u64, AppError>;
}

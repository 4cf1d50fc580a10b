//! Repository trait for accounts and password-reset state.

use crate::domain::entities::{Account, NewAccount, PendingReset};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for account storage.
///
/// Emails are passed in normalized form (see
/// [`crate::domain::entities::normalize_email`]).
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAccountRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Creates a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_account: NewAccount) -> Result<Account, AppError>;

    /// Finds an account by its database ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, AppError>;

    /// Finds an account by normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError>;

    /// Finds the account currently holding `token` as its reset token.
    ///
    /// Expiry is not checked here; callers judge it against their own clock.
    async fn find_by_reset_token(&self, token: &str) -> Result<Option<Account>, AppError>;

    /// Stores a reset token and expiry on the account, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the account does not exist.
    async fn save_reset(&self, account_id: i64, reset: &PendingReset) -> Result<(), AppError>;

    /// Sets a new password hash and clears the reset pair in one step.
    ///
    /// The write only applies while the account still holds `token` with an
    /// expiry after `now`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Account))` with the updated account
    /// - `Ok(None)` if the token no longer matches or has expired
    async fn complete_reset(
        &self,
        account_id: i64,
        token: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Account>, AppError>;
}

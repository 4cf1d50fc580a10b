//! Login sessions backed by opaque bearer tokens.

use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::Account;
use crate::domain::repositories::{AccountRepository, SessionRepository};
use crate::error::AppError;
use crate::utils::token::generate_session_token;

type HmacSha256 = Hmac<Sha256>;

/// Issues, resolves and revokes login sessions.
///
/// Raw tokens only ever live in the client's cookie or `Authorization` header.
/// Storage holds their HMAC-SHA256 (keyed by `signing_secret`), so a leaked
/// `sessions` table cannot be replayed without the server-side secret.
pub struct SessionService {
    sessions: Arc<dyn SessionRepository>,
    accounts: Arc<dyn AccountRepository>,
    signing_secret: String,
    ttl: Duration,
}

impl SessionService {
    /// Creates a new session service.
    ///
    /// # Arguments
    ///
    /// - `sessions` - session storage
    /// - `accounts` - account storage, used to resolve a session to its owner
    /// - `signing_secret` - HMAC key; must match the value used when sessions were created
    /// - `ttl` - lifetime of a new session
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        accounts: Arc<dyn AccountRepository>,
        signing_secret: String,
        ttl: Duration,
    ) -> Self {
        Self {
            sessions,
            accounts,
            signing_secret,
            ttl,
        }
    }

    /// Lifetime given to new sessions.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Hashes a raw token with HMAC-SHA256 using the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    fn hash_token(&self, token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Starts a session for `account` and returns the raw token to hand to the client.
    pub async fn login(&self, account: &Account) -> Result<String, AppError> {
        let token = generate_session_token();
        let expires_at = Utc::now() + self.ttl;

        self.sessions
            .create(account.id, &self.hash_token(&token), expires_at)
            .await?;

        metrics::counter!("logins_total").increment(1);
        tracing::info!(account_id = account.id, "Session started");

        Ok(token)
    }

    /// Resolves a raw session token to the account that owns it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown or expired,
    /// or if the owning account no longer exists.
    pub async fn authenticate(&self, token: &str) -> Result<Account, AppError> {
        let session = self
            .sessions
            .find_active(&self.hash_token(token))
            .await?
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({ "reason": "Invalid or expired session" }),
                )
            })?;

        self.accounts
            .find_by_id(session.account_id)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized("Unauthorized", json!({ "reason": "Account not found" }))
            })
    }

    /// Ends the session identified by `token`. Unknown tokens are ignored.
    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        self.sessions.delete(&self.hash_token(token)).await
    }

    /// Ends every session of an account. Returns how many were removed.
    pub async fn revoke_all(&self, account_id: i64) -> Result<u64, AppError> {
        let removed = self.sessions.delete_for_account(account_id).await?;
        if removed > 0 {
            tracing::info!(account_id, removed, "Revoked sessions");
        }
        Ok(removed)
    }
}

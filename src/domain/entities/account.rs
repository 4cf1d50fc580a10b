//! Account entity and its password-recovery state.

use chrono::{DateTime, Duration, Utc};

/// An outstanding password reset: the token mailed to the user and its expiry.
///
/// Token and expiry only ever exist together, so the pair is modelled as one
/// optional value on [`Account`] instead of two independent options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReset {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl PendingReset {
    /// Creates a reset that expires `ttl` after `now`.
    pub fn issue(token: String, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            token,
            expires_at: now + ttl,
        }
    }

    /// Returns true while `now` is strictly before the expiry.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }

    /// Returns true if `token` matches and the reset has not expired at `now`.
    pub fn accepts(&self, token: &str, now: DateTime<Utc>) -> bool {
        self.token == token && self.is_live_at(now)
    }
}

/// Where an account stands in the recovery flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryState {
    Normal,
    RecoveryRequested,
}

/// A registered user.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub reset: Option<PendingReset>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new Account instance.
    pub fn new(
        id: i64,
        name: String,
        email: String,
        password_hash: String,
        reset: Option<PendingReset>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
            reset,
            created_at,
        }
    }

    /// Assembles the reset pair from nullable storage columns.
    ///
    /// A half-populated pair is treated as no reset at all.
    pub fn reset_from_columns(
        token: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Option<PendingReset> {
        match (token, expires_at) {
            (Some(token), Some(expires_at)) => Some(PendingReset { token, expires_at }),
            _ => None,
        }
    }

    pub fn recovery_state(&self) -> RecoveryState {
        match self.reset {
            Some(_) => RecoveryState::RecoveryRequested,
            None => RecoveryState::Normal,
        }
    }

    /// Returns true if `token` is this account's live reset token at `now`.
    pub fn accepts_reset_token(&self, token: &str, now: DateTime<Utc>) -> bool {
        self.reset
            .as_ref()
            .is_some_and(|reset| reset.accepts(token, now))
    }
}

/// Input data for creating a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Canonical form used for storing and looking up emails.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account_with(reset: Option<PendingReset>) -> Account {
        Account::new(
            1,
            "Wes".to_string(),
            "wes@example.com".to_string(),
            "$argon2id$stub".to_string(),
            reset,
            Utc::now(),
        )
    }

    #[test]
    fn test_issue_sets_expiry_after_now() {
        let now = Utc::now();
        let reset = PendingReset::issue("abc".to_string(), now, Duration::hours(1));

        assert_eq!(reset.expires_at, now + Duration::hours(1));
        assert!(reset.is_live_at(now));
    }

    #[test]
    fn test_reset_expired_at_exact_expiry() {
        let now = Utc::now();
        let reset = PendingReset {
            token: "abc".to_string(),
            expires_at: now,
        };

        assert!(!reset.is_live_at(now));
        assert!(!reset.accepts("abc", now));
    }

    #[test]
    fn test_accepts_requires_matching_token() {
        let now = Utc::now();
        let reset = PendingReset::issue("abc".to_string(), now, Duration::minutes(5));

        assert!(reset.accepts("abc", now));
        assert!(!reset.accepts("abd", now));
    }

    #[test]
    fn test_recovery_state() {
        assert_eq!(account_with(None).recovery_state(), RecoveryState::Normal);

        let reset = PendingReset::issue("t".to_string(), Utc::now(), Duration::hours(1));
        assert_eq!(
            account_with(Some(reset)).recovery_state(),
            RecoveryState::RecoveryRequested
        );
    }

    #[test]
    fn test_accepts_reset_token_without_reset() {
        assert!(!account_with(None).accepts_reset_token("anything", Utc::now()));
    }

    #[test]
    fn test_reset_from_columns_requires_both() {
        let now = Utc::now();
        assert!(Account::reset_from_columns(Some("t".to_string()), None).is_none());
        assert!(Account::reset_from_columns(None, Some(now)).is_none());
        assert_eq!(
            Account::reset_from_columns(Some("t".to_string()), Some(now)),
            Some(PendingReset {
                token: "t".to_string(),
                expires_at: now
            })
        );
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Wes@Example.COM "), "wes@example.com");
    }
}

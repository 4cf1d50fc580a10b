//! Password recovery via emailed reset tokens.
//!
//! An account moves from `Normal` to `RecoveryRequested` when a token is
//! issued and back to `Normal` when the reset completes. Every step checks the
//! token against the clock again; nothing trusts an earlier validation.

use chrono::{Duration, Utc};
use serde_json::json;
use std::sync::Arc;
use tokio_retry::{RetryIf, strategy::FixedInterval};

use super::auth_service::SignedIn;
use super::session_service::SessionService;
use crate::domain::entities::{Account, PendingReset, normalize_email};
use crate::domain::repositories::AccountRepository;
use crate::error::AppError;
use crate::infrastructure::mail::{MailError, MailTemplate, Mailer, OutgoingMail};
use crate::utils::password::{hash_password, validate_password};
use crate::utils::token::generate_reset_token;

/// Shown after a reset request, whether or not the email is registered.
pub const RESET_REQUESTED_MESSAGE: &str = "You have been emailed a password reset link.";

/// Delay between mail delivery attempts.
const MAIL_RETRY_INTERVAL_MS: u64 = 200;

/// Extra delivery attempts after a transient failure.
const MAIL_RETRIES: usize = 2;

/// Issues, checks and redeems password reset tokens.
pub struct RecoveryService {
    accounts: Arc<dyn AccountRepository>,
    mailer: Arc<dyn Mailer>,
    sessions: Arc<SessionService>,
    public_base_url: String,
    reset_ttl: Duration,
}

impl RecoveryService {
    /// Creates a new recovery service.
    ///
    /// # Arguments
    ///
    /// - `public_base_url` - scheme and host prefixed to emailed links
    /// - `reset_ttl` - how long an issued token stays valid
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        mailer: Arc<dyn Mailer>,
        sessions: Arc<SessionService>,
        public_base_url: String,
        reset_ttl: Duration,
    ) -> Self {
        Self {
            accounts,
            mailer,
            sessions,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            reset_ttl,
        }
    }

    /// Link a user follows to redeem `token`.
    pub fn reset_url(&self, token: &str) -> String {
        format!("{}/account/reset/{}", self.public_base_url, token)
    }

    /// Starts recovery for `email` and mails the reset link.
    ///
    /// Unknown emails get the same outcome as known ones and cause no writes,
    /// so the response cannot be used to discover which emails have accounts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the token cannot be stored and
    /// [`AppError::MailDelivery`] if the email cannot be sent after retries.
    pub async fn request_recovery(&self, email: &str) -> Result<&'static str, AppError> {
        let Some(account) = self
            .accounts
            .find_by_email(&normalize_email(email))
            .await?
        else {
            tracing::debug!("Password reset requested for unknown email");
            return Ok(RESET_REQUESTED_MESSAGE);
        };

        let reset = self.issue(&account).await?;
        let mail = OutgoingMail {
            recipient: account.email.clone(),
            recipient_name: account.name.clone(),
            subject: "Password reset".to_string(),
            reset_url: self.reset_url(&reset.token),
            template: MailTemplate::PasswordReset,
        };

        let strategy = FixedInterval::from_millis(MAIL_RETRY_INTERVAL_MS).take(MAIL_RETRIES);
        RetryIf::spawn(
            strategy,
            || self.mailer.send(mail.clone()),
            MailError::is_transient,
        )
        .await
        .inspect_err(|e| {
            tracing::error!(account_id = account.id, error = %e, "Reset email not delivered");
        })?;

        metrics::counter!("recovery_requested_total").increment(1);
        tracing::info!(account_id = account.id, "Password reset requested");

        Ok(RESET_REQUESTED_MESSAGE)
    }

    /// Issues a reset for `email` and returns the link without mailing it.
    ///
    /// Used by operators who deliver the link out of band.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no account has that email.
    pub async fn issue_reset_link(&self, email: &str) -> Result<String, AppError> {
        let email = normalize_email(email);
        let account = self
            .accounts
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::not_found("Account not found", json!({ "email": email })))?;

        let reset = self.issue(&account).await?;
        Ok(self.reset_url(&reset.token))
    }

    async fn issue(&self, account: &Account) -> Result<PendingReset, AppError> {
        let reset = PendingReset::issue(generate_reset_token(), Utc::now(), self.reset_ttl);
        self.accounts.save_reset(account.id, &reset).await?;
        Ok(reset)
    }

    /// Returns the account holding `token` if it has not expired.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidOrExpiredToken`] for an unknown token or one
    /// whose expiry is at or before now.
    pub async fn validate_recovery_token(&self, token: &str) -> Result<Account, AppError> {
        self.accounts
            .find_by_reset_token(token)
            .await?
            .filter(|account| account.accepts_reset_token(token, Utc::now()))
            .ok_or_else(AppError::invalid_token)
    }

    /// Sets a new password using a reset token and logs the account in.
    ///
    /// Existing sessions of the account are revoked before the new one starts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the passwords differ or the new one
    /// is too short; nothing is written in that case.
    /// Returns [`AppError::InvalidOrExpiredToken`] if the token is unknown,
    /// expired, or was redeemed concurrently.
    pub async fn complete_recovery(
        &self,
        token: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<SignedIn, AppError> {
        if new_password != confirm_password {
            return Err(AppError::bad_request(
                "Passwords do not match!",
                json!({ "field": "confirm_password" }),
            ));
        }

        validate_password(new_password).map_err(|e| {
            AppError::bad_request(e.to_string(), json!({ "field": "password" }))
        })?;

        let account = self.validate_recovery_token(token).await?;

        let password_hash = hash_password(new_password)
            .map_err(|e| AppError::internal(e.to_string(), json!({})))?;

        let account = self
            .accounts
            .complete_reset(account.id, token, &password_hash, Utc::now())
            .await?
            .ok_or_else(AppError::invalid_token)?;

        self.sessions.revoke_all(account.id).await?;
        let session_token = self.sessions.login(&account).await?;

        metrics::counter!("recovery_completed_total").increment(1);
        tracing::info!(account_id = account.id, "Password reset completed");

        Ok(SignedIn {
            account,
            session_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{RecoveryState, Session};
    use crate::domain::repositories::{MockAccountRepository, MockSessionRepository};
    use crate::infrastructure::mail::MockMailer;
    use std::sync::Mutex;

    const BASE_URL: &str = "http://localhost:3000";

    fn account(reset: Option<PendingReset>) -> Account {
        Account::new(
            1,
            "Wes".to_string(),
            "wes@example.com".to_string(),
            "$argon2id$old".to_string(),
            reset,
            Utc::now(),
        )
    }

    fn live_reset(token: &str) -> PendingReset {
        PendingReset::issue(token.to_string(), Utc::now(), Duration::hours(1))
    }

    fn sessions(expect_revoke: bool, expect_login: bool) -> Arc<SessionService> {
        let mut repo = MockSessionRepository::new();
        repo.expect_delete_for_account()
            .times(usize::from(expect_revoke))
            .returning(|_| Ok(2));
        repo.expect_create()
            .times(usize::from(expect_login))
            .returning(|account_id, hash, expires_at| {
                Ok(Session {
                    id: 1,
                    account_id,
                    token_hash: hash.to_string(),
                    created_at: Utc::now(),
                    expires_at,
                })
            });

        Arc::new(SessionService::new(
            Arc::new(repo),
            Arc::new(MockAccountRepository::new()),
            "secret".to_string(),
            Duration::hours(1),
        ))
    }

    fn service(
        accounts: MockAccountRepository,
        mailer: MockMailer,
        sessions: Arc<SessionService>,
    ) -> RecoveryService {
        RecoveryService::new(
            Arc::new(accounts),
            Arc::new(mailer),
            sessions,
            format!("{BASE_URL}/"),
            Duration::hours(1),
        )
    }

    #[tokio::test]
    async fn test_request_recovery_saves_token_and_mails_link() {
        let saved: Arc<Mutex<Option<PendingReset>>> = Arc::new(Mutex::new(None));
        let saved_in_repo = saved.clone();

        let mut accounts = MockAccountRepository::new();
        accounts
            .expect_find_by_email()
            .withf(|email| email == "wes@example.com")
            .times(1)
            .returning(|_| Ok(Some(account(None))));
        accounts
            .expect_save_reset()
            .times(1)
            .returning(move |_, reset| {
                *saved_in_repo.lock().unwrap() = Some(reset.clone());
                Ok(())
            });

        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .withf(|mail| {
                mail.recipient == "wes@example.com"
                    && mail.template == MailTemplate::PasswordReset
                    && mail.reset_url.starts_with("http://localhost:3000/account/reset/")
            })
            .times(1)
            .returning(|_| Ok(()));

        let svc = service(accounts, mailer, sessions(false, false));
        let outcome = svc.request_recovery("  WES@example.com").await.unwrap();

        assert_eq!(outcome, RESET_REQUESTED_MESSAGE);

        let reset = saved.lock().unwrap().clone().unwrap();
        assert_eq!(reset.token.len(), 40);
        assert!(reset.expires_at > Utc::now());
        assert!(reset.expires_at <= Utc::now() + Duration::hours(1));
    }

    #[tokio::test]
    async fn test_request_recovery_unknown_email_same_outcome() {
        let mut accounts = MockAccountRepository::new();
        accounts.expect_find_by_email().returning(|_| Ok(None));
        accounts.expect_save_reset().times(0);

        let mut mailer = MockMailer::new();
        mailer.expect_send().times(0);

        let svc = service(accounts, mailer, sessions(false, false));
        let outcome = svc.request_recovery("ghost@example.com").await.unwrap();

        assert_eq!(outcome, RESET_REQUESTED_MESSAGE);
    }

    #[tokio::test]
    async fn test_request_recovery_permanent_mail_failure_is_not_retried() {
        let mut accounts = MockAccountRepository::new();
        accounts
            .expect_find_by_email()
            .returning(|_| Ok(Some(account(None))));
        accounts.expect_save_reset().times(1).returning(|_, _| Ok(()));

        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .times(1)
            .returning(|_| Err(MailError::InvalidAddress("wes@".to_string())));

        let svc = service(accounts, mailer, sessions(false, false));
        let result = svc.request_recovery("wes@example.com").await;

        assert!(matches!(result.unwrap_err(), AppError::MailDelivery { .. }));
    }

    #[tokio::test]
    async fn test_request_recovery_save_failure_skips_mail() {
        let mut accounts = MockAccountRepository::new();
        accounts
            .expect_find_by_email()
            .returning(|_| Ok(Some(account(None))));
        accounts
            .expect_save_reset()
            .returning(|_, _| Err(AppError::internal("Database error", json!({}))));

        let mut mailer = MockMailer::new();
        mailer.expect_send().times(0);

        let svc = service(accounts, mailer, sessions(false, false));
        let result = svc.request_recovery("wes@example.com").await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_validate_accepts_live_token() {
        let mut accounts = MockAccountRepository::new();
        accounts
            .expect_find_by_reset_token()
            .withf(|token| token == "abc")
            .returning(|token| Ok(Some(account(Some(live_reset(token))))));

        let svc = service(accounts, MockMailer::new(), sessions(false, false));
        let found = svc.validate_recovery_token("abc").await.unwrap();

        assert_eq!(found.recovery_state(), RecoveryState::RecoveryRequested);
    }

    #[tokio::test]
    async fn test_validate_rejects_expired_token_with_matching_string() {
        let mut accounts = MockAccountRepository::new();
        accounts.expect_find_by_reset_token().returning(|token| {
            Ok(Some(account(Some(PendingReset {
                token: token.to_string(),
                expires_at: Utc::now() - Duration::seconds(1),
            }))))
        });

        let svc = service(accounts, MockMailer::new(), sessions(false, false));
        let result = svc.validate_recovery_token("abc").await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::InvalidOrExpiredToken { .. }
        ));
    }

    #[tokio::test]
    async fn test_validate_rejects_unknown_token() {
        let mut accounts = MockAccountRepository::new();
        accounts.expect_find_by_reset_token().returning(|_| Ok(None));

        let svc = service(accounts, MockMailer::new(), sessions(false, false));

        assert!(matches!(
            svc.validate_recovery_token("nope").await.unwrap_err(),
            AppError::InvalidOrExpiredToken { .. }
        ));
    }

    #[tokio::test]
    async fn test_complete_mismatched_passwords_touches_nothing() {
        let mut accounts = MockAccountRepository::new();
        accounts.expect_find_by_reset_token().times(0);
        accounts.expect_complete_reset().times(0);

        let svc = service(accounts, MockMailer::new(), sessions(false, false));
        let result = svc
            .complete_recovery("abc", "new-password", "other-password")
            .await;

        match result.unwrap_err() {
            AppError::Validation { message, .. } => assert_eq!(message, "Passwords do not match!"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_complete_recovery_clears_token_and_logs_in() {
        let mut accounts = MockAccountRepository::new();
        accounts
            .expect_find_by_reset_token()
            .returning(|token| Ok(Some(account(Some(live_reset(token))))));
        accounts
            .expect_complete_reset()
            .withf(|account_id, token, hash, _| {
                *account_id == 1 && token == "abc" && hash.starts_with("$argon2id$")
            })
            .times(1)
            .returning(|_, _, hash, _| {
                let mut updated = account(None);
                updated.password_hash = hash.to_string();
                Ok(Some(updated))
            });

        let svc = service(accounts, MockMailer::new(), sessions(true, true));
        let signed_in = svc
            .complete_recovery("abc", "new-password", "new-password")
            .await
            .unwrap();

        assert!(signed_in.account.reset.is_none());
        assert_eq!(signed_in.account.recovery_state(), RecoveryState::Normal);
        assert!(!signed_in.session_token.is_empty());
    }

    #[tokio::test]
    async fn test_complete_recovery_loses_race_cleanly() {
        let mut accounts = MockAccountRepository::new();
        accounts
            .expect_find_by_reset_token()
            .returning(|token| Ok(Some(account(Some(live_reset(token))))));
        accounts
            .expect_complete_reset()
            .times(1)
            .returning(|_, _, _, _| Ok(None));

        let svc = service(accounts, MockMailer::new(), sessions(false, false));
        let result = svc
            .complete_recovery("abc", "new-password", "new-password")
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::InvalidOrExpiredToken { .. }
        ));
    }

    #[tokio::test]
    async fn test_issue_reset_link_unknown_email() {
        let mut accounts = MockAccountRepository::new();
        accounts.expect_find_by_email().returning(|_| Ok(None));

        let svc = service(accounts, MockMailer::new(), sessions(false, false));

        assert!(matches!(
            svc.issue_reset_link("ghost@example.com").await.unwrap_err(),
            AppError::NotFound { .. }
        ));
    }

    #[test]
    fn test_reset_url_strips_trailing_slash() {
        let svc = service(
            MockAccountRepository::new(),
            MockMailer::new(),
            sessions(false, false),
        );

        assert_eq!(
            svc.reset_url("abc"),
            "http://localhost:3000/account/reset/abc"
        );
    }
}

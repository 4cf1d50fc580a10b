//! Account registration and credential login.

use serde_json::json;
use std::sync::Arc;
use validator::ValidateEmail;

use super::session_service::SessionService;
use crate::domain::entities::{Account, NewAccount, normalize_email};
use crate::domain::repositories::AccountRepository;
use crate::error::AppError;
use crate::utils::db_error::{ACCOUNT_EMAIL_CONSTRAINT, is_unique_violation_on};
use crate::utils::password::{hash_password, validate_password, verify_password};

/// Input collected by the registration form.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// An authenticated account together with the raw token of its new session.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub account: Account,
    pub session_token: String,
}

/// Service for registering accounts and exchanging credentials for a session.
pub struct AuthService {
    accounts: Arc<dyn AccountRepository>,
    sessions: Arc<SessionService>,
}

impl AuthService {
    /// Creates a new authentication service.
    pub fn new(accounts: Arc<dyn AccountRepository>, sessions: Arc<SessionService>) -> Self {
        Self { accounts, sessions }
    }

    /// Creates an account and logs it in.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - Name is blank
    /// - Email is malformed
    /// - Password is too short or does not match its confirmation
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    pub async fn register(&self, registration: Registration) -> Result<SignedIn, AppError> {
        let name = registration.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::bad_request(
                "You must supply a name",
                json!({ "field": "name" }),
            ));
        }

        let email = normalize_email(&registration.email);
        if !email.validate_email() {
            return Err(AppError::bad_request(
                "That email is not valid",
                json!({ "field": "email" }),
            ));
        }

        if registration.password != registration.confirm_password {
            return Err(AppError::bad_request(
                "Passwords do not match",
                json!({ "field": "confirm_password" }),
            ));
        }

        validate_password(&registration.password).map_err(|e| {
            AppError::bad_request(e.to_string(), json!({ "field": "password" }))
        })?;

        let password_hash = hash_password(&registration.password)
            .map_err(|e| AppError::internal(e.to_string(), json!({})))?;

        let account = self
            .accounts
            .create(NewAccount {
                name,
                email: email.clone(),
                password_hash,
            })
            .await
            .map_err(|e| {
                if is_unique_violation_on(&e, ACCOUNT_EMAIL_CONSTRAINT) {
                    AppError::conflict(
                        "An account with that email already exists",
                        json!({ "email": email }),
                    )
                } else {
                    e
                }
            })?;

        tracing::info!(account_id = account.id, "Account registered");

        let session_token = self.sessions.login(&account).await?;
        Ok(SignedIn {
            account,
            session_token,
        })
    }

    /// Verifies credentials and starts a session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for an unknown email and for a wrong
    /// password alike.
    pub async fn login(&self, email: &str, password: &str) -> Result<SignedIn, AppError> {
        let account = self
            .accounts
            .find_by_email(&normalize_email(email))
            .await?
            .filter(|account| verify_password(password, &account.password_hash))
            .ok_or_else(|| AppError::unauthorized("Failed Login!", json!({})))?;

        let session_token = self.sessions.login(&account).await?;
        Ok(SignedIn {
            account,
            session_token,
        })
    }

    /// Ends the session identified by `token`.
    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        self.sessions.logout(token).await
    }
}

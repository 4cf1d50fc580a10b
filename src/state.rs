//! Shared application state injected into every handler.

use chrono::Duration;
use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{AuthService, RecoveryService, SessionService, StoreService};
use crate::config::Config;
use crate::domain::repositories::AccountRepository;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::mail::Mailer;
use crate::infrastructure::persistence::{
    PgAccountRepository, PgReviewRepository, PgSessionRepository, PgStoreRepository,
};

/// Services shared by the JSON API, the HTML pages and the middleware.
///
/// Cheap to clone: every field is an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub session_service: Arc<SessionService>,
    pub recovery_service: Arc<RecoveryService>,
    pub store_service: Arc<StoreService>,
    pub cache: Arc<dyn CacheService>,
    /// Adds the `Secure` attribute to cookies; true when served over HTTPS.
    pub secure_cookies: bool,
}

impl AppState {
    /// Wires PostgreSQL repositories into the services.
    pub fn new(
        pool: Arc<PgPool>,
        cache: Arc<dyn CacheService>,
        mailer: Arc<dyn Mailer>,
        config: &Config,
    ) -> Self {
        let accounts: Arc<dyn AccountRepository> = Arc::new(PgAccountRepository::new(pool.clone()));
        let sessions = Arc::new(PgSessionRepository::new(pool.clone()));
        let stores = Arc::new(PgStoreRepository::new(pool.clone()));
        let reviews = Arc::new(PgReviewRepository::new(pool));

        let session_service = Arc::new(SessionService::new(
            sessions,
            accounts.clone(),
            config.session_signing_secret.clone(),
            Duration::hours(config.session_ttl_hours),
        ));

        Self {
            auth_service: Arc::new(AuthService::new(accounts.clone(), session_service.clone())),
            recovery_service: Arc::new(RecoveryService::new(
                accounts,
                mailer,
                session_service.clone(),
                config.public_base_url.clone(),
                Duration::seconds(config.reset_token_ttl_seconds),
            )),
            store_service: Arc::new(StoreService::new(stores, reviews, cache.clone())),
            session_service,
            cache,
            secure_cookies: config.public_base_url.starts_with("https://"),
        }
    }
}

#[cfg(test)]
impl AppState {
    /// State backed by mock repositories, for handler tests without a database.
    pub(crate) fn with_mocks(
        accounts: crate::domain::repositories::MockAccountRepository,
        sessions: crate::domain::repositories::MockSessionRepository,
        stores: crate::domain::repositories::MockStoreRepository,
        reviews: crate::domain::repositories::MockReviewRepository,
        mailer: crate::infrastructure::mail::MockMailer,
    ) -> Self {
        let accounts: Arc<dyn AccountRepository> = Arc::new(accounts);
        let cache: Arc<dyn CacheService> = Arc::new(crate::infrastructure::cache::NullCache::new());

        let session_service = Arc::new(SessionService::new(
            Arc::new(sessions),
            accounts.clone(),
            "test-signing-secret".to_string(),
            Duration::hours(1),
        ));

        Self {
            auth_service: Arc::new(AuthService::new(accounts.clone(), session_service.clone())),
            recovery_service: Arc::new(RecoveryService::new(
                accounts,
                Arc::new(mailer),
                session_service.clone(),
                "http://localhost:3000".to_string(),
                Duration::hours(1),
            )),
            store_service: Arc::new(StoreService::new(
                Arc::new(stores),
                Arc::new(reviews),
                cache.clone(),
            )),
            session_service,
            cache,
            secure_cookies: false,
        }
    }
}

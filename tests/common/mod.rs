#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Duration;
use sqlx::PgPool;
use std::sync::{Arc, Mutex};
use store_directory::application::services::{
    AuthService, RecoveryService, SessionService, StoreService,
};
use store_directory::domain::entities::Account;
use store_directory::domain::repositories::AccountRepository;
use store_directory::infrastructure::cache::NullCache;
use store_directory::infrastructure::mail::{MailError, Mailer, OutgoingMail};
use store_directory::infrastructure::persistence::{
    PgAccountRepository, PgReviewRepository, PgSessionRepository, PgStoreRepository,
};
use store_directory::state::AppState;
use store_directory::utils::password::hash_password;

pub const TEST_BASE_URL: &str = "http://localhost:3000";

/// Mailer that keeps every message for later inspection.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutgoingMail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(mail);
        Ok(())
    }
}

pub async fn create_test_account(pool: &PgPool, name: &str, email: &str, password: &str) -> i64 {
    let hash = hash_password(password).unwrap();
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO accounts (name, email, password_hash) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(name)
    .bind(email)
    .bind(hash)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_store(pool: &PgPool, author_id: i64, name: &str, slug: &str, tags: &[&str]) -> i64 {
    let tags: Vec<String> = tags.iter().map(|t| t.to_string()).collect();
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO stores (name, slug, tags, longitude, latitude, address, author_id)
        VALUES ($1, $2, $3, 0, 0, '1 Main St', $4)
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(slug)
    .bind(tags)
    .bind(author_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_store_at(
    pool: &PgPool,
    author_id: i64,
    slug: &str,
    longitude: f64,
    latitude: f64,
) -> i64 {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO stores (name, slug, longitude, latitude, address, author_id)
        VALUES ($1, $1, $2, $3, '1 Main St', $4)
        RETURNING id
        "#,
    )
    .bind(slug)
    .bind(longitude)
    .bind(latitude)
    .bind(author_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_review(pool: &PgPool, store_id: i64, author_id: i64, rating: i16) {
    sqlx::query("INSERT INTO reviews (store_id, author_id, text, rating) VALUES ($1, $2, 'ok', $3)")
        .bind(store_id)
        .bind(author_id)
        .bind(rating)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn load_account(pool: &PgPool, id: i64) -> Account {
    PgAccountRepository::new(Arc::new(pool.clone()))
        .find_by_id(id)
        .await
        .unwrap()
        .unwrap()
}

pub fn create_test_state(pool: PgPool) -> AppState {
    create_test_state_with_mailer(pool, Arc::new(RecordingMailer::default()))
}

pub fn create_test_state_with_mailer(pool: PgPool, mailer: Arc<dyn Mailer>) -> AppState {
    let pool = Arc::new(pool);

    let accounts: Arc<dyn AccountRepository> = Arc::new(PgAccountRepository::new(pool.clone()));
    let sessions = Arc::new(PgSessionRepository::new(pool.clone()));
    let stores = Arc::new(PgStoreRepository::new(pool.clone()));
    let reviews = Arc::new(PgReviewRepository::new(pool));
    let cache = Arc::new(NullCache::new());

    let session_service = Arc::new(SessionService::new(
        sessions,
        accounts.clone(),
        "test-signing-secret".to_string(),
        Duration::hours(1),
    ));

    AppState {
        auth_service: Arc::new(AuthService::new(accounts.clone(), session_service.clone())),
        recovery_service: Arc::new(RecoveryService::new(
            accounts,
            mailer,
            session_service.clone(),
            TEST_BASE_URL.to_string(),
            Duration::hours(1),
        )),
        store_service: Arc::new(StoreService::new(stores, reviews, cache.clone())),
        session_service,
        cache,
        secure_cookies: false,
    }
}

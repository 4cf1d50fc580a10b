mod common;

use chrono::{Duration, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use store_directory::domain::repositories::SessionRepository;
use store_directory::infrastructure::persistence::PgSessionRepository;

#[sqlx::test]
async fn test_create_and_find_active(pool: PgPool) {
    let account_id = common::create_test_account(&pool, "Wes", "wes@example.com", "password1").await;
    let repo = PgSessionRepository::new(Arc::new(pool));

    repo.create(account_id, "hash-1", Utc::now() + Duration::hours(1))
        .await
        .unwrap();

    let session = repo.find_active("hash-1").await.unwrap().unwrap();
    assert_eq!(session.account_id, account_id);
}

#[sqlx::test]
async fn test_expired_session_is_not_active(pool: PgPool) {
    let account_id = common::create_test_account(&pool, "Wes", "wes@example.com", "password1").await;
    let repo = PgSessionRepository::new(Arc::new(pool));

    repo.create(account_id, "stale", Utc::now() - Duration::seconds(1))
        .await
        .unwrap();

    assert!(repo.find_active("stale").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_delete_for_account(pool: PgPool) {
    let wes = common::create_test_account(&pool, "Wes", "wes@example.com", "password1").await;
    let other = common::create_test_account(&pool, "Ana", "ana@example.com", "password1").await;
    let repo = PgSessionRepository::new(Arc::new(pool));
    let expires = Utc::now() + Duration::hours(1);

    repo.create(wes, "a", expires).await.unwrap();
    repo.create(wes, "b", expires).await.unwrap();
    repo.create(other, "c", expires).await.unwrap();

    let removed = repo.delete_for_account(wes).await.unwrap();

    assert_eq!(removed, 2);
    assert!(repo.find_active("a").await.unwrap().is_none());
    assert!(repo.find_active("c").await.unwrap().is_some());
}

#[sqlx::test]
async fn test_delete_unknown_is_ok(pool: PgPool) {
    let repo = PgSessionRepository::new(Arc::new(pool));

    assert!(repo.delete("never-existed").await.is_ok());
}

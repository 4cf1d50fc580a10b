mod common;

use chrono::{Duration, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use store_directory::application::services::RESET_REQUESTED_MESSAGE;
use store_directory::domain::entities::RecoveryState;
use store_directory::error::AppError;

async fn reset_token(pool: &PgPool, account_id: i64) -> Option<String> {
    sqlx::query_scalar::<_, Option<String>>("SELECT reset_token FROM accounts WHERE id = $1")
        .bind(account_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test]
async fn test_full_recovery_flow(pool: PgPool) {
    let account_id = common::create_test_account(&pool, "Wes", "wes@example.com", "old-password").await;
    let mailer = Arc::new(common::RecordingMailer::default());
    let state = common::create_test_state_with_mailer(pool.clone(), mailer.clone());

    let message = state
        .recovery_service
        .request_recovery("WES@example.com ")
        .await
        .unwrap();
    assert_eq!(message, RESET_REQUESTED_MESSAGE);

    let token = reset_token(&pool, account_id).await.unwrap();
    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, "wes@example.com");
    assert_eq!(
        sent[0].reset_url,
        format!("{}/account/reset/{token}", common::TEST_BASE_URL)
    );

    let account = state
        .recovery_service
        .validate_recovery_token(&token)
        .await
        .unwrap();
    assert_eq!(account.recovery_state(), RecoveryState::RecoveryRequested);

    let signed_in = state
        .recovery_service
        .complete_recovery(&token, "new-password", "new-password")
        .await
        .unwrap();
    assert_eq!(signed_in.account.id, account_id);
    assert_eq!(signed_in.account.recovery_state(), RecoveryState::Normal);
    assert!(reset_token(&pool, account_id).await.is_none());

    // The token is single use; the new password logs in, the old one does not.
    let reused = state
        .recovery_service
        .complete_recovery(&token, "another-pass", "another-pass")
        .await;
    assert!(matches!(reused, Err(AppError::InvalidOrExpiredToken { .. })));

    assert!(
        state
            .auth_service
            .login("wes@example.com", "new-password")
            .await
            .is_ok()
    );
    assert!(
        state
            .auth_service
            .login("wes@example.com", "old-password")
            .await
            .is_err()
    );
}

#[sqlx::test]
async fn test_unknown_email_writes_nothing(pool: PgPool) {
    let account_id = common::create_test_account(&pool, "Wes", "wes@example.com", "old-password").await;
    let mailer = Arc::new(common::RecordingMailer::default());
    let state = common::create_test_state_with_mailer(pool.clone(), mailer.clone());

    let message = state
        .recovery_service
        .request_recovery("ghost@example.com")
        .await
        .unwrap();

    assert_eq!(message, RESET_REQUESTED_MESSAGE);
    assert!(mailer.sent().is_empty());
    assert!(reset_token(&pool, account_id).await.is_none());
}

#[sqlx::test]
async fn test_expired_token_is_rejected(pool: PgPool) {
    let account_id = common::create_test_account(&pool, "Wes", "wes@example.com", "old-password").await;
    sqlx::query("UPDATE accounts SET reset_token = 'feed', reset_expires_at = $2 WHERE id = $1")
        .bind(account_id)
        .bind(Utc::now() - Duration::seconds(1))
        .execute(&pool)
        .await
        .unwrap();
    let state = common::create_test_state(pool.clone());

    let validated = state.recovery_service.validate_recovery_token("feed").await;
    let completed = state
        .recovery_service
        .complete_recovery("feed", "new-password", "new-password")
        .await;

    assert!(matches!(validated, Err(AppError::InvalidOrExpiredToken { .. })));
    assert!(matches!(completed, Err(AppError::InvalidOrExpiredToken { .. })));
    assert_eq!(reset_token(&pool, account_id).await.as_deref(), Some("feed"));
}

#[sqlx::test]
async fn test_reset_revokes_existing_sessions(pool: PgPool) {
    common::create_test_account(&pool, "Wes", "wes@example.com", "old-password").await;
    let state = common::create_test_state(pool.clone());

    let before = state
        .auth_service
        .login("wes@example.com", "old-password")
        .await
        .unwrap();

    let link = state
        .recovery_service
        .issue_reset_link("wes@example.com")
        .await
        .unwrap();
    let token = link.rsplit('/').next().unwrap().to_string();

    let after = state
        .recovery_service
        .complete_recovery(&token, "new-password", "new-password")
        .await
        .unwrap();

    assert!(
        state
            .session_service
            .authenticate(&before.session_token)
            .await
            .is_err()
    );
    assert!(
        state
            .session_service
            .authenticate(&after.session_token)
            .await
            .is_ok()
    );
}

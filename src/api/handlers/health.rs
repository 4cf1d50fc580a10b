//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected, 42 stores" },
///     "cache": { "status": "ok", "message": "Cache reachable" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let (database, cache) = tokio::join!(check_database(&state), check_cache(&state));

    let all_healthy = database.is_ok() && cache.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { database, cache },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks database connectivity by counting stores.
async fn check_database(state: &AppState) -> CheckStatus {
    match state.store_service.count_stores().await {
        Ok(count) => CheckStatus::ok(format!("Connected, {count} stores")),
        Err(e) => CheckStatus::error(format!("Database error: {e}")),
    }
}

/// Checks cache connectivity via PING command.
async fn check_cache(state: &AppState) -> CheckStatus {
    if state.cache.health_check().await {
        CheckStatus::ok("Cache reachable")
    } else {
        CheckStatus::error("Cache connection failed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{
        MockAccountRepository, MockReviewRepository, MockSessionRepository, MockStoreRepository,
    };
    use crate::error::AppError;
    use crate::infrastructure::mail::MockMailer;
    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use serde_json::json;

    fn server(stores: MockStoreRepository) -> TestServer {
        let state = AppState::with_mocks(
            MockAccountRepository::new(),
            MockSessionRepository::new(),
            stores,
            MockReviewRepository::new(),
            MockMailer::new(),
        );
        let app = Router::new()
            .route("/health", get(health_handler))
            .with_state(state);
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_database_failure_is_degraded() {
        let mut stores = MockStoreRepository::new();
        stores
            .expect_count()
            .returning(|| Err(AppError::internal("Database error", json!({}))));

        let response = server(stores).get("/health").await;

        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        let body = response.json::<serde_json::Value>();
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["checks"]["database"]["status"], "error");
        assert_eq!(body["checks"]["cache"]["status"], "ok");
    }

    #[tokio::test]
    async fn test_healthy_reports_store_count() {
        let mut stores = MockStoreRepository::new();
        stores.expect_count().returning(|| Ok(3));

        let response = server(stores).get("/health").await;

        response.assert_status_ok();
        let body = response.json::<serde_json::Value>();
        assert_eq!(body["checks"]["database"]["message"], "Connected, 3 stores");
    }
}

mod common;

use axum::Router;
use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use serde_json::json;
use sqlx::PgPool;
use store_directory::api;

fn server(state: store_directory::AppState) -> TestServer {
    let app = Router::new()
        .nest("/api", api::routes::router(state.clone()))
        .with_state(state);
    TestServer::new(app).unwrap()
}

fn bearer(token: &str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("authorization"),
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
    )
}

#[sqlx::test]
async fn test_create_then_fetch_by_slug(pool: PgPool) {
    common::create_test_account(&pool, "Wes", "wes@example.com", "password1").await;
    let state = common::create_test_state(pool);
    let session = state
        .auth_service
        .login("wes@example.com", "password1")
        .await
        .unwrap();
    let server = server(state);
    let (name, value) = bearer(&session.session_token);

    let body = json!({
        "name": "Coffee & Co.",
        "description": "Espresso",
        "tags": ["Wifi"],
        "location": { "longitude": -79.4, "latitude": 43.6, "address": "1 Main St" }
    });

    let first = server
        .post("/api/stores")
        .add_header(name.clone(), value.clone())
        .json(&body)
        .await;
    let second = server
        .post("/api/stores")
        .add_header(name, value)
        .json(&body)
        .await;

    first.assert_status(axum::http::StatusCode::CREATED);
    assert_eq!(first.json::<serde_json::Value>()["slug"], "coffee-and-co");
    assert_eq!(second.json::<serde_json::Value>()["slug"], "coffee-and-co-2");

    let fetched = server.get("/api/stores/coffee-and-co-2").await;
    fetched.assert_status_ok();
    assert_eq!(fetched.json::<serde_json::Value>()["name"], "Coffee & Co.");

    let tags = server.get("/api/tags").await.json::<serde_json::Value>();
    assert_eq!(tags[0]["tag"], "Wifi");
    assert_eq!(tags[0]["count"], 2);
}

#[sqlx::test]
async fn test_create_without_session_is_unauthorized(pool: PgPool) {
    let server = server(common::create_test_state(pool));

    let response = server
        .post("/api/stores")
        .json(&json!({
            "name": "Bakery",
            "location": { "longitude": 0.0, "latitude": 0.0, "address": "1 Main St" }
        }))
        .await;

    response.assert_status_unauthorized();
}

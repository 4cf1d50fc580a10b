//! HTML route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    add_store_page, add_store_submit, forgot_submit, heart_submit, hearts_page, login_page,
    login_submit, logout_submit, map_page, register_submit, reset_page, reset_submit,
    review_submit, store_page, stores_page, tag_page, tags_page, top_page,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Pages readable without a session.
///
/// # Endpoints
///
/// - `GET  /`              - Listings, first page
/// - `GET  /stores`        - Listings, `?page=N`
/// - `GET  /store/{slug}`  - One listing with reviews
/// - `GET  /tags`          - Tag cloud
/// - `GET  /tags/{tag}`    - Tag cloud with matching listings
/// - `GET  /top`           - Top-rated listings
/// - `GET  /map`           - Listings near `?lng=&lat=`
/// - `GET  /login`         - Login, registration and forgotten-password forms
/// - `POST /logout`        - End the session
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(stores_page))
        .route("/stores", get(stores_page))
        .route("/store/{slug}", get(store_page))
        .route("/tags", get(tags_page))
        .route("/tags/{tag}", get(tag_page))
        .route("/top", get(top_page))
        .route("/map", get(map_page))
        .route("/login", get(login_page))
        .route("/logout", post(logout_submit))
}

/// Credential and recovery endpoints, rate limited more strictly.
///
/// # Endpoints
///
/// - `POST /login`                  - Sign in
/// - `POST /register`               - Create an account
/// - `POST /account/forgot`         - Mail a reset link
/// - `GET  /account/reset/{token}`  - New-password form
/// - `POST /account/reset/{token}`  - Set the new password
pub fn credential_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login_submit))
        .route("/register", post(register_submit))
        .route("/account/forgot", post(forgot_submit))
        .route("/account/reset/{token}", get(reset_page).post(reset_submit))
}

/// Pages requiring a session.
///
/// Protected via [`crate::web::middleware::web_auth`], which redirects
/// anonymous visitors to `/login`.
///
/// # Endpoints
///
/// - `GET  /add`           - Add-listing form
/// - `POST /add`           - Create a listing
/// - `POST /reviews/{id}`  - Review a listing
/// - `GET  /hearts`        - Hearted listings
/// - `POST /hearts/{id}`   - Heart or un-heart a listing
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/add", get(add_store_page).post(add_store_submit))
        .route("/reviews/{id}", post(review_submit))
        .route("/hearts", get(hearts_page))
        .route("/hearts/{id}", post(heart_submit))
}

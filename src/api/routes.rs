//! API route configuration.
//!
//! Reads are public. Writes go through [`crate::api::middleware::auth`], which
//! accepts a Bearer token or the session cookie.
//!
//! `{store}` is the slug on reads and the numeric id on writes; both share one
//! path segment so the router sees a single parameter name.

use crate::api::handlers::{
    create_review_handler, create_store_handler, get_store_handler, heart_handler,
    list_stores_handler, near_handler, search_handler, tags_handler, top_handler,
    update_store_handler,
};
use crate::api::middleware::auth;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

/// Routes readable without a session.
///
/// # Endpoints
///
/// - `GET /stores`          - Paginated listings with reviews
/// - `GET /stores/near`    - Listings near `?lng=&lat=`
/// - `GET /stores/{slug}`   - One listing with reviews
/// - `GET /tags`            - Tag frequencies
/// - `GET /top`             - Top-rated listings
/// - `GET /search`          - Name/description search
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/stores", get(list_stores_handler))
        .route("/stores/near", get(near_handler))
        .route("/stores/{store}", get(get_store_handler))
        .route("/tags", get(tags_handler))
        .route("/top", get(top_handler))
        .route("/search", get(search_handler))
}

/// Routes requiring an authenticated account.
///
/// # Endpoints
///
/// - `POST  /stores`                - Create a listing
/// - `PATCH /stores/{id}`           - Update own listing
/// - `POST  /stores/{id}/reviews`   - Review a listing
/// - `POST  /stores/{id}/heart`     - Heart or un-heart a listing
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/stores", post(create_store_handler))
        .route("/stores/{store}", patch(update_store_handler))
        .route("/stores/{store}/reviews", post(create_review_handler))
        .route("/stores/{store}/heart", post(heart_handler))
}

/// Public and protected API routes with authentication applied.
pub fn router(state: AppState) -> Router<AppState> {
    let protected =
        protected_routes().route_layer(middleware::from_fn_with_state(state, auth::layer));

    public_routes().merge(protected)
}

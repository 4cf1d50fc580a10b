//! Cookie-based authentication middleware for HTML pages.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::state::AppState;
use crate::utils::cookie::{SESSION_COOKIE, read_cookie};
use crate::web::flash::{Flash, redirect_with_flash};

/// Authenticates page requests using the session cookie.
///
/// # Cookie Format
///
/// ```text
/// Cookie: session_token=<token>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract `session_token` cookie from request
/// 2. Resolve it via [`crate::application::services::SessionService`]
/// 3. On success, insert the account into request extensions and continue
/// 4. On failure or missing cookie, redirect to `/login` with a flash message
///
/// # Differences from API Auth
///
/// Unlike the API auth middleware which returns `401 Unauthorized`,
/// this middleware redirects to the login page for a better user experience
/// in a browser context.
pub async fn layer(State(st): State<AppState>, mut req: Request, next: Next) -> Response {
    let account = match read_cookie(req.headers(), SESSION_COOKIE) {
        Some(token) => st.session_service.authenticate(&token).await.ok(),
        None => None,
    };

    match account {
        Some(account) => {
            req.extensions_mut().insert(account);
            next.run(req).await
        }
        None => redirect_with_flash(
            "/login",
            Flash::error("Oops, you must be logged in to do that!"),
        ),
    }
}

//! Session authentication middleware for the JSON API.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::utils::cookie::{SESSION_COOKIE, read_cookie};
use crate::{error::AppError, state::AppState};

/// Authenticates requests by session token and exposes the account.
///
/// # Token Sources
///
/// ```text
/// Authorization: Bearer <token>
/// Cookie: session_token=<token>
/// ```
///
/// The header wins when both are present. On success the resolved
/// [`crate::domain::entities::Account`] is inserted into request extensions
/// for handlers to pick up with `Extension<Account>`.
///
/// # Errors
///
/// Returns `401 Unauthorized` if:
/// - Neither header nor cookie carries a token
/// - Token is unknown or expired
///
/// Adds `WWW-Authenticate: Bearer` header to 401 responses per RFC 6750.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let token = match AuthBearer::from_request_parts(&mut parts, &()).await {
        Ok(AuthBearer(token)) => Some(token),
        Err(_) => read_cookie(&parts.headers, SESSION_COOKIE),
    }
    .ok_or_else(|| {
        AppError::unauthorized(
            "Unauthorized",
            serde_json::json!({"reason": "Authorization header or session cookie is missing"}),
        )
    })?;

    let account = st.session_service.authenticate(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(account);

    Ok(next.run(req).await)
}

//! Optional session lookup for pages that render differently when signed in.

use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

use crate::domain::entities::Account;
use crate::state::AppState;
use crate::utils::cookie::{SESSION_COOKIE, read_cookie};

/// The signed-in account, or `None` for anonymous visitors.
///
/// Never rejects: an unknown or expired session simply reads as anonymous.
/// Routes that require a session use [`crate::web::middleware::web_auth`] instead.
#[derive(Debug, Clone, Default)]
pub struct CurrentUser(pub Option<Account>);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(account) = parts.extensions.get::<Account>() {
            return Ok(Self(Some(account.clone())));
        }

        let Some(token) = read_cookie(&parts.headers, SESSION_COOKIE) else {
            return Ok(Self(None));
        };

        Ok(Self(state.session_service.authenticate(&token).await.ok()))
    }
}

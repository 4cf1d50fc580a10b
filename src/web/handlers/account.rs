//! Login, registration and password recovery pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    http::HeaderMap,
    response::Response,
};
use serde::Deserialize;

use crate::application::services::{Registration, SignedIn};
use crate::domain::entities::Account;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::cookie::{SESSION_COOKIE, build_cookie, expired_cookie, read_cookie};
use crate::web::current_user::CurrentUser;
use crate::web::flash::{Flash, IncomingFlash, redirect_with_flash, with_cookie};

/// Login page with registration and forgotten-password forms.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub title: String,
    pub user: Option<Account>,
    pub flash: Option<Flash>,
}

/// New-password form reached from the emailed link.
#[derive(Template, WebTemplate)]
#[template(path = "reset.html")]
pub struct ResetTemplate {
    pub title: String,
    pub user: Option<Account>,
    pub flash: Option<Flash>,
    pub token: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct ForgotForm {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetForm {
    pub password: String,
    pub confirm_password: String,
}

/// Redirects with the new session cookie set.
fn signed_in_redirect(state: &AppState, to: &str, flash: Flash, signed_in: &SignedIn) -> Response {
    let max_age = state.session_service.ttl().num_seconds();
    with_cookie(
        redirect_with_flash(to, flash),
        &build_cookie(
            SESSION_COOKIE,
            &signed_in.session_token,
            max_age,
            state.secure_cookies,
        ),
    )
}

/// Renders the login page.
///
/// # Endpoint
///
/// `GET /login`
pub async fn login_page(CurrentUser(user): CurrentUser, flash: IncomingFlash) -> Response {
    flash.render(LoginTemplate {
        title: "Login".to_string(),
        user,
        flash: flash.0.clone(),
    })
}

/// Exchanges email and password for a session.
///
/// # Endpoint
///
/// `POST /login`
pub async fn login_submit(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    match state.auth_service.login(&form.email, &form.password).await {
        Ok(signed_in) => signed_in_redirect(
            &state,
            "/",
            Flash::success("You are now logged in!"),
            &signed_in,
        ),
        Err(e) => redirect_with_flash("/login", Flash::from(&e)),
    }
}

/// Creates an account and signs it in.
///
/// # Endpoint
///
/// `POST /register`
pub async fn register_submit(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Response {
    let registration = Registration {
        name: form.name,
        email: form.email,
        password: form.password,
        confirm_password: form.confirm_password,
    };

    match state.auth_service.register(registration).await {
        Ok(signed_in) => {
            let welcome = Flash::success(format!("Welcome, {}!", signed_in.account.name));
            signed_in_redirect(&state, "/", welcome, &signed_in)
        }
        Err(e) => redirect_with_flash("/login", Flash::from(&e)),
    }
}

/// Ends the current session.
///
/// # Endpoint
///
/// `POST /logout`
pub async fn logout_submit(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = read_cookie(&headers, SESSION_COOKIE)
        && let Err(e) = state.auth_service.logout(&token).await
    {
        tracing::warn!(error = %e, "Failed to delete session on logout");
    }

    with_cookie(
        redirect_with_flash("/", Flash::success("You are now logged out!")),
        &expired_cookie(SESSION_COOKIE),
    )
}

/// Starts password recovery and mails a reset link.
///
/// The flash is the same whether or not the email is registered.
///
/// # Endpoint
///
/// `POST /account/forgot`
pub async fn forgot_submit(
    State(state): State<AppState>,
    Form(form): Form<ForgotForm>,
) -> Response {
    match state.recovery_service.request_recovery(&form.email).await {
        Ok(message) => redirect_with_flash("/login", Flash::success(message)),
        Err(e) => redirect_with_flash("/login", Flash::from(&e)),
    }
}

/// Shows the new-password form if the token is still live.
///
/// # Endpoint
///
/// `GET /account/reset/{token}`
pub async fn reset_page(
    State(state): State<AppState>,
    Path(token): Path<String>,
    CurrentUser(user): CurrentUser,
    flash: IncomingFlash,
) -> Response {
    match state.recovery_service.validate_recovery_token(&token).await {
        Ok(account) => flash.render(ResetTemplate {
            title: "Reset your Password".to_string(),
            user,
            flash: flash.0.clone(),
            token,
            name: account.name,
        }),
        Err(e) => redirect_with_flash("/login", Flash::from(&e)),
    }
}

/// Sets the new password, then signs the account in.
///
/// Mismatched or too-short passwords send the user back to the form; a dead
/// token sends them to the login page.
///
/// # Endpoint
///
/// `POST /account/reset/{token}`
pub async fn reset_submit(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Form(form): Form<ResetForm>,
) -> Response {
    match state
        .recovery_service
        .complete_recovery(&token, &form.password, &form.confirm_password)
        .await
    {
        Ok(signed_in) => signed_in_redirect(
            &state,
            "/",
            Flash::success("Nice! Your password has been reset! You are now logged in!"),
            &signed_in,
        ),
        Err(e @ AppError::Validation { .. }) if is_reset_token(&token) => {
            redirect_with_flash(&format!("/account/reset/{token}"), Flash::from(&e))
        }
        Err(e) => redirect_with_flash("/login", Flash::from(&e)),
    }
}

/// Reset tokens are lowercase hex; anything else is not echoed into a URL.
fn is_reset_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_hexdigit())
}

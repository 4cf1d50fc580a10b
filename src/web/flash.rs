//! One-shot flash messages carried in a short-lived cookie.
//!
//! A handler that redirects sets the cookie; the next page rendered reads it,
//! shows it once and expires it.

use axum::{
    extract::FromRequestParts,
    http::{HeaderValue, StatusCode, header, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use std::convert::Infallible;

use crate::error::AppError;
use crate::utils::cookie::{FLASH_COOKIE, build_cookie, expired_cookie, read_cookie};

/// Seconds a flash survives if the redirect target never renders it.
const FLASH_MAX_AGE: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
    Info,
}

impl FlashKind {
    /// CSS modifier used by the templates.
    pub fn css(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }

    fn from_css(value: &str) -> Option<Self> {
        match value {
            "success" => Some(Self::Success),
            "error" => Some(Self::Error),
            "info" => Some(Self::Info),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Info,
            message: message.into(),
        }
    }

    /// Cookie-safe `kind=message` form-encoding.
    fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair(self.kind.css(), &self.message)
            .finish()
    }

    fn decode(raw: &str) -> Option<Self> {
        let (kind, message) = url::form_urlencoded::parse(raw.as_bytes()).next()?;
        Some(Self {
            kind: FlashKind::from_css(&kind)?,
            message: message.into_owned(),
        })
    }
}

impl From<&AppError> for Flash {
    fn from(e: &AppError) -> Self {
        match e {
            AppError::Internal { .. } => Flash::error("Something went wrong. Please try again."),
            other => Flash::error(other.message()),
        }
    }
}

/// Appends a `Set-Cookie` header, skipping values that are not valid header text.
pub fn with_cookie(mut response: Response, cookie: &str) -> Response {
    match HeaderValue::from_str(cookie) {
        Ok(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        Err(e) => tracing::warn!(error = %e, "Dropping malformed cookie"),
    }
    response
}

/// `303 See Other` to `to`, carrying `flash` for the next page.
pub fn redirect_with_flash(to: &str, flash: Flash) -> Response {
    with_cookie(
        Redirect::to(to).into_response(),
        &build_cookie(FLASH_COOKIE, &flash.encode(), FLASH_MAX_AGE, false),
    )
}

/// Flash message sent by the browser, if any.
#[derive(Debug, Clone, Default)]
pub struct IncomingFlash(pub Option<Flash>);

impl IncomingFlash {
    /// Renders `page`, expiring the flash cookie when one was shown.
    pub fn render(&self, page: impl IntoResponse) -> Response {
        let response = page.into_response();
        if self.0.is_some() && response.status() == StatusCode::OK {
            with_cookie(response, &expired_cookie(FLASH_COOKIE))
        } else {
            response
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for IncomingFlash {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(
            read_cookie(&parts.headers, FLASH_COOKIE).and_then(|raw| Flash::decode(&raw)),
        ))
    }
}

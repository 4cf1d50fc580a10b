//! Minimal `Cookie` / `Set-Cookie` header handling.

use axum::http::HeaderMap;
use axum::http::header::COOKIE;

/// Cookie carrying the raw session token.
pub const SESSION_COOKIE: &str = "session_token";

/// Cookie carrying a one-shot flash message.
pub const FLASH_COOKIE: &str = "flash";

/// Returns the value of cookie `name`, if the request sent one.
///
/// Handles multiple cookies in one header and several `Cookie` headers.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name).then(|| value.to_string())
        })
}

/// `Set-Cookie` value for an HTTP-only, same-site cookie.
pub fn build_cookie(name: &str, value: &str, max_age_seconds: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{name}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_seconds}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that deletes cookie `name`.
pub fn expired_cookie(name: &str) -> String {
    format!("{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

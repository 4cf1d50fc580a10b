//! Random token generation.
//!
//! Both token kinds draw from the operating system RNG via `getrandom`.

use base64::Engine as _;

/// Entropy of a password-reset token.
pub const RESET_TOKEN_BYTES: usize = 20;

/// Entropy of a session token.
pub const SESSION_TOKEN_BYTES: usize = 32;

/// Generates a password-reset token: 20 random bytes as 40 lowercase hex characters.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_reset_token() -> String {
    let mut buffer = [0u8; RESET_TOKEN_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    hex::encode(buffer)
}

/// Generates a session token: 32 random bytes as URL-safe base64 without padding.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_session_token() -> String {
    let mut buffer = [0u8; SESSION_TOKEN_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}

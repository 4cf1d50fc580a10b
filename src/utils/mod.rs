//! Utility functions shared across the application.
//!
//! - [`slug`] - URL slug derivation and collision numbering
//! - [`token`] - Random reset and session token generation
//! - [`password`] - Argon2 password hashing
//! - [`db_error`] - Constraint-specific database error checks
//! - [`cookie`] - Session and flash cookie headers

pub mod cookie;
pub mod db_error;
pub mod password;
pub mod slug;
pub mod token;

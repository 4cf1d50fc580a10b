//! HTTP middleware shared by the API and the HTML pages.
//!
//! - [`auth`] - Session check for API writes (Bearer or cookie)
//! - [`rate_limit`] - Per-IP token buckets
//! - [`tracing`] - Request spans with reset tokens redacted

pub mod auth;
pub mod rate_limit;
pub mod tracing;

//! JSON API over listings, reviews and reports.
//!
//! Reads are open to anyone; writes need a session, passed either as a
//! Bearer token or as the browser's session cookie.
//!
//! # Modules
//!
//! - [`dto`] - Request/response bodies and their validation
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Authentication, rate limiting and request tracing
//! - [`routes`] - Route configuration and composition

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

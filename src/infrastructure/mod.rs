//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for persistence, caching and mail delivery.
//!
//! # Modules
//!
//! - [`cache`] - Report caching (Redis and no-op implementations)
//! - [`mail`] - Outbound email (SMTP and log-only implementations)
//! - [`persistence`] - PostgreSQL repository implementations

pub mod cache;
pub mod mail;
pub mod persistence;

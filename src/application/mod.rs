//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services hold repository trait objects and
//! provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Registration and credential login
//! - [`services::session_service::SessionService`] - Session tokens
//! - [`services::recovery_service::RecoveryService`] - Password reset tokens
//! - [`services::store_service::StoreService`] - Listings, reviews and reports

pub mod services;

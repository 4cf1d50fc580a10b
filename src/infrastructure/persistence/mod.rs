//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with
//! runtime-bound parameters and `FromRow` row mapping.
//!
//! # Repositories
//!
//! - [`PgAccountRepository`] - Accounts and reset-token state
//! - [`PgStoreRepository`] - Store listings, slug lookups and grouped reports
//! - [`PgReviewRepository`] - Reviews
//! - [`PgSessionRepository`] - Login sessions

pub mod pg_account_repository;
pub mod pg_review_repository;
pub mod pg_session_repository;
pub mod pg_store_repository;

pub use pg_account_repository::PgAccountRepository;
pub use pg_review_repository::PgReviewRepository;
pub use pg_session_repository::PgSessionRepository;
pub use pg_store_repository::PgStoreRepository;

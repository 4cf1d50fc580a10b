//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern and are
//! implemented by concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`AccountRepository`] - Accounts and their reset-token state
//! - [`StoreRepository`] - Store listings, slug lookups and grouped reports
//! - [`ReviewRepository`] - Reviews attached to stores
//! - [`SessionRepository`] - Login sessions
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod account_repository;
pub mod review_repository;
pub mod session_repository;
pub mod store_repository;

pub use account_repository::AccountRepository;
pub use review_repository::ReviewRepository;
pub use session_repository::SessionRepository;
pub use store_repository::StoreRepository;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
#[cfg(test)]
pub use review_repository::MockReviewRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
#[cfg(test)]
pub use store_repository::MockStoreRepository;

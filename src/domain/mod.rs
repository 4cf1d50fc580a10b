//! Domain layer containing business entities, repository contracts and pure
//! report logic.
//!
//! # Architecture
//!
//! - [`entities`] - Accounts, store listings, reviews and sessions
//! - [`repositories`] - Data access trait definitions
//! - [`reports`] - Tag frequency and top-rated ranking over grouped rows
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by the infrastructure layer
//! - Orchestration lives in services (see [`crate::application::services`])

pub mod entities;
pub mod reports;
pub mod repositories;

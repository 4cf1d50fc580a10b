//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`Account`] - A registered user, optionally holding a [`PendingReset`]
//! - [`Store`] - A store listing with slug, tags and location
//! - [`Review`] - A rating left on a store
//! - [`Session`] - An authenticated browser or API session
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! `NewAccount`, `NewStore`, `NewReview`.

pub mod account;
pub mod review;
pub mod session;
pub mod store;

pub use account::{Account, NewAccount, PendingReset, RecoveryState, normalize_email};
pub use review::{NewReview, Review};
pub use session::Session;
pub use store::{
    HeartState, Location, NearbyStore, NewStore, Store, StorePatch, StoreUpdate, StoreWithReviews,
};

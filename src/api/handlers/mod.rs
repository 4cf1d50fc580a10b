//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod reports;
pub mod reviews;
pub mod stores;

pub use health::health_handler;
pub use reports::{tags_handler, top_handler};
pub use reviews::create_review_handler;
pub use stores::{
    create_store_handler, get_store_handler, heart_handler, list_stores_handler, near_handler,
    search_handler, update_store_handler,
};

//! Browser-facing HTML layer.
//!
//! Server-rendered Askama pages for browsing listings and for the account
//! flows (login, registration, password recovery). Form posts answer with a
//! redirect and a one-shot flash message.
//!
//! # Modules
//!
//! - [`handlers`] - Page and form handlers
//! - [`middleware`] - Cookie session guard
//! - [`routes`] - Route configuration
//! - [`flash`] - Flash message cookie
//! - [`current_user`] - Optional signed-in account extractor

pub mod current_user;
pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod routes;

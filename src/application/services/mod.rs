//! Business logic services for the application layer.

pub mod auth_service;
pub mod recovery_service;
pub mod session_service;
pub mod store_service;

pub use auth_service::{AuthService, Registration, SignedIn};
pub use recovery_service::{RESET_REQUESTED_MESSAGE, RecoveryService};
pub use session_service::SessionService;
pub use store_service::{StoreInput, StorePage, StoreService};

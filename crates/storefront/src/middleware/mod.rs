//! Middleware and extractors for the storefront.

pub mod auth;
pub mod session;

pub use auth::{OptionalUser, RequireUser};
pub use session::create_session_layer;

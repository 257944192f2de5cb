//! Hosted data store client.
//!
//! # Architecture
//!
//! - The hosted store is the source of truth for cart, wishlist, and order
//!   rows - NO local database, direct API calls
//! - Row operations go through the REST surface
//!   (`/rest/v1/{table}` with equality filters); authentication goes
//!   through the password auth surface (`/auth/v1/...`)
//! - Every row is scoped to its owning user by an explicit `user_id`
//!   equality filter; no mutation ever touches another user's rows
//! - Rows deserialize into typed records with constructor-time validation
//!   ([`records`]), so malformed rows fail fast as [`StoreError::DataCorruption`]
//!
//! # Example
//!
//! ```rust,ignore
//! use solstice_storefront::store::{StoreClient, records::NewCartItem};
//!
//! let store = StoreClient::new(&config.store);
//!
//! // Upsert a cart line for a user
//! store
//!     .upsert("cart_items", &new_item, "user_id,product_id,selected_color")
//!     .await?;
//!
//! // Read the user's cart back
//! let rows: Vec<CartItemRow> = store
//!     .select("cart_items", "*", &[("user_id", format!("eq.{user_id}"))], None)
//!     .await?;
//! ```

mod client;
pub mod auth;
pub mod records;

pub use auth::{AuthClient, AuthSession};
pub use client::StoreClient;

use thiserror::Error;

/// `PostgreSQL` error code for a unique constraint violation, as reported
/// by the store's REST surface.
pub const UNIQUE_VIOLATION_CODE: &str = "23505";

/// Errors that can occur when interacting with the hosted data store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store rejected the request.
    #[error("Store error (HTTP {status}): {message}")]
    Api {
        /// HTTP status returned by the store.
        status: u16,
        /// `PostgreSQL` error code, when the store provides one.
        code: Option<String>,
        /// Human-readable message from the store.
        message: String,
    },

    /// Sign-in was rejected (wrong email or password).
    #[error("Invalid credentials: {0}")]
    Credentials(String),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A row came back in a shape the typed records refuse.
    #[error("Data corruption: {0}")]
    DataCorruption(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl StoreError {
    /// Whether this error is the store rejecting a duplicate row
    /// (unique constraint violation).
    ///
    /// The wishlist controller uses this to turn a duplicate insert into
    /// an informational "already present" notice instead of a failure.
    #[must_use]
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            Self::Api { code: Some(code), .. } if code == UNIQUE_VIOLATION_CODE
        )
    }
}

//! Business logic services.
//!
//! Each controller is constructed per-request with the store client and the
//! authenticated user's id as explicit context (no ambient globals), so
//! tests can inject any identity. Controllers never merge state locally:
//! every mutation is followed by a full re-fetch of the user's rows, and
//! the remote store stays authoritative.

pub mod cart;
pub mod checkout;
pub mod orders;
pub mod wishlist;

pub use cart::CartService;
pub use checkout::CheckoutService;
pub use orders::OrdersService;
pub use wishlist::WishlistService;

use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The hosted store rejected or failed an operation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Input was rejected before any store call was issued.
    #[error("Validation failed: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ServiceError::Validation("quantity must be at least 1".to_string());
        assert_eq!(
            err.to_string(),
            "Validation failed: quantity must be at least 1"
        );
    }
}

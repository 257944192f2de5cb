//! Checkout route handler.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::error::Result;
use crate::middleware::RequireUser;
use crate::models::Notice;
use crate::services::CheckoutService;
use crate::services::checkout::CheckoutRequest;
use crate::state::AppState;
use crate::store::records::Order;

/// Checkout response: the confirmation notice and the created order.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub notice: Notice,
    pub order: Order,
}

/// Place an order from the user's current cart.
///
/// Rejects empty carts and incomplete shipping details before any store
/// call; on success the cart has been cleared.
pub async fn place(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>> {
    let placed = CheckoutService::new(state.store(), state.catalog(), user.id)
        .place_order(request)
        .await?;

    let notice = if placed.cart_cleared {
        Notice::success("Order placed successfully!")
    } else {
        // The order stands; the leftover cart is worth telling the user about
        Notice::info("Order placed, but your cart could not be cleared")
    };

    Ok(Json(CheckoutResponse {
        notice,
        order: placed.order,
    }))
}

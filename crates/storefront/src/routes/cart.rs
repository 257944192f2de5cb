//! Cart route handlers.
//!
//! Every mutation re-fetches the user's cart from the store and returns
//! the fresh view plus a notice; the client never merges state locally.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use solstice_core::{CartItemId, ColorHex, Price, ProductId};

use crate::catalog::Catalog;
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::Notice;
use crate::services::CartService;
use crate::state::AppState;
use crate::store::records::CartItem;

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartLineView {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub selected_color: ColorHex,
    pub unit_price: String,
    pub line_price: String,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    /// Join cart lines with catalog products for display.
    ///
    /// Lines whose product has left the catalog are dropped from the view.
    #[must_use]
    pub fn assemble(catalog: &Catalog, items: &[CartItem]) -> Self {
        let mut subtotal = Price::zero();
        let mut item_count = 0;

        let lines = items
            .iter()
            .filter_map(|item| {
                let product = catalog.get(&item.product_id)?;
                let line_price = product.price * item.quantity;
                subtotal = subtotal + line_price;
                item_count += item.quantity;
                Some(CartLineView {
                    id: item.id,
                    product_id: item.product_id.clone(),
                    name: product.name.clone(),
                    quantity: item.quantity,
                    selected_color: item.selected_color.clone(),
                    unit_price: product.price.display(),
                    line_price: line_price.display(),
                })
            })
            .collect();

        Self {
            items: lines,
            subtotal: subtotal.display(),
            item_count,
        }
    }
}

/// Mutation response: the notice plus the re-fetched cart.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub notice: Notice,
    pub cart: CartView,
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub color: ColorHex,
    pub quantity: Option<u32>,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub item_id: CartItemId,
    pub quantity: u32,
}

/// Remove from cart request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub item_id: CartItemId,
}

/// Current user's cart.
pub async fn show(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<CartView>> {
    let items = CartService::new(state.store(), user.id).list().await?;
    Ok(Json(CartView::assemble(state.catalog(), &items)))
}

/// Add an item to the cart (or overwrite the existing line's quantity).
pub async fn add(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartResponse>> {
    // Only catalog products can be carted
    if state.catalog().get(&request.product_id).is_none() {
        return Err(AppError::NotFound("Product".to_string()));
    }

    let items = CartService::new(state.store(), user.id)
        .add(
            request.product_id,
            request.color,
            request.quantity.unwrap_or(1),
        )
        .await?;

    Ok(Json(CartResponse {
        notice: Notice::success("Added to cart!"),
        cart: CartView::assemble(state.catalog(), &items),
    }))
}

/// Overwrite the quantity of one cart line.
pub async fn update(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<UpdateQuantityRequest>,
) -> Result<Json<CartResponse>> {
    let items = CartService::new(state.store(), user.id)
        .update_quantity(request.item_id, request.quantity)
        .await?;

    Ok(Json(CartResponse {
        notice: Notice::success("Quantity updated"),
        cart: CartView::assemble(state.catalog(), &items),
    }))
}

/// Remove one cart line.
pub async fn remove(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<RemoveFromCartRequest>,
) -> Result<Json<CartResponse>> {
    let items = CartService::new(state.store(), user.id)
        .remove(request.item_id)
        .await?;

    Ok(Json(CartResponse {
        notice: Notice::success("Removed from cart"),
        cart: CartView::assemble(state.catalog(), &items),
    }))
}

/// Delete every line in the user's cart.
pub async fn clear(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<CartResponse>> {
    let items = CartService::new(state.store(), user.id).clear().await?;

    Ok(Json(CartResponse {
        notice: Notice::success("Cart cleared"),
        cart: CartView::assemble(state.catalog(), &items),
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use solstice_core::UserId;

    fn cart_item(product: &str, quantity: u32) -> CartItem {
        CartItem {
            id: CartItemId::new(uuid::Uuid::new_v4()),
            user_id: UserId::new(uuid::Uuid::new_v4()),
            product_id: ProductId::new(product),
            quantity,
            selected_color: ColorHex::parse("#a855f7").unwrap(),
        }
    }

    #[test]
    fn test_assemble_totals_and_counts() {
        let catalog = Catalog::load().unwrap();
        let view = CartView::assemble(
            &catalog,
            &[cart_item("hypersonic-x1", 2), cart_item("water-bottle", 1)],
        );

        assert_eq!(view.items.len(), 2);
        assert_eq!(view.item_count, 3);
        // 2 x $299 + 1 x $59
        assert_eq!(view.subtotal, "$657.00");
        assert_eq!(view.items[0].line_price, "$598.00");
    }

    #[test]
    fn test_assemble_drops_unknown_products() {
        let catalog = Catalog::load().unwrap();
        let view = CartView::assemble(
            &catalog,
            &[cart_item("discontinued", 5), cart_item("water-bottle", 1)],
        );

        assert_eq!(view.items.len(), 1);
        assert_eq!(view.item_count, 1);
        assert_eq!(view.subtotal, "$59.00");
    }

    #[test]
    fn test_assemble_empty_cart() {
        let catalog = Catalog::load().unwrap();
        let view = CartView::assemble(&catalog, &[]);
        assert!(view.items.is_empty());
        assert_eq!(view.item_count, 0);
        assert_eq!(view.subtotal, "$0.00");
    }
}

//! Checkout flow.
//!
//! Turns the current cart into one order row plus one `order_items` row per
//! cart line. The store's REST surface has no multi-table transaction, so
//! the flow compensates: if item insertion fails after the order row was
//! created, the order row is deleted again and the failure surfaced. An
//! order is never left silently empty.

use rust_decimal::Decimal;
use tracing::instrument;

use solstice_core::{OrderStatus, PaymentMethod, UserId};

use crate::catalog::Catalog;
use crate::services::cart::CartService;
use crate::services::ServiceError;
use crate::store::records::{
    CartItem, NewOrder, NewOrderItem, Order, OrderRow, ShippingAddress,
};
use crate::store::StoreClient;

/// What the buyer submits at checkout.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CheckoutRequest {
    pub shipping_address: ShippingAddress,
}

/// A cart line joined with its catalog price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    pub item: CartItem,
    pub unit_price: Decimal,
}

/// Result of a successful checkout.
#[derive(Debug)]
pub struct PlacedOrder {
    pub order: Order,
    /// False when the post-order cart clear failed; the order itself stands.
    pub cart_cleared: bool,
}

/// Per-request checkout controller for one authenticated user.
pub struct CheckoutService<'a> {
    store: &'a StoreClient,
    catalog: &'a Catalog,
    user: UserId,
}

impl<'a> CheckoutService<'a> {
    /// Create a checkout controller scoped to `user`.
    #[must_use]
    pub const fn new(store: &'a StoreClient, catalog: &'a Catalog, user: UserId) -> Self {
        Self {
            store,
            catalog,
            user,
        }
    }

    /// Place an order from the user's current cart.
    ///
    /// # Errors
    ///
    /// Rejects empty carts, zero totals, and blank shipping fields before
    /// any store call. Propagates store failures; if item insertion fails
    /// the already-created order row is deleted first.
    #[instrument(skip(self, request), fields(user = %self.user))]
    pub async fn place_order(&self, request: CheckoutRequest) -> Result<PlacedOrder, ServiceError> {
        validate_shipping(&request.shipping_address)?;

        let cart_service = CartService::new(self.store, self.user);
        let cart = cart_service.list().await?;

        let lines = price_cart(self.catalog, cart);
        let total = order_total(&lines);
        if lines.is_empty() || total.is_zero() {
            return Err(ServiceError::Validation(
                "cart is empty; nothing to order".to_string(),
            ));
        }

        // Payment is simulated; the order is final as soon as it is stored.
        let new_order = NewOrder {
            user_id: self.user,
            total_amount: total,
            status: OrderStatus::Completed,
            payment_method: PaymentMethod::Card,
            shipping_address: request.shipping_address,
        };

        let order_row: OrderRow = self.store.insert_returning("orders", &new_order).await?;
        let order = Order::try_from(order_row).map_err(crate::store::StoreError::from)?;

        let items: Vec<NewOrderItem> = lines
            .iter()
            .map(|line| NewOrderItem {
                order_id: order.id,
                product_id: line.item.product_id.clone(),
                quantity: line.item.quantity,
                price: line.unit_price,
                selected_color: line.item.selected_color.clone(),
            })
            .collect();

        if let Err(err) = self.store.insert("order_items", &items).await {
            tracing::error!(order = %order.id, error = %err, "order item insert failed, deleting order row");
            if let Err(delete_err) = self
                .store
                .delete("orders", &[("id", format!("eq.{}", order.id))])
                .await
            {
                tracing::error!(order = %order.id, error = %delete_err, "compensating order delete failed");
            }
            return Err(err.into());
        }

        // The order stands even if the cart clear fails; the caller reports
        // the leftover cart instead of failing the purchase.
        let cart_cleared = match cart_service.clear().await {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(user = %self.user, error = %err, "cart clear after checkout failed");
                false
            }
        };

        let order = Order {
            items: lines
                .into_iter()
                .map(|line| crate::store::records::OrderItem {
                    product_id: line.item.product_id,
                    quantity: line.item.quantity,
                    price: line.unit_price,
                    selected_color: line.item.selected_color,
                })
                .collect(),
            ..order
        };

        Ok(PlacedOrder {
            order,
            cart_cleared,
        })
    }
}

/// Join cart lines with catalog prices.
///
/// Lines whose product no longer exists in the catalog are dropped rather
/// than priced at zero.
#[must_use]
pub fn price_cart(catalog: &Catalog, cart: Vec<CartItem>) -> Vec<PricedLine> {
    cart.into_iter()
        .filter_map(|item| {
            let product = catalog.get(&item.product_id)?;
            Some(PricedLine {
                unit_price: product.price.amount,
                item,
            })
        })
        .collect()
}

/// Total = sum of unit price x quantity over all lines.
#[must_use]
pub fn order_total(lines: &[PricedLine]) -> Decimal {
    lines
        .iter()
        .map(|line| line.unit_price * Decimal::from(line.item.quantity))
        .sum()
}

fn validate_shipping(address: &ShippingAddress) -> Result<(), ServiceError> {
    let fields = [
        ("full name", &address.full_name),
        ("address", &address.address),
        ("city", &address.city),
        ("postal code", &address.postal_code),
    ];
    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(ServiceError::Validation(format!("{name} is required")));
        }
    }
    Ok(())
}

//! Typed records for store rows.
//!
//! The store's REST surface returns loosely-typed JSON rows. Each table
//! gets a raw `...Row` deserialization struct and a validated domain
//! record; conversion happens once at the fetch boundary so malformed rows
//! fail fast as [`RecordError`] instead of propagating partial data.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use solstice_core::{
    CartItemId, ColorHex, OrderId, OrderStatus, PaymentMethod, ProductId, UserId, WishlistItemId,
};

/// A row failed constructor-time validation.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("{table} row {id}: quantity must be positive, got {got}")]
    NonPositiveQuantity {
        table: &'static str,
        id: Uuid,
        got: i64,
    },
    #[error("{table} row {id}: invalid color: {source}")]
    InvalidColor {
        table: &'static str,
        id: Uuid,
        source: solstice_core::ColorHexError,
    },
    #[error("{table} row {id}: {message}")]
    InvalidField {
        table: &'static str,
        id: Uuid,
        message: String,
    },
}

impl From<RecordError> for super::StoreError {
    fn from(err: RecordError) -> Self {
        Self::DataCorruption(err.to_string())
    }
}

fn validate_quantity(table: &'static str, id: Uuid, raw: i64) -> Result<u32, RecordError> {
    u32::try_from(raw)
        .ok()
        .filter(|&q| q > 0)
        .ok_or(RecordError::NonPositiveQuantity {
            table,
            id,
            got: raw,
        })
}

fn validate_color(table: &'static str, id: Uuid, raw: &str) -> Result<ColorHex, RecordError> {
    ColorHex::parse(raw).map_err(|source| RecordError::InvalidColor { table, id, source })
}

// =============================================================================
// Cart items
// =============================================================================

/// Raw `cart_items` row as returned by the store.
#[derive(Debug, Deserialize)]
pub struct CartItemRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: String,
    pub quantity: i64,
    pub selected_color: String,
}

/// A validated cart line.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CartItem {
    pub id: CartItemId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub selected_color: ColorHex,
}

impl TryFrom<CartItemRow> for CartItem {
    type Error = RecordError;

    fn try_from(row: CartItemRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CartItemId::new(row.id),
            user_id: UserId::new(row.user_id),
            product_id: ProductId::new(row.product_id),
            quantity: validate_quantity("cart_items", row.id, row.quantity)?,
            selected_color: validate_color("cart_items", row.id, &row.selected_color)?,
        })
    }
}

/// Insert/upsert payload for `cart_items`.
#[derive(Debug, Serialize)]
pub struct NewCartItem {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub selected_color: ColorHex,
}

// =============================================================================
// Wishlist
// =============================================================================

/// Raw `wishlist` row as returned by the store.
#[derive(Debug, Deserialize)]
pub struct WishlistItemRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: String,
    pub created_at: DateTime<Utc>,
}

/// A validated wishlist entry.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WishlistItem {
    pub id: WishlistItemId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub created_at: DateTime<Utc>,
}

impl From<WishlistItemRow> for WishlistItem {
    fn from(row: WishlistItemRow) -> Self {
        Self {
            id: WishlistItemId::new(row.id),
            user_id: UserId::new(row.user_id),
            product_id: ProductId::new(row.product_id),
            created_at: row.created_at,
        }
    }
}

/// Insert payload for `wishlist`.
#[derive(Debug, Serialize)]
pub struct NewWishlistItem {
    pub user_id: UserId,
    pub product_id: ProductId,
}

// =============================================================================
// Orders
// =============================================================================

/// Structured shipping address stored on the order row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShippingAddress {
    pub full_name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

/// Raw `orders` row (with embedded `order_items`) as returned by the store.
#[derive(Debug, Deserialize)]
pub struct OrderRow {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_amount: Decimal,
    pub status: String,
    pub payment_method: String,
    pub shipping_address: ShippingAddress,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub order_items: Vec<OrderItemRow>,
}

/// Raw `order_items` row as returned by the store.
#[derive(Debug, Deserialize)]
pub struct OrderItemRow {
    pub id: Uuid,
    pub product_id: String,
    pub quantity: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub selected_color: String,
}

/// A validated order with its line items (read-only history).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub shipping_address: ShippingAddress,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}

/// A validated order line.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: Decimal,
    pub selected_color: ColorHex,
}

impl TryFrom<OrderRow> for Order {
    type Error = RecordError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status: OrderStatus =
            row.status
                .parse()
                .map_err(|message| RecordError::InvalidField {
                    table: "orders",
                    id: row.id,
                    message,
                })?;

        let payment_method = match row.payment_method.as_str() {
            "card" => PaymentMethod::Card,
            other => {
                return Err(RecordError::InvalidField {
                    table: "orders",
                    id: row.id,
                    message: format!("unknown payment method: {other}"),
                });
            }
        };

        let items = row
            .order_items
            .into_iter()
            .map(|item| {
                Ok(OrderItem {
                    product_id: ProductId::new(item.product_id),
                    quantity: validate_quantity("order_items", item.id, item.quantity)?,
                    price: item.price,
                    selected_color: validate_color("order_items", item.id, &item.selected_color)?,
                })
            })
            .collect::<Result<Vec<_>, RecordError>>()?;

        Ok(Self {
            id: OrderId::new(row.id),
            user_id: UserId::new(row.user_id),
            total_amount: row.total_amount,
            status,
            payment_method,
            shipping_address: row.shipping_address,
            created_at: row.created_at,
            items,
        })
    }
}

/// Insert payload for `orders`.
#[derive(Debug, Serialize)]
pub struct NewOrder {
    pub user_id: UserId,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub shipping_address: ShippingAddress,
}

/// Insert payload for `order_items`.
#[derive(Debug, Serialize)]
pub struct NewOrderItem {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub selected_color: ColorHex,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn cart_row(quantity: i64, color: &str) -> CartItemRow {
        CartItemRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            product_id: "hypersonic-x1".to_string(),
            quantity,
            selected_color: color.to_string(),
        }
    }

    #[test]
    fn test_cart_item_valid_row() {
        let item = CartItem::try_from(cart_row(2, "#a855f7")).unwrap();
        assert_eq!(item.quantity, 2);
        assert_eq!(item.selected_color.as_str(), "#a855f7");
    }

    #[test]
    fn test_cart_item_rejects_zero_quantity() {
        let err = CartItem::try_from(cart_row(0, "#a855f7")).unwrap_err();
        assert!(matches!(err, RecordError::NonPositiveQuantity { got: 0, .. }));
    }

    #[test]
    fn test_cart_item_rejects_negative_quantity() {
        assert!(CartItem::try_from(cart_row(-3, "#a855f7")).is_err());
    }

    #[test]
    fn test_cart_item_rejects_malformed_color() {
        let err = CartItem::try_from(cart_row(1, "purple")).unwrap_err();
        assert!(matches!(err, RecordError::InvalidColor { .. }));
    }

    #[test]
    fn test_order_row_parses_with_embedded_items() {
        let json = r##"{
            "id": "7d10a866-9e5f-4f25-8f62-04f3f8763a10",
            "user_id": "4b4bcb6c-7c3e-4f0e-9c59-6a9f7a1d2e3f",
            "total_amount": "25",
            "status": "completed",
            "payment_method": "card",
            "shipping_address": {
                "full_name": "Ada Shopper",
                "address": "1 Main St",
                "city": "Springfield",
                "postal_code": "12345"
            },
            "created_at": "2025-06-01T12:00:00Z",
            "order_items": [
                {
                    "id": "9f5a2b46-11aa-4f11-9df1-0d7a3d2b91c0",
                    "product_id": "hypersonic-x1",
                    "quantity": 2,
                    "price": "10",
                    "selected_color": "#a855f7"
                }
            ]
        }"##;
        let row: OrderRow = serde_json::from_str(json).unwrap();
        let order = Order::try_from(row).unwrap();
        assert_eq!(order.status, OrderStatus::Completed);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.total_amount, Decimal::from(25));
    }

    #[test]
    fn test_order_rejects_unknown_status() {
        let json = r#"{
            "id": "7d10a866-9e5f-4f25-8f62-04f3f8763a10",
            "user_id": "4b4bcb6c-7c3e-4f0e-9c59-6a9f7a1d2e3f",
            "total_amount": "10",
            "status": "shipped",
            "payment_method": "card",
            "shipping_address": {
                "full_name": "Ada Shopper",
                "address": "1 Main St",
                "city": "Springfield",
                "postal_code": "12345"
            },
            "created_at": "2025-06-01T12:00:00Z"
        }"#;
        let row: OrderRow = serde_json::from_str(json).unwrap();
        assert!(matches!(
            Order::try_from(row).unwrap_err(),
            RecordError::InvalidField { table: "orders", .. }
        ));
    }
}

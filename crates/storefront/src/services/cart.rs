//! Cart controller.
//!
//! Cart lines live in the store's `cart_items` table, unique per
//! (user, product, selected color). A repeated add for the same triple
//! upserts against that constraint instead of duplicating the row.

use tracing::instrument;

use solstice_core::{CartItemId, ColorHex, ProductId, UserId};

use crate::services::ServiceError;
use crate::store::records::{CartItem, CartItemRow, NewCartItem};
use crate::store::{StoreClient, StoreError};

/// Store table holding cart lines.
const TABLE: &str = "cart_items";

/// Conflict target for the cart uniqueness constraint.
const CONFLICT_TARGET: &str = "user_id,product_id,selected_color";

/// Per-request cart controller for one authenticated user.
pub struct CartService<'a> {
    store: &'a StoreClient,
    user: UserId,
}

impl<'a> CartService<'a> {
    /// Create a cart controller scoped to `user`.
    #[must_use]
    pub const fn new(store: &'a StoreClient, user: UserId) -> Self {
        Self { store, user }
    }

    /// Fetch the user's cart from the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store call fails or a row fails validation.
    pub async fn list(&self) -> Result<Vec<CartItem>, ServiceError> {
        Ok(self.fetch().await?)
    }

    /// Add a product in a color, or overwrite the quantity of the existing
    /// (user, product, color) line.
    ///
    /// Returns the re-fetched cart.
    ///
    /// # Errors
    ///
    /// Rejects a zero quantity before any store call; otherwise propagates
    /// store failures.
    #[instrument(skip(self), fields(user = %self.user, product = %product_id))]
    pub async fn add(
        &self,
        product_id: ProductId,
        color: ColorHex,
        quantity: u32,
    ) -> Result<Vec<CartItem>, ServiceError> {
        validate_quantity(quantity)?;

        let row = NewCartItem {
            user_id: self.user,
            product_id,
            quantity,
            selected_color: color,
        };
        self.store.upsert(TABLE, &row, CONFLICT_TARGET).await?;

        Ok(self.fetch().await?)
    }

    /// Overwrite the quantity of one cart line owned by this user.
    ///
    /// The update is filtered by both row id and user id, so another
    /// user's row can never be touched.
    ///
    /// # Errors
    ///
    /// Rejects a zero quantity before any store call; otherwise propagates
    /// store failures.
    #[instrument(skip(self), fields(user = %self.user, item = %item_id))]
    pub async fn update_quantity(
        &self,
        item_id: CartItemId,
        quantity: u32,
    ) -> Result<Vec<CartItem>, ServiceError> {
        validate_quantity(quantity)?;

        self.store
            .update(
                TABLE,
                &[
                    ("id", format!("eq.{item_id}")),
                    ("user_id", format!("eq.{}", self.user)),
                ],
                &serde_json::json!({ "quantity": quantity }),
            )
            .await?;

        Ok(self.fetch().await?)
    }

    /// Remove one cart line owned by this user.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    #[instrument(skip(self), fields(user = %self.user, item = %item_id))]
    pub async fn remove(&self, item_id: CartItemId) -> Result<Vec<CartItem>, ServiceError> {
        self.store
            .delete(
                TABLE,
                &[
                    ("id", format!("eq.{item_id}")),
                    ("user_id", format!("eq.{}", self.user)),
                ],
            )
            .await?;

        Ok(self.fetch().await?)
    }

    /// Delete every cart line belonging to this user.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    #[instrument(skip(self), fields(user = %self.user))]
    pub async fn clear(&self) -> Result<Vec<CartItem>, ServiceError> {
        self.store
            .delete(TABLE, &[("user_id", format!("eq.{}", self.user))])
            .await?;

        Ok(self.fetch().await?)
    }

    async fn fetch(&self) -> Result<Vec<CartItem>, StoreError> {
        let rows: Vec<CartItemRow> = self
            .store
            .select(TABLE, "*", &[("user_id", format!("eq.{}", self.user))], None)
            .await?;

        rows.into_iter()
            .map(|row| CartItem::try_from(row).map_err(StoreError::from))
            .collect()
    }
}

fn validate_quantity(quantity: u32) -> Result<(), ServiceError> {
    if quantity == 0 {
        return Err(ServiceError::Validation(
            "quantity must be at least 1".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_quantity_rejects_zero() {
        assert!(matches!(
            validate_quantity(0),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_quantity_accepts_positive() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(99).is_ok());
    }

    #[test]
    fn test_conflict_target_matches_uniqueness_invariant() {
        // One row per (user, product, color): the upsert must target exactly
        // those columns or repeated adds would duplicate lines.
        assert_eq!(CONFLICT_TARGET, "user_id,product_id,selected_color");
    }
}

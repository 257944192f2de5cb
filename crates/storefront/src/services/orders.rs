//! Order history.
//!
//! Orders are created once at checkout and read-only afterwards; this
//! service only fetches them, newest first, with their line items embedded.

use tracing::instrument;

use solstice_core::UserId;

use crate::services::ServiceError;
use crate::store::records::{Order, OrderRow};
use crate::store::{StoreClient, StoreError};

/// Per-request order history reader for one authenticated user.
pub struct OrdersService<'a> {
    store: &'a StoreClient,
    user: UserId,
}

impl<'a> OrdersService<'a> {
    /// Create an order history reader scoped to `user`.
    #[must_use]
    pub const fn new(store: &'a StoreClient, user: UserId) -> Self {
        Self { store, user }
    }

    /// Fetch the user's orders with embedded line items, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store call fails or a row fails validation.
    #[instrument(skip(self), fields(user = %self.user))]
    pub async fn list(&self) -> Result<Vec<Order>, ServiceError> {
        let rows: Vec<OrderRow> = self
            .store
            .select(
                "orders",
                "*,order_items(*)",
                &[("user_id", format!("eq.{}", self.user))],
                Some("created_at.desc"),
            )
            .await?;

        rows.into_iter()
            .map(|row| Order::try_from(row).map_err(|e| ServiceError::Store(StoreError::from(e))))
            .collect()
    }
}

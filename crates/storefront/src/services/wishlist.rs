//! Wishlist controller.
//!
//! Wishlist rows are unique per (user, product). Unlike the cart there is
//! nothing to overwrite on conflict: a duplicate insert is rejected by the
//! store and reported back as "already present", which callers surface as
//! an informational notice rather than a failure.

use tracing::instrument;

use solstice_core::{ProductId, UserId};

use crate::services::ServiceError;
use crate::store::records::{NewWishlistItem, WishlistItem, WishlistItemRow};
use crate::store::{StoreClient, StoreError};

/// Store table holding wishlist entries.
const TABLE: &str = "wishlist";

/// Outcome of an add: either the entry was created, or it already existed.
#[derive(Debug)]
pub struct WishlistAdd {
    /// Re-fetched wishlist after the operation.
    pub items: Vec<WishlistItem>,
    /// True when the store rejected the insert as a duplicate.
    pub already_present: bool,
}

/// Per-request wishlist controller for one authenticated user.
pub struct WishlistService<'a> {
    store: &'a StoreClient,
    user: UserId,
}

impl<'a> WishlistService<'a> {
    /// Create a wishlist controller scoped to `user`.
    #[must_use]
    pub const fn new(store: &'a StoreClient, user: UserId) -> Self {
        Self { store, user }
    }

    /// Fetch the user's wishlist from the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store call fails or a row fails validation.
    pub async fn list(&self) -> Result<Vec<WishlistItem>, ServiceError> {
        Ok(self.fetch().await?)
    }

    /// Insert a product into the wishlist.
    ///
    /// A unique-violation from the store means the product is already
    /// saved; that is reported through [`WishlistAdd::already_present`],
    /// not as an error.
    ///
    /// # Errors
    ///
    /// Propagates store failures other than the duplicate rejection.
    #[instrument(skip(self), fields(user = %self.user, product = %product_id))]
    pub async fn add(&self, product_id: ProductId) -> Result<WishlistAdd, ServiceError> {
        let row = NewWishlistItem {
            user_id: self.user,
            product_id,
        };

        let already_present = match self.store.insert(TABLE, &row).await {
            Ok(()) => false,
            Err(err) if err.is_unique_violation() => true,
            Err(err) => return Err(err.into()),
        };

        Ok(WishlistAdd {
            items: self.fetch().await?,
            already_present,
        })
    }

    /// Remove a product from the wishlist by (user, product).
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    #[instrument(skip(self), fields(user = %self.user, product = %product_id))]
    pub async fn remove(&self, product_id: &ProductId) -> Result<Vec<WishlistItem>, ServiceError> {
        self.store
            .delete(
                TABLE,
                &[
                    ("user_id", format!("eq.{}", self.user)),
                    ("product_id", format!("eq.{product_id}")),
                ],
            )
            .await?;

        Ok(self.fetch().await?)
    }

    async fn fetch(&self) -> Result<Vec<WishlistItem>, StoreError> {
        let rows: Vec<WishlistItemRow> = self
            .store
            .select(TABLE, "*", &[("user_id", format!("eq.{}", self.user))], None)
            .await?;

        Ok(rows.into_iter().map(WishlistItem::from).collect())
    }
}

/// Whether `product_id` is in the currently loaded wishlist.
///
/// A pure lookup over fetched items; never round-trips to the store.
#[must_use]
pub fn contains(items: &[WishlistItem], product_id: &ProductId) -> bool {
    items.iter().any(|item| &item.product_id == product_id)
}

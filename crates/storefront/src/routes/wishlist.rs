//! Wishlist route handlers.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use solstice_core::{ProductId, WishlistItemId};

use crate::catalog::Catalog;
use crate::error::Result;
use crate::middleware::RequireUser;
use crate::models::Notice;
use crate::services::WishlistService;
use crate::state::AppState;
use crate::store::records::WishlistItem;

/// Wishlist entry display data.
#[derive(Debug, Clone, Serialize)]
pub struct WishlistEntryView {
    pub id: WishlistItemId,
    pub product_id: ProductId,
    /// Product name, when the product is still in the catalog.
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Wishlist display data.
#[derive(Debug, Clone, Serialize)]
pub struct WishlistView {
    pub items: Vec<WishlistEntryView>,
}

impl WishlistView {
    fn assemble(catalog: &Catalog, items: &[WishlistItem]) -> Self {
        Self {
            items: items
                .iter()
                .map(|item| WishlistEntryView {
                    id: item.id,
                    product_id: item.product_id.clone(),
                    name: catalog.get(&item.product_id).map(|p| p.name.clone()),
                    created_at: item.created_at,
                })
                .collect(),
        }
    }
}

/// Mutation response: the notice plus the re-fetched wishlist.
#[derive(Debug, Serialize)]
pub struct WishlistResponse {
    pub notice: Notice,
    pub wishlist: WishlistView,
}

/// Wishlist mutation request body.
#[derive(Debug, Deserialize)]
pub struct WishlistRequest {
    pub product_id: ProductId,
}

/// Current user's wishlist.
pub async fn show(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<WishlistView>> {
    let items = WishlistService::new(state.store(), user.id).list().await?;
    Ok(Json(WishlistView::assemble(state.catalog(), &items)))
}

/// Save a product to the wishlist.
///
/// A product that is already saved yields an informational notice, not an
/// error.
pub async fn add(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<WishlistRequest>,
) -> Result<Json<WishlistResponse>> {
    let outcome = WishlistService::new(state.store(), user.id)
        .add(request.product_id)
        .await?;

    let notice = if outcome.already_present {
        Notice::info("Already in wishlist")
    } else {
        Notice::success("Added to wishlist!")
    };

    Ok(Json(WishlistResponse {
        notice,
        wishlist: WishlistView::assemble(state.catalog(), &outcome.items),
    }))
}

/// Remove a product from the wishlist.
pub async fn remove(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<WishlistRequest>,
) -> Result<Json<WishlistResponse>> {
    let items = WishlistService::new(state.store(), user.id)
        .remove(&request.product_id)
        .await?;

    Ok(Json(WishlistResponse {
        notice: Notice::success("Removed from wishlist"),
        wishlist: WishlistView::assemble(state.catalog(), &items),
    }))
}

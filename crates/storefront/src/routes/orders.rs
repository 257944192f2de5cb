//! Order history route handler.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::error::Result;
use crate::middleware::RequireUser;
use crate::services::OrdersService;
use crate::state::AppState;
use crate::store::records::Order;

/// Order history response.
#[derive(Debug, Serialize)]
pub struct OrdersView {
    pub orders: Vec<Order>,
}

/// The user's orders, newest first.
pub async fn index(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<OrdersView>> {
    let orders = OrdersService::new(state.store(), user.id).list().await?;
    Ok(Json(OrdersView { orders }))
}

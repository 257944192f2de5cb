//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::catalog::{ALL_CATEGORIES, Product};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Listing filter query parameters.
#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    /// Category to match exactly, or `"all"` (the default) for everything.
    pub category: Option<String>,
    /// Case-insensitive substring matched against name or tagline.
    pub q: Option<String>,
}

/// Product listing with category/search filtering.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Json<Vec<Product>> {
    let category = query.category.as_deref().unwrap_or(ALL_CATEGORIES);
    let q = query.q.as_deref().unwrap_or("");

    let products = state
        .catalog()
        .filter(category, q)
        .into_iter()
        .cloned()
        .collect();

    Json(products)
}

/// Product detail by id.
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>> {
    state
        .catalog()
        .get(&id.as_str().into())
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Product".to_string()))
}

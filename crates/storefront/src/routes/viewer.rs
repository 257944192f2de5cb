//! 3D viewer route handlers: scene assembly and custom model upload.

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use solstice_core::{ColorHex, ProductId};

use crate::error::{AppError, Result};
use crate::models::Notice;
use crate::state::AppState;
use crate::viewer::Scene;
use crate::viewer::upload;

/// Viewer scene query parameters.
#[derive(Debug, Deserialize)]
pub struct SceneQuery {
    /// Selected tint; defaults to the product's default color.
    pub color: Option<ColorHex>,
    /// URL of a previously uploaded model to show instead of the product's
    /// bundled one.
    pub model: Option<String>,
}

/// Assembled scene response.
#[derive(Debug, Serialize)]
pub struct SceneResponse {
    pub product_id: ProductId,
    pub scene: Scene,
}

/// Model upload response.
#[derive(Debug, Serialize)]
pub struct ModelUploadResponse {
    pub notice: Notice,
    /// URL the viewer can load the accepted model from.
    pub model_url: String,
}

/// Assemble the 3D scene for a product.
///
/// The tint must be one of the product's selectable colors.
pub async fn scene(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<SceneQuery>,
) -> Result<Json<SceneResponse>> {
    let product = state
        .catalog()
        .get(&id.as_str().into())
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

    let tint = query.color.unwrap_or_else(|| product.default_color.clone());
    if !product.colors.contains(&tint) {
        return Err(AppError::Validation(format!(
            "color {tint} is not available for this product"
        )));
    }

    // Uploaded model wins over the product's bundled one
    let model_url = query.model.or_else(|| product.model_path.clone());
    let scene = match model_url {
        Some(url) => Scene::with_model(url, tint),
        None => Scene::with_placeholder(tint),
    };

    Ok(Json(SceneResponse {
        product_id: product.id.clone(),
        scene,
    }))
}

/// Accept a custom 3D model upload for a product.
///
/// The file is validated (extension, size) before any byte is written; a
/// rejected upload changes nothing and the previously active model stays
/// in place.
#[instrument(skip(state, multipart), fields(product = %id))]
pub async fn upload_model(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<ModelUploadResponse>> {
    if state.catalog().get(&id.as_str().into()).is_none() {
        return Err(AppError::NotFound("Product".to_string()));
    }

    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid upload body: {e}")))?
        .ok_or_else(|| AppError::Validation("no file in upload".to_string()))?;

    let file_name = field
        .file_name()
        .ok_or_else(|| AppError::Validation("upload has no file name".to_string()))?
        .to_string();

    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("invalid upload body: {e}")))?;

    let validated = upload::validate(&file_name, bytes.len() as u64)?;

    // Server-assigned name keeps uploads collision-free and unguessable
    let stored_name = format!("{}.{}", uuid::Uuid::new_v4(), validated.extension);
    let dir = &state.config().upload_dir;
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::Internal(format!("creating upload dir: {e}")))?;
    tokio::fs::write(dir.join(&stored_name), &bytes)
        .await
        .map_err(|e| AppError::Internal(format!("writing upload: {e}")))?;

    tracing::info!(file = %stored_name, size = bytes.len(), "model upload accepted");

    Ok(Json(ModelUploadResponse {
        notice: Notice::success("Model uploaded successfully"),
        model_url: format!("/models/{stored_name}"),
    }))
}

//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//!
//! The response body is always a JSON [`Notice`], so every failure path is
//! user-visible.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::Notice;
use crate::services::ServiceError;
use crate::store::StoreError;
use crate::viewer::UploadError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Hosted store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Input was rejected before any store call.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Model upload was rejected.
    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Session state could not be read or written.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Store(e) => Self::Store(e),
            ServiceError::Validation(msg) => Self::Validation(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server-side failures to Sentry; user mistakes are not events
        let is_server_error = match &self {
            Self::Internal(_) | Self::Session(_) => true,
            Self::Store(e) => !matches!(e, StoreError::Credentials(_)),
            Self::Validation(_) | Self::Upload(_) | Self::NotFound(_) => false,
        };

        if is_server_error {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Store(StoreError::Credentials(_)) => StatusCode::UNAUTHORIZED,
            Self::Store(_) => StatusCode::BAD_GATEWAY,
            Self::Validation(_) | Self::Upload(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Session(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose store internals to clients
        let message = match &self {
            Self::Store(StoreError::Credentials(_)) => "Invalid email or password".to_string(),
            Self::Store(_) => "Something went wrong, please try again".to_string(),
            Self::Session(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::Validation(msg) => msg.clone(),
            Self::Upload(err) => err.to_string(),
            Self::NotFound(what) => format!("{what} not found"),
        };

        (status, Json(Notice::error(message))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("Product".to_string());
        assert_eq!(err.to_string(), "Not found: Product");

        let err = AppError::Validation("quantity must be at least 1".to_string());
        assert_eq!(
            err.to_string(),
            "Validation error: quantity must be at least 1"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            status_of(AppError::NotFound("Product".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Validation("bad".to_string())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(AppError::Upload(UploadError::MissingExtension)),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(AppError::Internal("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_failures_map_to_bad_gateway() {
        let err = AppError::Store(StoreError::Api {
            status: 500,
            code: None,
            message: "internal".to_string(),
        });
        assert_eq!(status_of(err), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_bad_credentials_map_to_unauthorized() {
        let err = AppError::Store(StoreError::Credentials("nope".to_string()));
        assert_eq!(status_of(err), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_validation_error_from_service() {
        let err: AppError = ServiceError::Validation("cart is empty".to_string()).into();
        assert!(matches!(err, AppError::Validation(_)));
    }
}

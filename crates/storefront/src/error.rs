//! Unified error handling.
//!
//! Provides a unified `AppError` type that logs server errors before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::engine::EngineError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Engine operation refused.
    #[error("{0}")]
    Engine(#[from] EngineError),

    /// Visitor session could not be loaded or saved.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Engine(EngineError::Catalog(err)) => match err {
                CatalogError::UnknownProduct(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request error");
        }

        // Don't expose internal error details to clients
        let message = if status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use imex_core::ProductId;

    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        let response = err.into_response();
        response.status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("blueprint tab drawings".to_string());
        assert_eq!(err.to_string(), "Not found: blueprint tab drawings");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Session(
                tower_sessions::session_store::Error::Backend("disk full".to_string()).into()
            )),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unknown_product_is_not_found() {
        let err = AppError::from(EngineError::from(CatalogError::UnknownProduct(
            ProductId::from("NON-EXISTENT"),
        )));
        assert_eq!(get_status(err), StatusCode::NOT_FOUND);
    }
}

//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::services::{CartError, CheckoutError};
use crate::stores::{CatalogError, StoreError};

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Cart engine operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Checkout reconciliation failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Catalog operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Underlying store unavailable.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Cart(err) => match err {
                CartError::ProductNotFound(_) => StatusCode::NOT_FOUND,
                CartError::InvalidQuantity(_) => StatusCode::BAD_REQUEST,
                CartError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Checkout(err) => match err {
                CheckoutError::EmptyCart => StatusCode::BAD_REQUEST,
                CheckoutError::ProductNotFound(_) => StatusCode::NOT_FOUND,
                CheckoutError::InsufficientStock { .. } => StatusCode::CONFLICT,
                CheckoutError::Persistence(_) | CheckoutError::Store(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Catalog(err) => match err {
                CatalogError::ProductNotFound(_) => StatusCode::NOT_FOUND,
                CatalogError::InsufficientStock { .. } => StatusCode::CONFLICT,
                CatalogError::DuplicateSize { .. } => StatusCode::BAD_REQUEST,
                CatalogError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let message = if status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use laced_core::ProductId;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Cart(CartError::ProductNotFound(ProductId::new(1))).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Cart(CartError::InvalidQuantity(-1)).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Checkout(CheckoutError::EmptyCart).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Checkout(CheckoutError::InsufficientStock {
                product_id: ProductId::new(1),
                size: 9,
                requested: 4,
                available: 3,
            })
            .status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Store(StoreError::Unavailable("test")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Unauthorized("missing header".to_string()).status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_insufficient_stock_message_carries_diagnostics() {
        let err = AppError::Checkout(CheckoutError::InsufficientStock {
            product_id: ProductId::new(1),
            size: 9,
            requested: 4,
            available: 3,
        });
        let msg = err.to_string();
        assert!(msg.contains("requested 4"));
        assert!(msg.contains("available 3"));
    }
}

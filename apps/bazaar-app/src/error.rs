//! # Error Types
//!
//! Two error types live here:
//!
//! - [`ApiError`]: what a failed command returns to the UI (serialized)
//! - [`AppError`]: what stops the host process (startup or channel I/O)
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  {"cmd":"add_to_cart","productId":"x"}                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Command Function ── Result<T, ApiError>                                │
//! │         │                                                               │
//! │         ├── CoreError::ProductNotFound ──► NOT_FOUND                    │
//! │         ├── CoreError::Validation ───────► VALIDATION_ERROR             │
//! │         ├── CoreError::QuantityTooLarge ─► CART_ERROR                   │
//! │         ▼                                                               │
//! │  {"ok":false,"error":{"code":"NOT_FOUND","message":"..."}}              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::path::PathBuf;

use bazaar_core::{CoreError, ValidationError};
use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

use crate::state::ConfigError;

// =============================================================================
// API Error
// =============================================================================

/// Error returned from a command.
///
/// ```json
/// { "code": "NOT_FOUND", "message": "Product not found: mug-01" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display (toast text)
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product or cart line not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Cart limits exceeded
    CartError,

    /// Request line was not a valid command
    InvalidRequest,

    /// Unexpected failure
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InvalidRequest, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::ItemNotInCart(_) => ApiError::new(ErrorCode::NotFound, err.to_string()),
            CoreError::Validation(inner) => ApiError::validation(inner.to_string()),
            CoreError::CartTooLarge { .. } | CoreError::QuantityTooLarge { .. } => {
                ApiError::new(ErrorCode::CartError, err.to_string())
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("Failed to serialize command result: {}", err);
        ApiError::internal("Failed to encode response")
    }
}

// =============================================================================
// App Error
// =============================================================================

/// Errors that abort the host process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read catalog {path}: {source}")]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog {origin} is not valid JSON: {source}")]
    CatalogParse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Catalog product {id} is invalid: {source}")]
    InvalidProduct {
        id: String,
        #[source]
        source: ValidationError,
    },

    #[error("Catalog lists product {0} more than once")]
    DuplicateProduct(String),

    #[error("Command channel I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_codes() {
        let err: ApiError = CoreError::ProductNotFound("mug-01".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: mug-01");

        let err: ApiError = CoreError::CartTooLarge { max: 100 }.into();
        assert_eq!(err.code, ErrorCode::CartError);

        let err: ApiError = CoreError::Validation(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "quantity must be positive");
    }

    #[test]
    fn test_api_error_serialization() {
        let err = ApiError::not_found("Product", "x1");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: x1");
    }
}

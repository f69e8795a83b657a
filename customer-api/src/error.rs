//! Error Types for the Customer API
//!
//! This module defines error handling for the API layer, including:
//! - ApiError struct for structured error responses
//! - ErrorCode enum for categorizing errors
//! - IntoResponse implementation for Axum HTTP responses
//!
//! All errors are serialized as JSON with appropriate HTTP status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use customer_core::{CustomerError, StorageError, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message returned for every failure the caller cannot act on.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred while processing your request.";

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Error codes for API responses.
///
/// Each error code maps to a specific HTTP status code and represents
/// a category of error that can occur during API operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================================================
    // Validation Errors (400)
    // ========================================================================
    /// Request validation failed
    ValidationFailed,

    /// Request body, path or query could not be parsed
    InvalidInput,

    /// Field format is incorrect
    InvalidFormat,

    /// The store rejected an update
    UpdateFailed,

    // ========================================================================
    // Not Found Errors (404)
    // ========================================================================
    /// Requested customer does not exist or was deleted
    CustomerNotFound,

    /// No route matches the request
    RouteNotFound,

    // ========================================================================
    // Conflict Errors (409)
    // ========================================================================
    /// Another live customer already uses the email
    DuplicateEmail,

    /// Concurrent modification detected
    ConcurrentModification,

    // ========================================================================
    // Server Errors (500, 503)
    // ========================================================================
    /// Internal server error
    InternalError,

    /// Service is temporarily unavailable
    ServiceUnavailable,

    /// Database connection pool exhausted
    ConnectionPoolExhausted,
}

impl ErrorCode {
    /// Get the HTTP status code for this error code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::ValidationFailed
            | ErrorCode::InvalidInput
            | ErrorCode::InvalidFormat
            | ErrorCode::UpdateFailed => StatusCode::BAD_REQUEST,

            ErrorCode::CustomerNotFound | ErrorCode::RouteNotFound => StatusCode::NOT_FOUND,

            ErrorCode::DuplicateEmail | ErrorCode::ConcurrentModification => StatusCode::CONFLICT,

            ErrorCode::ServiceUnavailable | ErrorCode::ConnectionPoolExhausted => {
                StatusCode::SERVICE_UNAVAILABLE
            }

            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a default message for this error code.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Request validation failed",
            ErrorCode::InvalidInput => "Invalid input data",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::UpdateFailed => "Customer update failed",
            ErrorCode::CustomerNotFound => "Customer not found",
            ErrorCode::RouteNotFound => "Route not found",
            ErrorCode::DuplicateEmail => "Email is already in use",
            ErrorCode::ConcurrentModification => "Concurrent modification detected",
            ErrorCode::InternalError => GENERIC_ERROR_MESSAGE,
            ErrorCode::ServiceUnavailable => "Service temporarily unavailable",
            ErrorCode::ConnectionPoolExhausted => "Connection pool exhausted",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ============================================================================
// API ERROR STRUCT
// ============================================================================

/// Structured error response for API operations.
///
/// Serialized as `{ "statusCode", "code", "message", "detail" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// HTTP status, duplicated in the body for clients that only see JSON
    pub status_code: u16,

    /// Error code categorizing the error
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,

    /// Optional additional details (field errors, offending input, etc.)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status_code: code.status_code().as_u16(),
            code,
            message: message.into(),
            detail: None,
        }
    }

    /// Create a new API error with the given code, using the default message.
    pub fn from_code(code: ErrorCode) -> Self {
        Self::new(code, code.default_message())
    }

    /// Add additional details to the error.
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.detail = Some(detail);
        self
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }

    // ========================================================================
    // Convenience constructors for common errors
    // ========================================================================

    /// Create a ValidationFailed error.
    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    /// Build a ValidationFailed error listing every field failure.
    pub fn from_validation_errors(errors: &[ValidationError]) -> Self {
        let message = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        let detail = errors
            .iter()
            .map(|e| serde_json::json!({ "field": e.field(), "message": e.to_string() }))
            .collect::<Vec<_>>();
        Self::validation_failed(message).with_detail(serde_json::Value::Array(detail))
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Create an InvalidFormat error.
    pub fn invalid_format(field: &str, expected: &str) -> Self {
        Self::new(
            ErrorCode::InvalidFormat,
            format!("Field '{}' has invalid format, expected {}", field, expected),
        )
    }

    /// Create a CustomerNotFound error with a custom message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CustomerNotFound, message)
    }

    /// Create an InternalError. The message is logged, never returned.
    pub fn internal_error(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::error!(error = %message, "Internal error");
        Self::from_code(ErrorCode::InternalError)
    }

    /// Create a ConnectionPoolExhausted error.
    pub fn connection_pool_exhausted() -> Self {
        Self::from_code(ErrorCode::ConnectionPoolExhausted)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// ============================================================================
// AXUM INTEGRATION
// ============================================================================

/// Implement IntoResponse for ApiError to enable automatic error handling in Axum.
///
/// ```ignore
/// async fn handler() -> Result<Json<CustomerResponse>, ApiError> {
///     Err(ApiError::not_found("no such customer"))
/// }
/// ```
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self);
        (status, body).into_response()
    }
}

// ============================================================================
// CONVERSIONS FROM DOMAIN ERRORS
// ============================================================================

/// The single edge where the customer error taxonomy becomes HTTP.
impl From<CustomerError> for ApiError {
    fn from(err: CustomerError) -> Self {
        match err {
            CustomerError::NotFound { ref id, .. } => {
                ApiError::not_found(err.to_string()).with_detail(serde_json::json!({ "id": id }))
            }
            CustomerError::Validation(e) => ApiError::from_validation_errors(&[e]),
            CustomerError::Storage(e) => ApiError::from(e),
            CustomerError::Config(e) => ApiError::internal_error(e.to_string()),
            CustomerError::Cache(e) => ApiError::internal_error(e.to_string()),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::DuplicateEmail { ref email } => {
                ApiError::new(ErrorCode::DuplicateEmail, err.to_string())
                    .with_detail(serde_json::json!({ "email": email }))
            }
            StorageError::ConcurrentModification { .. } => {
                ApiError::new(ErrorCode::ConcurrentModification, err.to_string())
            }
            StorageError::UpdateFailed { ref reason, .. } => {
                tracing::warn!(error = %err, "Storage rejected update");
                ApiError::from_code(ErrorCode::UpdateFailed)
                    .with_detail(serde_json::json!(reason))
            }
            StorageError::PoolExhausted => {
                tracing::error!(error = %err, "Connection pool exhausted");
                ApiError::connection_pool_exhausted()
            }
            StorageError::Unavailable { .. } => {
                tracing::error!(error = %err, "Storage unavailable");
                ApiError::from_code(ErrorCode::ServiceUnavailable)
            }
            StorageError::InsertFailed { .. }
            | StorageError::QueryFailed { .. }
            | StorageError::LockPoisoned => ApiError::internal_error(err.to_string()),
        }
    }
}

/// Convert from serde_json::Error to ApiError.
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        tracing::debug!("JSON error: {:?}", err);
        ApiError::invalid_input(format!("Invalid JSON: {}", err))
    }
}

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

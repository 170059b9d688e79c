//! # API Error Type
//!
//! Unified error type for the command layer.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  commands::record::import_mapping(...)                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  registrar-core returns CoreError                                       │
//! │    Format ─────────► FORMAT_ERROR                                       │
//! │    MissingField ───► MISSING_FIELD                                      │
//! │    Validation ─────► VALIDATION_ERROR                                   │
//! │    NotFound ───────► NOT_FOUND                                          │
//! │    Overflow ───────► OVERFLOW                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ApiError { code, message }  (serializable)                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use registrar_core::CoreError;
use serde::Serialize;
use thiserror::Error;

/// Error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "MISSING_FIELD",
///   "message": "Missing required field: amount"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("[{code:?}] {message}")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable message
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed delimited text or wrongly typed value
    FormatError,

    /// A mapping lacked a required key
    MissingField,

    /// A value failed its range or pattern check
    ValidationError,

    /// Unknown record id or catalog code
    NotFound,

    /// A total or adjusted amount is too large to represent
    Overflow,

    /// Anything else (bad configuration, bad JSON)
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::Format { .. } => ErrorCode::FormatError,
            CoreError::MissingField { .. } => ErrorCode::MissingField,
            CoreError::Validation(_) => ErrorCode::ValidationError,
            CoreError::NotFound { .. } => ErrorCode::NotFound,
            CoreError::Overflow { .. } => ErrorCode::Overflow,
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::internal(format!("Invalid JSON: {}", err))
    }
}

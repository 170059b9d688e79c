//! # Error Types
//!
//! Domain-specific error types for registrar-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  registrar-core errors (this file)                                     │
//! │  ├── CoreError        - Construction and registry failures             │
//! │  │   ├── Format         malformed delimited text / wrong value type    │
//! │  │   ├── MissingField   mapping lacks a required key                   │
//! │  │   ├── Validation     a value fails its predicate                    │
//! │  │   ├── NotFound       unknown record id or catalog code              │
//! │  │   └── Overflow       a derived amount does not fit in i64 cents     │
//! │  └── ValidationError  - Predicate failures (range, pattern, length)    │
//! │                                                                         │
//! │  registrar-demo errors (app)                                           │
//! │  └── ApiError         - What the command layer reports (serialized)    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → caller                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure is returned to the immediate caller. Nothing here is
//! retried, swallowed or logged.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Errors produced by construction paths and registry operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Delimited text or a mapping value could not be parsed.
    ///
    /// ## When This Occurs
    /// - `"Alice-75000"` split on `-` yields 2 fields instead of 3
    /// - `"Alice-lots-Engineering"` has a non-numeric amount
    /// - A mapping carries `"amount": true`
    #[error("Malformed input '{input}': {reason}")]
    Format { input: String, reason: String },

    /// A mapping is missing one of the required keys.
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A parsed value failed validation (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A record id or catalog code is unknown.
    #[error("{entity} not found: {key}")]
    NotFound { entity: String, key: String },

    /// A total or adjusted amount is too large to represent.
    #[error("Amount overflow in {operation}")]
    Overflow { operation: String },
}

impl CoreError {
    /// Builds a format error for the given raw input.
    pub fn format(input: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::Format {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Builds a missing-field error.
    pub fn missing(field: &str) -> Self {
        CoreError::MissingField {
            field: field.to_string(),
        }
    }

    pub fn overflow(operation: &str) -> Self {
        CoreError::Overflow {
            operation: operation.to_string(),
        }
    }

    /// Builds a not-found error.
    pub fn not_found(entity: &str, key: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity: entity.to_string(),
            key: key.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the validators in [`crate::validation`] before a record is
/// accepted or a configuration value is applied.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// A monetary amount lies outside the accepted bounds.
    #[error("{field} {value} must be between {min} and {max}")]
    AmountOutOfRange {
        field: String,
        value: Money,
        min: Money,
        max: Money,
    },

    /// An integral value (e.g. basis points) is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Text does not match the structural pattern it is checked against.
    #[error("{field} '{value}' does not match pattern {pattern}")]
    PatternMismatch {
        field: String,
        value: String,
        pattern: String,
    },

    /// Invalid format (e.g. bad regex, inverted bounds).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

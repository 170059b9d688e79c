//! # Commands
//!
//! The operations the application exposes. Each command takes the state it
//! needs by reference and returns a serializable DTO or an [`ApiError`].
//!
//! ## Command Categories
//! - [`record`]: Import, list, update and clear records
//! - [`pricing`]: Rate configuration, adjusted prices, aggregates
//! - [`config`]: Effective configuration

pub mod config;
pub mod pricing;
pub mod record;

use uuid::Uuid;

use crate::error::{ApiError, ErrorCode};

/// Parses a record id passed in as text.
pub(crate) fn parse_record_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| {
        ApiError::new(
            ErrorCode::ValidationError,
            format!("Invalid record id: {}", raw),
        )
    })
}

//! # Validation Module
//!
//! Pure validators. None of these read or write registry state; the
//! registry passes its configured bounds and pattern in explicitly.
//!
//! ## Two Flavours
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Predicates (bool)              Validators (ValidationResult)          │
//! │  ─────────────────              ─────────────────────────────          │
//! │  is_valid_amount(v, lo, hi)     validate_amount(v, &bounds)            │
//! │  is_valid_code(text, &re)       validate_code(field, text, &re)        │
//! │  is_valid_sku(text)             validate_name / validate_category      │
//! │                                 validate_rate_bps / validate_bounds    │
//! │                                                                         │
//! │  Predicates answer a question. Validators explain the answer and are   │
//! │  what construction paths use before accepting a record.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use registrar_core::money::Money;
//! use registrar_core::validation::{is_valid_amount, is_valid_sku};
//!
//! let low = Money::from_major(30_000);
//! let high = Money::from_major(1_000_000);
//! assert!(is_valid_amount(Money::from_major(50_000), low, high));
//! assert!(!is_valid_amount(Money::from_major(25_000), low, high));
//!
//! assert!(is_valid_sku("ABC12345"));
//! assert!(!is_valid_sku("abc12345"));
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::AmountBounds;
use crate::{MAX_NAME_LEN, SKU_PATTERN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

static SKU_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(SKU_PATTERN).expect("SKU_PATTERN is a valid regex"));

// =============================================================================
// Predicates
// =============================================================================

/// Returns true iff `low <= value <= high`.
#[inline]
pub fn is_valid_amount(value: Money, low: Money, high: Money) -> bool {
    low <= value && value <= high
}

/// Returns true iff `pattern` matches `text`.
///
/// Matching is unanchored unless the pattern itself is anchored with
/// `^...$`, as [`SKU_PATTERN`] is.
#[inline]
pub fn is_valid_code(text: &str, pattern: &Regex) -> bool {
    pattern.is_match(text)
}

/// Three uppercase letters followed by five digits.
///
/// ```rust
/// use registrar_core::validation::is_valid_sku;
///
/// assert!(is_valid_sku("ELC00042"));
/// assert!(!is_valid_sku("EL00042"));
/// assert!(!is_valid_sku("ELC000421"));
/// ```
pub fn is_valid_sku(text: &str) -> bool {
    is_valid_code(text, &SKU_REGEX)
}

/// The compiled [`SKU_PATTERN`].
pub fn sku_pattern() -> &'static Regex {
    &SKU_REGEX
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a record name: non-empty after trimming, at most 200 characters.
pub fn validate_name(name: &str) -> ValidationResult<()> {
    validate_label("name", name)
}

/// Validates free text named `field` with the same rules as a record name.
pub fn validate_label(field: &str, text: &str) -> ValidationResult<()> {
    let text = text.trim();

    if text.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if text.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a category: non-empty after trimming, and matching `pattern`
/// when one is configured.
pub fn validate_category(category: &str, pattern: Option<&Regex>) -> ValidationResult<()> {
    let category = category.trim();

    if category.is_empty() {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }

    if let Some(pattern) = pattern {
        validate_code("category", category, pattern)?;
    }

    Ok(())
}

/// Validates `text` against `pattern`, naming `field` in the error.
pub fn validate_code(field: &str, text: &str, pattern: &Regex) -> ValidationResult<()> {
    if is_valid_code(text, pattern) {
        Ok(())
    } else {
        Err(ValidationError::PatternMismatch {
            field: field.to_string(),
            value: text.to_string(),
            pattern: pattern.as_str().to_string(),
        })
    }
}

/// Compiles a user-supplied pattern, reporting a bad regex as a
/// validation error on `field`.
pub fn compile_pattern(field: &str, pattern: &str) -> ValidationResult<Regex> {
    Regex::new(pattern).map_err(|e| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: e.to_string(),
    })
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an amount against inclusive bounds.
///
/// ## Where It Runs
/// ```text
/// "Bob-65000-Sales" ──┐
/// {"amount": 65000} ──┼──► parse ──► validate_amount ← THIS ──► register
/// catalog "12345"  ───┘                    │
///                                          └── outside [min, max]
///                                              → AmountOutOfRange
/// ```
pub fn validate_amount(value: Money, bounds: &AmountBounds) -> ValidationResult<()> {
    if bounds.contains(value) {
        return Ok(());
    }

    Err(ValidationError::AmountOutOfRange {
        field: "amount".to_string(),
        value,
        min: bounds.min,
        max: bounds.max,
    })
}

/// Validates a rate in basis points: 0 to 10000 (0% to 100%).
pub fn validate_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: "rate".to_string(),
            min: 0,
            max: 10_000,
        });
    }

    Ok(())
}

/// Rejects inverted bounds (`min > max`).
pub fn validate_bounds(bounds: &AmountBounds) -> ValidationResult<()> {
    if bounds.min > bounds.max {
        return Err(ValidationError::InvalidFormat {
            field: "amount_bounds".to_string(),
            reason: format!("min {} exceeds max {}", bounds.min, bounds.max),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Domain Types
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Record      │   │      Rate       │   │  AmountBounds   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  bps (u32)      │   │  min (Money)    │       │
//! │  │  name           │   │  800 = 8%       │   │  max (Money)    │       │
//! │  │  amount (Money) │   └─────────────────┘   └─────────────────┘       │
//! │  │  category       │                                                    │
//! │  │  created_at     │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A Record never stores a derived value. Anything computed from the
//! registry configuration (see [`crate::registry::Registry::adjusted_amount`])
//! is recomputed on every call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Rate
// =============================================================================

/// A shared rate in basis points (bps).
///
/// 1 basis point = 0.01%, so 800 bps = 8% and 10000 bps = 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Creates a rate from a percentage, e.g. `8.25` → 825 bps.
    pub fn from_percentage(pct: f64) -> Self {
        Rate((pct * 100.0).round().max(0.0) as u32)
    }

    /// Creates a rate from a fraction, e.g. `0.08` → 800 bps.
    pub fn from_fraction(fraction: f64) -> Self {
        Rate((fraction * 10_000.0).round().max(0.0) as u32)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::from_bps(crate::DEFAULT_RATE_BPS)
    }
}

// =============================================================================
// Amount Bounds
// =============================================================================

/// Inclusive `[min, max]` range every record amount must fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountBounds {
    pub min: Money,
    pub max: Money,
}

impl AmountBounds {
    pub const fn new(min: Money, max: Money) -> Self {
        AmountBounds { min, max }
    }

    /// Bounds that accept any amount.
    pub const fn unbounded() -> Self {
        AmountBounds {
            min: Money::from_cents(i64::MIN),
            max: Money::from_cents(i64::MAX),
        }
    }

    #[inline]
    pub fn contains(&self, value: Money) -> bool {
        crate::validation::is_valid_amount(value, self.min, self.max)
    }
}

impl Default for AmountBounds {
    /// `[30,000.00, 1,000,000.00]`
    fn default() -> Self {
        AmountBounds::new(
            Money::from_major(crate::DEFAULT_MIN_AMOUNT),
            Money::from_major(crate::DEFAULT_MAX_AMOUNT),
        )
    }
}

// =============================================================================
// Record
// =============================================================================

/// One constructed domain entity (an employee, a product, ...).
///
/// Fields are private so that a record can only change through
/// [`crate::registry::Registry::update_category`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    id: Uuid,
    name: String,
    amount: Money,
    category: String,
    created_at: DateTime<Utc>,
}

impl Record {
    /// Creates a record with a fresh id. Inputs are expected to be validated.
    pub(crate) fn new(name: String, amount: Money, category: String) -> Self {
        Record {
            id: Uuid::new_v4(),
            name,
            amount,
            category,
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn amount(&self) -> Money {
        self.amount
    }

    #[inline]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn set_category(&mut self, category: String) {
        self.category = category;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_constructors() {
        assert_eq!(Rate::from_bps(825).bps(), 825);
        assert_eq!(Rate::from_percentage(8.25).bps(), 825);
        assert_eq!(Rate::from_fraction(0.08).bps(), 800);
        assert_eq!(Rate::from_fraction(0.10).bps(), 1000);
        assert_eq!(Rate::from_fraction(-0.5).bps(), 0);
        assert!((Rate::from_bps(825).percentage() - 8.25).abs() < 0.001);
    }

    #[test]
    fn test_rate_default_is_eight_percent() {
        assert_eq!(Rate::default().bps(), 800);
    }

    #[test]
    fn test_amount_bounds_inclusive() {
        let bounds = AmountBounds::default();
        assert!(bounds.contains(Money::from_major(30_000)));
        assert!(bounds.contains(Money::from_major(1_000_000)));
        assert!(!bounds.contains(Money::from_cents(2_999_999)));
        assert!(!bounds.contains(Money::from_cents(100_000_001)));
        assert!(AmountBounds::unbounded().contains(Money::from_cents(-1)));
    }

    #[test]
    fn test_record_ids_are_unique() {
        let a = Record::new("Alice".into(), Money::from_major(1), "Ops".into());
        let b = Record::new("Alice".into(), Money::from_major(1), "Ops".into());
        assert_ne!(a.id(), b.id());
        assert_eq!(a.name(), "Alice");
        assert_eq!(a.category(), "Ops");
    }
}

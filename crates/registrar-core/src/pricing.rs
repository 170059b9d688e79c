//! # Pricing Utilities
//!
//! Stateless calculations that belong next to records but need neither a
//! record nor a registry: discounts, bonuses and display formatting.

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Bonus percentage (in bps) for ratings outside the table.
const DEFAULT_BONUS_BPS: u32 = 1000;

/// A 1-5 performance rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceRating(u8);

impl PerformanceRating {
    /// Any value is accepted; values outside 1-5 earn the default bonus.
    pub const fn new(value: u8) -> Self {
        PerformanceRating(value)
    }

    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Bonus share in basis points.
    ///
    /// | Rating | Meaning              | Bonus |
    /// |--------|----------------------|-------|
    /// | 5      | Outstanding          | 20%   |
    /// | 4      | Exceeds expectations | 15%   |
    /// | 3      | Meets expectations   | 10%   |
    /// | 2      | Needs improvement    | 5%    |
    /// | 1      | Unsatisfactory       | 0%    |
    /// | other  |                      | 10%   |
    pub const fn bonus_bps(&self) -> u32 {
        match self.0 {
            5 => 2000,
            4 => 1500,
            3 => 1000,
            2 => 500,
            1 => 0,
            _ => DEFAULT_BONUS_BPS,
        }
    }
}

/// Annual bonus for an amount (salary) at a given rating.
///
/// ```rust
/// use registrar_core::money::Money;
/// use registrar_core::pricing::{annual_bonus, PerformanceRating};
///
/// let bonus = annual_bonus(Money::from_major(75_000), PerformanceRating::new(4));
/// assert_eq!(bonus, Money::from_major(11_250));
/// ```
pub fn annual_bonus(amount: Money, rating: PerformanceRating) -> Money {
    amount - amount.apply_percentage_discount(rating.bonus_bps())
}

/// Price after a percentage discount given in whole percent.
///
/// Percentages above 100 are clamped to 100.
pub fn calculate_discount(price: Money, discount_percent: u32) -> Money {
    price.apply_percentage_discount(discount_percent.min(100) * 100)
}

/// Currency display with thousands separators, e.g. `$1,234.56`.
pub fn format_currency(amount: Money) -> String {
    amount.format_grouped()
}

//! # Money Module
//!
//! Provides the `Money` type used for every record amount.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With binary floats:                                                    │
//! │    100 × (1 + 0.10) = 110.00000000000001                                │
//! │                                                                         │
//! │  With integer cents and basis points:                                   │
//! │    10000 cents × (10000 + 1000) bps / 10000 = 11000 cents = $110.00     │
//! │                                                                         │
//! │  Input text such as "12.99" is parsed digit by digit, never through    │
//! │  an f64, so no value is ever approximated.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use registrar_core::money::Money;
//!
//! let price: Money = "12.99".parse().unwrap();
//! assert_eq!(price.cents(), 1299);
//!
//! let total = price * 3 + Money::from_cents(3);
//! assert_eq!(total.to_string(), "$39.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;
use thiserror::Error;

use crate::types::Rate;

/// Basis points in 100%.
const BPS_SCALE: i128 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in minor units (cents).
///
/// Signed so that refunds and discounts can be expressed; the registry's
/// amount bounds decide whether a negative value is acceptable for a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// ```rust
    /// use registrar_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(30_000).cents(), 3_000_000);
    /// ```
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion (truncated toward zero).
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion, always 0-99.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Returns `self × rate`, rounded half away from zero to the cent.
    ///
    /// `None` when the result does not fit in an `i64` of cents.
    ///
    /// ## Example
    /// ```rust
    /// use registrar_core::money::Money;
    /// use registrar_core::types::Rate;
    ///
    /// let base = Money::from_cents(1000);           // $10.00
    /// let part = base.calculate_adjustment(Rate::from_bps(825)).unwrap(); // 8.25%
    /// assert_eq!(part.cents(), 83);                 // $0.825 → $0.83
    /// ```
    pub fn calculate_adjustment(&self, rate: Rate) -> Option<Money> {
        let scaled = self.0 as i128 * rate.bps() as i128;
        to_money(div_round(scaled, BPS_SCALE))
    }

    /// Returns `self × (1 + rate)`, or `None` when it does not fit.
    ///
    /// This is the derived "price with adjustment" of a record. It is always
    /// computed from the rate passed in, so callers that hold a registry
    /// get the rate in force at call time. The whole product is taken in
    /// i128 before narrowing.
    ///
    /// ```rust
    /// use registrar_core::money::Money;
    /// use registrar_core::types::Rate;
    ///
    /// let base = Money::from_major(100);
    /// assert_eq!(base.with_adjustment(Rate::from_bps(800)), Some(Money::from_major(108)));
    /// assert_eq!(base.with_adjustment(Rate::from_bps(1000)), Some(Money::from_major(110)));
    /// assert_eq!(Money::from_cents(i64::MAX).with_adjustment(Rate::from_bps(800)), None);
    /// ```
    pub fn with_adjustment(&self, rate: Rate) -> Option<Money> {
        let scaled = self.0 as i128 * (BPS_SCALE + rate.bps() as i128);
        to_money(div_round(scaled, BPS_SCALE))
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ## Arguments
    /// * `discount_bps` - Discount in basis points (2000 = 20%)
    ///
    /// ```rust
    /// use registrar_core::money::Money;
    ///
    /// let price = Money::from_cents(2999);              // $29.99
    /// assert_eq!(price.apply_percentage_discount(2000).cents(), 2399);
    /// ```
    ///
    /// Discounts above 100% are treated as 100%.
    pub fn apply_percentage_discount(&self, discount_bps: u32) -> Money {
        let bps = (discount_bps as i128).min(BPS_SCALE);
        let discount = div_round(self.0 as i128 * bps, BPS_SCALE);
        Money::from_cents(self.0 - discount as i64)
    }

    /// Arithmetic mean of `values`, rounded half away from zero.
    ///
    /// Returns zero for empty input.
    pub fn mean<I>(values: I) -> Money
    where
        I: IntoIterator<Item = Money>,
    {
        let (sum, count) = values
            .into_iter()
            .fold((0i128, 0i128), |(sum, count), m| (sum + m.0 as i128, count + 1));

        if count == 0 {
            return Money::zero();
        }
        Money::from_cents(div_round(sum, count) as i64)
    }

    /// Sum of `values`, or `None` when the total does not fit.
    ///
    /// ```rust
    /// use registrar_core::money::Money;
    ///
    /// let amounts = [Money::from_cents(150), Money::from_cents(250)];
    /// assert_eq!(Money::checked_sum(amounts), Some(Money::from_cents(400)));
    /// assert_eq!(Money::checked_sum([Money::from_cents(i64::MAX), Money::from_cents(1)]), None);
    /// ```
    pub fn checked_sum<I>(values: I) -> Option<Money>
    where
        I: IntoIterator<Item = Money>,
    {
        let sum = values
            .into_iter()
            .fold(0i128, |sum, m| sum + m.0 as i128);
        to_money(sum)
    }

    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Parses a decimal like [`FromStr`], rounding any digits past the cent
    /// half away from zero instead of rejecting them.
    ///
    /// ```rust
    /// use registrar_core::money::Money;
    ///
    /// assert_eq!(Money::parse_rounded("45000.125").unwrap().cents(), 4_500_013);
    /// assert_eq!(Money::parse_rounded("-0.005").unwrap().cents(), -1);
    /// assert_eq!(Money::parse_rounded("19.994").unwrap().cents(), 1_999);
    /// ```
    pub fn parse_rounded(text: &str) -> Result<Money, ParseMoneyError> {
        parse_decimal(text, Precision::RoundToCent)
    }

    /// Formats with thousands separators, e.g. `$1,234,567.89`.
    ///
    /// `Display` keeps the plain `$1234567.89` form for logs and errors.
    pub fn format_grouped(&self) -> String {
        let digits = self.dollars().unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}${}.{:02}", sign, grouped, self.cents_part())
    }
}

fn to_money(cents: i128) -> Option<Money> {
    i64::try_from(cents).ok().map(Money)
}

/// Integer division rounding half away from zero. `den` must be positive.
fn div_round(num: i128, den: i128) -> i128 {
    let half = den / 2;
    if num >= 0 {
        (num + half) / den
    } else {
        (num - half) / den
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Why a decimal string could not be read as Money.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMoneyError {
    #[error("amount is empty")]
    Empty,

    #[error("'{0}' is not a decimal number")]
    NotANumber(String),

    #[error("'{0}' has more than 2 decimal places")]
    TooPrecise(String),

    #[error("'{0}' is too large")]
    Overflow(String),
}

/// What to do with digits past the second decimal place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Precision {
    Exact,
    RoundToCent,
}

impl FromStr for Money {
    type Err = ParseMoneyError;

    /// Parses `[+-]digits[.d[d]]` exactly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_decimal(s, Precision::Exact)
    }
}

fn parse_decimal(s: &str, precision: Precision) -> Result<Money, ParseMoneyError> {
    let text = s.trim();
    if text.is_empty() {
        return Err(ParseMoneyError::Empty);
    }

    let (negative, unsigned) = match text.as_bytes()[0] {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };

    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (unsigned, ""),
    };

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty()
        || !all_digits(whole)
        || !all_digits(fraction)
        || (unsigned.contains('.') && fraction.is_empty())
    {
        return Err(ParseMoneyError::NotANumber(text.to_string()));
    }

    let (cents_digits, round_up) = if fraction.len() > 2 {
        if precision == Precision::Exact {
            return Err(ParseMoneyError::TooPrecise(text.to_string()));
        }
        (&fraction[..2], fraction.as_bytes()[2] >= b'5')
    } else {
        (fraction, false)
    };

    let overflow = || ParseMoneyError::Overflow(text.to_string());
    let whole: i64 = whole.parse().map_err(|_| overflow())?;
    let fraction: i64 = match cents_digits.len() {
        0 => 0,
        1 => cents_digits.parse::<i64>().map_err(|_| overflow())? * 10,
        _ => cents_digits.parse().map_err(|_| overflow())?,
    };

    let cents = whole
        .checked_mul(100)
        .and_then(|c| c.checked_add(fraction))
        .and_then(|c| c.checked_add(i64::from(round_up)))
        .ok_or_else(overflow)?;

    Ok(Money(if negative { -cents } else { cents }))
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

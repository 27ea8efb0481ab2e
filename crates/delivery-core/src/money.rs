//! # Money Module
//!
//! Provides the `Money` type for handling fee amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A delivery quote adds up to five fee components. Any float drift      │
//! │  means the breakdown lines no longer sum to the total shown.            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    cart 1500 + delivery 200 + small order 500 = 2200 cents, exactly    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use delivery_core::money::Money;
//!
//! let base = Money::from_cents(199);   // 1.99
//! let tier = Money::from_cents(100);   // 1.00
//! let delivery = base + tier;
//! assert_eq!(delivery.cents(), 299);
//!
//! let per_item = Money::from_cents(10);
//! assert_eq!(per_item.multiply_quantity(4).cents(), 40);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use ts_rs::TS;

use crate::types::Currency;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for EUR).
///
/// ## Design Decisions
/// - **i64 (signed)**: Subtraction is used for the small-order gap, so the
///   type must not wrap at zero
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Ord**: Caps are applied with `min`
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  policy.base_fee_cents ──┐                                              │
/// │  tier fee ───────────────┴──► delivery fee ──► min(cap) ──┐            │
/// │                                                           │            │
/// │  threshold - cart ──────────► small order surcharge ──────┤            │
/// │  items × per_item ──────────► item surcharge ─────────────┼──► total   │
/// │  bulk fee ────────────────────────────────────────────────┤            │
/// │  cart ────────────────────────────────────────────────────┘            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use delivery_core::money::Money;
    ///
    /// let fee = Money::from_cents(250); // Represents 2.50
    /// assert_eq!(fee.cents(), 250);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (euros) portion.
    ///
    /// ## Example
    /// ```rust
    /// use delivery_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).major(), 10);
    /// assert_eq!(Money::from_cents(-550).major(), -5);
    /// ```
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Multiplies money by a count (items, distance steps).
    ///
    /// ## Example
    /// ```rust
    /// use delivery_core::money::Money;
    ///
    /// let step_fee = Money::from_cents(50);
    /// assert_eq!(step_fee.multiply_quantity(2).cents(), 100);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Formats the amount for display in the given currency.
    ///
    /// ## Example
    /// ```rust
    /// use delivery_core::money::Money;
    /// use delivery_core::types::Currency;
    ///
    /// assert_eq!(Money::from_cents(1234).format(Currency::Eur), "12.34 €");
    /// ```
    pub fn format(&self, currency: Currency) -> String {
        format!("{} {}", self, currency.symbol())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering, no currency symbol. See [`Money::format`].
///
/// Honors width and alignment flags, so `{:>8}` right-aligns the amount.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        f.pad(&format!("{}{}.{:02}", sign, self.major().abs(), self.minor()))
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

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
        assert_eq!(Money::from_cents(7).to_string(), "0.07");
    }

    #[test]
    fn test_format_eur() {
        assert_eq!(Money::from_cents(2500).format(Currency::Eur), "25.00 €");
        assert_eq!(Money::from_cents(0).format(Currency::Eur), "0.00 €");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!(a.multiply_quantity(3).cents(), 3000);
    }

    #[test]
    fn test_min_applies_cap() {
        let fee = Money::from_cents(950);
        let cap = Money::from_cents(800);
        assert_eq!(fee.min(cap), cap);
        assert_eq!(Money::from_cents(300).min(cap).cents(), 300);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 200, 300].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_display_respects_width() {
        assert_eq!(format!("{:>6}", Money::from_cents(199)), "  1.99");
        assert_eq!(format!("{:<6}|", Money::from_cents(-50)), "-0.50 |");
        assert_eq!(format!("{:>3}", Money::from_cents(123456)), "1234.56");
    }
}

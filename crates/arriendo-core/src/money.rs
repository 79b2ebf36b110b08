//! # Money Module
//!
//! Provides the `Money` type for rent amounts.
//!
//! ## Whole Currency Units
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Chilean pesos have no minor unit in practice.                          │
//! │                                                                         │
//! │  Rent 290.000 moving in on day 16 of a 30-day month:                    │
//! │    290000 × 15 / 30 = 145000          (exact)                           │
//! │                                                                         │
//! │  Rent 333.333 moving in on day 20 of a 31-day month:                    │
//! │    333333 × 12 / 31 = 129032.129...   → 129032                          │
//! │                                                                         │
//! │  Every derived amount is rounded ONCE, here, with integer math, so the  │
//! │  UI never has to re-round what the engine returns.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding Rule
//! Round half up (half away from zero): `0.5 → 1`, `2.5 → 3`. This is what
//! `Math.round` does for the non-negative amounts quotations deal with.
//!
//! ## Usage
//! ```rust
//! use arriendo_core::money::Money;
//!
//! let rent = Money::from_pesos(290_000);
//! let prorated = rent.prorate(15, 30);
//! assert_eq!(prorated.pesos(), 145_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

use crate::types::Rate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole currency units.
///
/// Serializes as a plain JSON number (`290000`), which is what the
/// quotation UI reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole pesos.
    #[inline]
    pub const fn from_pesos(pesos: i64) -> Self {
        Money(pesos)
    }

    /// Returns the value in whole pesos.
    #[inline]
    pub const fn pesos(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Adds two amounts, or `None` if the sum does not fit in an `i64`.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(sum) => Some(Money(sum)),
            None => None,
        }
    }

    /// Charges `days_charged` out of `days_in_month` days of this monthly amount.
    ///
    /// ## Example
    /// ```rust
    /// use arriendo_core::money::Money;
    ///
    /// // Parking 50.000, moving in on day 16 of a 30-day month
    /// let parking = Money::from_pesos(50_000);
    /// assert_eq!(parking.prorate(15, 30).pesos(), 25_000);
    ///
    /// // Full month is the identity
    /// assert_eq!(parking.prorate(31, 31), parking);
    /// ```
    ///
    /// `days_in_month` is always 28..=31 when it comes from a calendar date;
    /// a zero divisor yields zero instead of panicking.
    pub fn prorate(&self, days_charged: u32, days_in_month: u32) -> Money {
        if days_in_month == 0 {
            return Money::zero();
        }
        let scaled = self.0 as i128 * days_charged as i128;
        Money(div_round_half_up(scaled, days_in_month as i128))
    }

    /// Applies a rate in basis points and returns the resulting amount.
    ///
    /// ## Example
    /// ```rust
    /// use arriendo_core::money::Money;
    /// use arriendo_core::types::Rate;
    ///
    /// let rent = Money::from_pesos(500_000);
    /// let discount = rent.apply_rate(Rate::from_percent(50));
    /// assert_eq!(discount.pesos(), 250_000);
    /// ```
    pub fn apply_rate(&self, rate: Rate) -> Money {
        // i128 keeps `amount * bps` from overflowing on large rents
        let scaled = self.0 as i128 * rate.bps() as i128;
        Money(div_round_half_up(scaled, 10_000))
    }
}

/// Integer division rounding half away from zero. `den` must be positive.
fn div_round_half_up(num: i128, den: i128) -> i64 {
    let rounded = if num >= 0 {
        (2 * num + den) / (2 * den)
    } else {
        -((-2 * num + den) / (2 * den))
    };
    rounded as i64
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Chilean-style display: `$1.234.567`.
///
/// ## Note
/// This is for logs and debugging. The UI formats amounts itself.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        write!(f, "{}${}", sign, grouped)
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

impl Sum for Money {
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
    fn test_display() {
        assert_eq!(Money::from_pesos(0).to_string(), "$0");
        assert_eq!(Money::from_pesos(999).to_string(), "$999");
        assert_eq!(Money::from_pesos(1_234).to_string(), "$1.234");
        assert_eq!(Money::from_pesos(290_000).to_string(), "$290.000");
        assert_eq!(Money::from_pesos(1_234_567).to_string(), "$1.234.567");
        assert_eq!(Money::from_pesos(-45_000).to_string(), "-$45.000");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_pesos(1000);
        let b = Money::from_pesos(500);

        assert_eq!((a + b).pesos(), 1500);
        assert_eq!((a - b).pesos(), 500);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.pesos(), 2000);
    }

    #[test]
    fn test_checked_add() {
        let a = Money::from_pesos(290_000);
        assert_eq!(a.checked_add(a), Some(Money::from_pesos(580_000)));
        assert_eq!(Money::from_pesos(i64::MAX).checked_add(Money::from_pesos(1)), None);
    }

    #[test]
    fn test_prorate_exact() {
        let rent = Money::from_pesos(290_000);
        assert_eq!(rent.prorate(30, 30).pesos(), 290_000);
        assert_eq!(rent.prorate(15, 30).pesos(), 145_000);
        assert_eq!(rent.prorate(1, 29).pesos(), 10_000);
    }

    #[test]
    fn test_prorate_rounds_half_up() {
        // 15 × 1 / 2 = 7.5 → 8
        assert_eq!(Money::from_pesos(15).prorate(1, 2).pesos(), 8);
        // 5 × 1 / 2 = 2.5 → 3 (not banker's 2)
        assert_eq!(Money::from_pesos(5).prorate(1, 2).pesos(), 3);
        // 333333 × 12 / 31 = 129032.129 → 129032
        assert_eq!(Money::from_pesos(333_333).prorate(12, 31).pesos(), 129_032);
        // 100000 × 1 / 31 = 3225.806 → 3226
        assert_eq!(Money::from_pesos(100_000).prorate(1, 31).pesos(), 3_226);
    }

    #[test]
    fn test_prorate_zero_divisor_is_zero() {
        assert_eq!(Money::from_pesos(100).prorate(1, 0), Money::zero());
    }

    #[test]
    fn test_apply_rate() {
        let rent = Money::from_pesos(450_000);
        assert_eq!(rent.apply_rate(Rate::from_bps(10_000)).pesos(), 450_000);
        assert_eq!(rent.apply_rate(Rate::from_bps(5_000)).pesos(), 225_000);
        assert_eq!(rent.apply_rate(Rate::zero()).pesos(), 0);
        // 33% of 145001 = 47850.33 → 47850
        assert_eq!(
            Money::from_pesos(145_001).apply_rate(Rate::from_percent(33)).pesos(),
            47_850
        );
        // 15% of 10 = 1.5 → 2
        assert_eq!(Money::from_pesos(10).apply_rate(Rate::from_percent(15)).pesos(), 2);
    }

    #[test]
    fn test_negative_rounding_is_symmetric() {
        assert_eq!(div_round_half_up(-5, 2), -3);
        assert_eq!(div_round_half_up(5, 2), 3);
        assert_eq!(div_round_half_up(-4, 3), -1);
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&Money::from_pesos(145_000)).unwrap();
        assert_eq!(json, "145000");
    }
}

//! # Calendar Module
//!
//! Month lengths and the move-in proration period.
//!
//! ## Proration
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Move-in 2024-04-16 (April has 30 days)                                 │
//! │                                                                         │
//! │   1 ........ 15 │ 16 ........................ 30                        │
//! │   not charged   │ charged: 30 - 16 + 1 = 15 days                        │
//! │                                                                         │
//! │  factor = days_charged / days_in_month = 15 / 30                        │
//! │                                                                         │
//! │  Move-in on the 1st → factor 1 (full month, no proration effect)       │
//! │  Move-in on the last day → factor 1/days_in_month (never zero)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Number of days in the given month of the given year.
///
/// ## Example
/// ```rust
/// use arriendo_core::calendar::days_in_month;
///
/// assert_eq!(days_in_month(2024, 2), 29);
/// assert_eq!(days_in_month(2023, 2), 28);
/// assert_eq!(days_in_month(2024, 4), 30);
/// ```
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// The slice of the move-in month a tenant pays for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProrationPeriod {
    pub start_date: NaiveDate,
    pub days_charged: u32,
    pub days_in_month: u32,
}

impl ProrationPeriod {
    /// Period from `start_date` through the end of its month, inclusive.
    pub fn starting(start_date: NaiveDate) -> Self {
        let days_in_month = days_in_month(start_date.year(), start_date.month());
        ProrationPeriod {
            start_date,
            days_charged: days_in_month - start_date.day() + 1,
            days_in_month,
        }
    }

    /// True when the whole month is charged (move-in on the 1st).
    pub fn is_full_month(&self) -> bool {
        self.days_charged == self.days_in_month
    }

    /// Prorates a monthly amount over this period.
    pub fn apply(&self, monthly: Money) -> Money {
        monthly.prorate(self.days_charged, self.days_in_month)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 1), 31);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 9), 30);
        assert_eq!(days_in_month(2024, 12), 31);
    }

    #[test]
    fn test_days_in_month_agrees_with_chrono() {
        for year in [1999, 2000, 2023, 2024, 2100] {
            for month in 1..=12 {
                let first = date(year, month, 1);
                let next = if month == 12 {
                    date(year + 1, 1, 1)
                } else {
                    date(year, month + 1, 1)
                };
                let expected = (next - first).num_days() as u32;
                assert_eq!(days_in_month(year, month), expected, "{year}-{month}");
            }
        }
    }

    #[test]
    fn test_first_of_month_is_full_month() {
        let period = ProrationPeriod::starting(date(2024, 4, 1));
        assert_eq!(period.days_charged, 30);
        assert_eq!(period.days_in_month, 30);
        assert!(period.is_full_month());
    }

    #[test]
    fn test_mid_month() {
        let period = ProrationPeriod::starting(date(2024, 4, 16));
        assert_eq!(period.days_charged, 15);
        assert!(!period.is_full_month());
        assert_eq!(period.apply(Money::from_pesos(290_000)).pesos(), 145_000);
    }

    #[test]
    fn test_last_day_charges_one_day() {
        let period = ProrationPeriod::starting(date(2024, 2, 29));
        assert_eq!(period.days_charged, 1);
        assert_eq!(period.days_in_month, 29);
        assert_eq!(period.apply(Money::from_pesos(290_000)).pesos(), 10_000);
    }
}

//! # Validation Module
//!
//! Input validation for quotation requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Web UI                                                       │
//! │  ├── Date picker with min = today                                      │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: HTTP handler                                                 │
//! │  └── JSON shape (deserialization)                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE, called by the pricing engine itself             │
//! │  ├── Dates parse and are not in the past                               │
//! │  ├── Selected add-ons carry a price                                    │
//! │  └── Amounts are in range                                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 4: Database CHECK constraints (price > 0, m2 > 0)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here defaults a missing value to zero: a selected parking spot
//! without a price is an error, not a free parking spot.

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of a unit identifier.
pub const MAX_UNIT_ID_LEN: usize = 64;

/// Largest amount accepted for any single rent, fee or add-on price.
///
/// One trillion pesos. With every input at or below this, the sum of all
/// quotation lines stays far inside `i64`.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

// =============================================================================
// Identifiers
// =============================================================================

/// Validates a unit identifier.
///
/// ## Rules
/// - Must not be empty
/// - At most 64 characters
pub fn validate_unit_id(unit_id: &str) -> ValidationResult<()> {
    let unit_id = unit_id.trim();

    if unit_id.is_empty() {
        return Err(ValidationError::Required {
            field: "unitId".to_string(),
        });
    }

    if unit_id.len() > MAX_UNIT_ID_LEN {
        return Err(ValidationError::InvalidFormat {
            field: "unitId".to_string(),
            reason: format!("must be at most {} characters", MAX_UNIT_ID_LEN),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Data
// =============================================================================

/// Validates a unit's monthly base rent.
///
/// ## Example
/// ```rust
/// use arriendo_core::money::Money;
/// use arriendo_core::validation::validate_unit_price;
///
/// assert!(validate_unit_price(Money::from_pesos(290_000)).is_ok());
/// assert!(validate_unit_price(Money::zero()).is_err());
/// assert!(validate_unit_price(Money::from_pesos(-1)).is_err());
/// ```
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }
    amount_in_range("price", price.pesos())
}

/// Validates a unit's floor area.
pub fn validate_floor_area(m2: f64) -> ValidationResult<()> {
    if !m2.is_finite() || m2 <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "m2".to_string(),
        });
    }
    Ok(())
}

/// Validates a unit's monthly common expenses. Zero is allowed.
pub fn validate_common_expenses(amount: Money) -> ValidationResult<()> {
    amount_in_range("commonExpenses", amount.pesos())
}

// =============================================================================
// Dates
// =============================================================================

/// Parses an ISO calendar date (`YYYY-MM-DD`).
///
/// ## Example
/// ```rust
/// use arriendo_core::validation::parse_start_date;
///
/// assert!(parse_start_date("2024-04-16").is_ok());
/// assert!(parse_start_date("16/04/2024").is_err());
/// assert!(parse_start_date("2024-02-30").is_err());
/// ```
pub fn parse_start_date(raw: &str) -> ValidationResult<NaiveDate> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: "startDate".to_string(),
        });
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| ValidationError::InvalidFormat {
        field: "startDate".to_string(),
        reason: format!("expected YYYY-MM-DD ({})", e),
    })
}

/// Rejects move-in dates before `today`. Today itself is allowed.
pub fn validate_start_date(date: NaiveDate, today: NaiveDate) -> ValidationResult<()> {
    if date < today {
        return Err(ValidationError::DateInPast {
            field: "startDate".to_string(),
            date,
            today,
        });
    }
    Ok(())
}

// =============================================================================
// Options
// =============================================================================

/// Validates one optional add-on (parking or storage) and returns its
/// monthly price.
///
/// ## Rules
/// ```text
/// selected │ price        │ available │ result
/// ─────────┼──────────────┼───────────┼──────────────────────────
/// false    │ anything     │ anything  │ Ok(0) - not charged
/// true     │ None         │ -         │ Err(Required)
/// true     │ Some(< 0)    │ -         │ Err(OutOfRange)
/// true     │ > MAX_AMOUNT │ -         │ Err(OutOfRange)
/// true     │ Some(>= 0)   │ false     │ Err(NotAvailable)
/// true     │ Some(>= 0)   │ true      │ Ok(price) - 0 is a free add-on
/// ```
pub fn validate_add_on(
    field: &str,
    selected: bool,
    price: Option<i64>,
    available: bool,
    unit_id: &str,
) -> ValidationResult<Money> {
    if !selected {
        return Ok(Money::zero());
    }

    let price = price.ok_or_else(|| ValidationError::Required {
        field: format!("{}Price", field),
    })?;
    amount_in_range(&format!("{}Price", field), price)?;

    if !available {
        return Err(ValidationError::NotAvailable {
            field: field.to_string(),
            unit_id: unit_id.to_string(),
        });
    }

    Ok(Money::from_pesos(price))
}

/// Validates the flat credit-report fee. Zero is allowed.
pub fn validate_credit_report_fee(fee: i64) -> ValidationResult<Money> {
    amount_in_range("creditReportFee", fee)?;
    Ok(Money::from_pesos(fee))
}

// =============================================================================
// Rates
// =============================================================================

/// Validates a promotional discount percentage (0..=100).
pub fn validate_discount_percent(percent: u32) -> ValidationResult<()> {
    if percent > 100 {
        return Err(ValidationError::OutOfRange {
            field: "discountPercent".to_string(),
            min: 0,
            max: 100,
        });
    }
    Ok(())
}

/// Validates a policy rate in basis points (0..=10000).
pub fn validate_rate_bps(field: &str, bps: u32) -> ValidationResult<()> {
    if bps > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 10_000,
        });
    }
    Ok(())
}

fn amount_in_range(field: &str, value: i64) -> ValidationResult<()> {
    if !(0..=MAX_AMOUNT).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_AMOUNT,
        });
    }
    Ok(())
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
    fn test_validate_unit_id() {
        assert!(validate_unit_id("u-101").is_ok());
        assert!(validate_unit_id("").is_err());
        assert!(validate_unit_id("   ").is_err());
        assert!(validate_unit_id(&"a".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(Money::from_pesos(1)).is_ok());
        assert!(validate_unit_price(Money::zero()).is_err());
        assert!(validate_unit_price(Money::from_pesos(-290_000)).is_err());
        assert!(validate_unit_price(Money::from_pesos(MAX_AMOUNT)).is_ok());

        let err = validate_unit_price(Money::from_pesos(i64::MAX)).unwrap_err();
        assert_eq!(err.reason(), "OUT_OF_RANGE");
    }

    #[test]
    fn test_validate_floor_area() {
        assert!(validate_floor_area(38.5).is_ok());
        assert!(validate_floor_area(0.0).is_err());
        assert!(validate_floor_area(-1.0).is_err());
        assert!(validate_floor_area(f64::NAN).is_err());
    }

    #[test]
    fn test_parse_start_date() {
        assert_eq!(parse_start_date("2024-04-16").unwrap(), date(2024, 4, 16));
        assert_eq!(parse_start_date(" 2024-04-16 ").unwrap(), date(2024, 4, 16));
        assert_eq!(parse_start_date("").unwrap_err().reason(), "REQUIRED");
        assert_eq!(parse_start_date("mañana").unwrap_err().reason(), "INVALID_FORMAT");
        assert_eq!(parse_start_date("2023-02-29").unwrap_err().reason(), "INVALID_FORMAT");
    }

    #[test]
    fn test_validate_start_date() {
        let today = date(2024, 4, 10);
        assert!(validate_start_date(today, today).is_ok());
        assert!(validate_start_date(date(2024, 5, 1), today).is_ok());

        let err = validate_start_date(date(2024, 4, 9), today).unwrap_err();
        assert_eq!(err.reason(), "DATE_IN_PAST");
    }

    #[test]
    fn test_add_on_not_selected_is_zero() {
        let price = validate_add_on("parking", false, None, false, "u-1").unwrap();
        assert!(price.is_zero());

        // Price is ignored when not selected
        let price = validate_add_on("parking", false, Some(50_000), true, "u-1").unwrap();
        assert!(price.is_zero());
    }

    #[test]
    fn test_add_on_selected_without_price_is_rejected() {
        let err = validate_add_on("parking", true, None, true, "u-1").unwrap_err();
        assert_eq!(
            err,
            ValidationError::Required {
                field: "parkingPrice".to_string()
            }
        );
    }

    #[test]
    fn test_add_on_selected_with_zero_price_is_free() {
        let price = validate_add_on("storage", true, Some(0), true, "u-1").unwrap();
        assert!(price.is_zero());
    }

    #[test]
    fn test_add_on_negative_or_unavailable() {
        let err = validate_add_on("storage", true, Some(-1), true, "u-1").unwrap_err();
        assert_eq!(err.reason(), "OUT_OF_RANGE");
        assert_eq!(err.field(), "storagePrice");

        let err = validate_add_on("parking", true, Some(50_000), false, "u-1").unwrap_err();
        assert_eq!(err.reason(), "NOT_AVAILABLE");
    }

    #[test]
    fn test_credit_report_fee() {
        assert_eq!(validate_credit_report_fee(0).unwrap(), Money::zero());
        assert_eq!(validate_credit_report_fee(8_000).unwrap().pesos(), 8_000);
        assert!(validate_credit_report_fee(-8_000).is_err());
        assert!(validate_credit_report_fee(MAX_AMOUNT).is_ok());
        assert_eq!(
            validate_credit_report_fee(i64::MAX).unwrap_err().reason(),
            "OUT_OF_RANGE"
        );
    }

    #[test]
    fn test_huge_amounts_are_rejected() {
        let err = validate_add_on("parking", true, Some(i64::MAX), true, "u-1").unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                field: "parkingPrice".to_string(),
                min: 0,
                max: MAX_AMOUNT,
            }
        );

        let err = validate_common_expenses(Money::from_pesos(MAX_AMOUNT + 1)).unwrap_err();
        assert_eq!(err.field(), "commonExpenses");
    }

    #[test]
    fn test_rates() {
        assert!(validate_discount_percent(0).is_ok());
        assert!(validate_discount_percent(100).is_ok());
        assert!(validate_discount_percent(101).is_err());

        assert!(validate_rate_bps("guaranteeBps", 10_000).is_ok());
        assert!(validate_rate_bps("guaranteeBps", 10_001).is_err());
    }
}

//! # Error Types
//!
//! Domain-specific error types for arriendo-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  arriendo-core errors (this file)                                      │
//! │  ├── CoreError        - Quotation failures                             │
//! │  └── ValidationError  - Malformed quotation input                      │
//! │                                                                         │
//! │  arriendo-db errors (separate crate)                                   │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  HTTP errors (apps/api)                                                │
//! │  └── ApiError         - What the web UI sees (serialized)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → 4xx/5xx response       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Invalid input is rejected, never coerced into a plausible number
//! 2. Include context in error messages (field, unit ID, dates)
//! 3. Every validation failure has a stable machine-readable `reason()`

use chrono::NaiveDate;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Quotation errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The requested unit does not exist.
    #[error("Unit not found: {0}")]
    UnitNotFound(String),

    /// The unit exists but is not offered for rent.
    #[error("Unit {0} is not available for rent")]
    UnitUnavailable(String),

    /// The engine produced a breakdown that violates its own invariants.
    ///
    /// ## When This Occurs
    /// Never, if the input passed validation. Seeing this error means the
    /// arithmetic is wrong and must be fixed; it is not retryable.
    #[error("Quotation invariant violated on {line}: {reason}")]
    Computation { line: &'static str, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a computation error for the given line item.
    pub fn computation(line: &'static str, reason: impl Into<String>) -> Self {
        CoreError::Computation {
            line,
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when a quotation request doesn't meet requirements.
/// The HTTP layer turns them into `400 Bad Request`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    ///
    /// ## When This Occurs
    /// - `parkingSelected = true` without `parkingPrice`
    /// - `storageSelected = true` without `storagePrice`
    /// - Empty `unitId`
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., unparseable date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Move-in date lies before today.
    #[error("{field} {date} is before today ({today})")]
    DateInPast {
        field: String,
        date: NaiveDate,
        today: NaiveDate,
    },

    /// An add-on was selected but the unit does not offer it.
    #[error("{field} is not available for unit {unit_id}")]
    NotAvailable { field: String, unit_id: String },
}

impl ValidationError {
    /// Returns a stable, machine-readable reason code.
    ///
    /// ## Example
    /// ```rust
    /// use arriendo_core::ValidationError;
    ///
    /// let err = ValidationError::Required { field: "parkingPrice".to_string() };
    /// assert_eq!(err.reason(), "REQUIRED");
    /// ```
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::Required { .. } => "REQUIRED",
            ValidationError::MustBePositive { .. } => "MUST_BE_POSITIVE",
            ValidationError::OutOfRange { .. } => "OUT_OF_RANGE",
            ValidationError::InvalidFormat { .. } => "INVALID_FORMAT",
            ValidationError::DateInPast { .. } => "DATE_IN_PAST",
            ValidationError::NotAvailable { .. } => "NOT_AVAILABLE",
        }
    }

    /// Returns the name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::MustBePositive { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::DateInPast { field, .. }
            | ValidationError::NotAvailable { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::UnitUnavailable("u-301".to_string());
        assert_eq!(err.to_string(), "Unit u-301 is not available for rent");

        let err = CoreError::computation("netRent", "negative amount -5");
        assert_eq!(
            err.to_string(),
            "Quotation invariant violated on netRent: negative amount -5"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "parkingPrice".to_string(),
        };
        assert_eq!(err.to_string(), "parkingPrice is required");

        let err = ValidationError::DateInPast {
            field: "startDate".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            today: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "startDate 2024-03-01 is before today (2024-03-05)"
        );
    }

    #[test]
    fn test_reason_codes_and_fields() {
        let err = ValidationError::NotAvailable {
            field: "parking".to_string(),
            unit_id: "u-1".to_string(),
        };
        assert_eq!(err.reason(), "NOT_AVAILABLE");
        assert_eq!(err.field(), "parking");

        let err = ValidationError::OutOfRange {
            field: "discountPercent".to_string(),
            min: 0,
            max: 100,
        };
        assert_eq!(err.reason(), "OUT_OF_RANGE");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "unitId".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}

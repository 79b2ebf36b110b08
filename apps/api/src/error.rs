//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Arriendo                               │
//! │                                                                         │
//! │  Web UI                      Rust Backend                               │
//! │  ──────                      ────────────                               │
//! │                                                                         │
//! │  POST /api/quotations                                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Handler → Result<Json<T>, ApiError>                             │  │
//! │  │                                                                  │  │
//! │  │  JsonRejection ──────────────┐                                   │  │
//! │  │  DbError ────────────────────┼──► ApiError ──► (status, JSON) ──►│  │
//! │  │  CoreError / ValidationError ┘                                   │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄────────────────────────────────────────────────────────────────────  │
//! │                                                                         │
//! │  { "code": "VALIDATION_ERROR",                                          │
//! │    "reason": "REQUIRED",                                                │
//! │    "message": "parkingPrice is required" }                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `code` picks the status; `reason` tells the UI which field or rule
//! failed. Internal details of 5xx errors are logged, not returned.

use arriendo_core::{CoreError, ValidationError};
use arriendo_db::DbError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

/// API error returned from handlers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Error category; determines the HTTP status
    pub code: ErrorCode,

    /// Machine-readable rule that failed
    pub reason: String,

    /// Human-readable error message for display
    pub message: String,
}

/// Error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed or invalid input (400)
    ValidationError,

    /// Unit or building not found (404)
    NotFound,

    /// Unit exists but is not offered for rent (409)
    UnitUnavailable,

    /// Database operation failed (500)
    DatabaseError,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    /// HTTP status for this category.
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::UnitUnavailable => StatusCode::CONFLICT,
            ErrorCode::DatabaseError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, reason: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError {
            code,
            reason: reason.into(),
            message: message.into(),
        }
    }

    /// Creates a not found error (`reason` = `UNIT_NOT_FOUND`, ...).
    pub fn not_found(entity: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{}_NOT_FOUND", entity.to_uppercase()),
            format!("{} not found: {}", entity, id),
        )
    }

    /// Creates a database error with a generic message.
    fn database(reason: &str, message: &str) -> Self {
        ApiError::new(ErrorCode::DatabaseError, reason, message)
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        self.code.status()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Validation errors carry their own reason code.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::new(ErrorCode::ValidationError, err.reason(), err.to_string())
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnitNotFound(id) => ApiError::not_found("Unit", &id),
            CoreError::UnitUnavailable(ref id) => ApiError::new(
                ErrorCode::UnitUnavailable,
                "UNIT_UNAVAILABLE",
                format!("Unit {} is not available for rent", id),
            ),
            CoreError::Validation(v) => v.into(),
            CoreError::Computation { line, reason } => {
                error!(line = %line, reason = %reason, "Quotation invariant violated");
                ApiError::new(
                    ErrorCode::Internal,
                    "COMPUTATION_FAILED",
                    "The quotation could not be computed",
                )
            }
        }
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::Invalid(v) => v.into(),
            DbError::UniqueViolation { field, value } => ApiError::new(
                ErrorCode::ValidationError,
                "DUPLICATE",
                format!("{} '{}' already exists", field, value),
            ),
            DbError::ForeignKeyViolation { message } => {
                error!("Foreign key violation: {}", message);
                ApiError::new(ErrorCode::ValidationError, "INVALID_REFERENCE", "Invalid reference")
            }
            DbError::CheckViolation { message } => {
                error!("Check constraint violation: {}", message);
                ApiError::new(
                    ErrorCode::ValidationError,
                    "CONSTRAINT_VIOLATION",
                    "Record violates catalog constraints",
                )
            }
            DbError::Corrupt { entity, id, reason } => {
                error!(entity = %entity, id = %id, reason = %reason, "Corrupt catalog record");
                ApiError::database("CORRUPT_RECORD", "Catalog record could not be read")
            }
            DbError::Unavailable(e) => {
                error!("Catalog unavailable: {}", e);
                ApiError::database("UNAVAILABLE", "Catalog unavailable")
            }
            DbError::Schema(e) => {
                error!("Catalog schema upgrade failed: {}", e);
                ApiError::database("SCHEMA", "Catalog schema is out of date")
            }
            DbError::Rejected(e) => {
                error!("Catalog statement rejected: {}", e);
                ApiError::database("REJECTED", "Catalog operation failed")
            }
            DbError::Busy => ApiError::database("BUSY", "Catalog busy, retry shortly"),
            DbError::Driver(e) => {
                error!("Catalog driver error: {}", e);
                ApiError::database("DRIVER", "Catalog operation failed")
            }
        }
    }
}

/// Bodies that aren't valid `QuotationInput` JSON.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(
            ErrorCode::ValidationError,
            "MALFORMED_BODY",
            rejection.body_text(),
        )
    }
}

/// Query strings that don't parse (`?limit=abc`).
impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::new(
            ErrorCode::ValidationError,
            "MALFORMED_QUERY",
            rejection.body_text(),
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

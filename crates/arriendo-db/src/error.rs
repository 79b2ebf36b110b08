//! # Catalog Errors
//!
//! Everything that can go wrong between a repository call and SQLite.
//!
//! ## Who Sees What
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Record problems (caller's fault)     Catalog problems (operator's)     │
//! │  ────────────────────────────────     ─────────────────────────────     │
//! │  NotFound, UniqueViolation,           Unavailable, Schema, Busy,        │
//! │  ForeignKeyViolation,                 Rejected, Corrupt, Driver         │
//! │  CheckViolation, Invalid                                                │
//! │       │                                      │                          │
//! │       ▼                                      ▼                          │
//! │  4xx with the record named           500 DATABASE_ERROR, details only   │
//! │                                      in the server log                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use arriendo_core::ValidationError;
use thiserror::Error;

/// Catalog operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// No building or unit with that ID.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The ID is already taken.
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// A unit points at a building that does not exist.
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// A row broke a schema CHECK (`price > 0`, `m2 > 0`, ...).
    #[error("Constraint violation: {message}")]
    CheckViolation { message: String },

    /// A record was rejected before it reached SQL.
    #[error("Invalid record: {0}")]
    Invalid(#[from] ValidationError),

    /// A stored row could not be turned into a domain value, e.g.
    /// `buildings.badges` is not a JSON badge array.
    #[error("Corrupt {entity} {id}: {reason}")]
    Corrupt {
        entity: String,
        id: String,
        reason: String,
    },

    /// The catalog file could not be opened, or the pool was closed.
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    /// Bringing the schema up to date failed.
    #[error("Catalog schema upgrade failed: {0}")]
    Schema(String),

    /// Every connection stayed busy for the whole acquire timeout.
    #[error("Catalog busy: no free connection")]
    Busy,

    /// SQLite refused a statement for a reason other than a constraint.
    #[error("Statement rejected by SQLite: {0}")]
    Rejected(String),

    /// Anything else reported by sqlx or while encoding a column.
    #[error("Catalog driver error: {0}")]
    Driver(String),
}

impl DbError {
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    pub fn corrupt(
        entity: impl Into<String>,
        id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        DbError::Corrupt {
            entity: entity.into(),
            id: id.into(),
            reason: reason.into(),
        }
    }
}

/// ```text
/// RowNotFound                          → NotFound
/// Database("UNIQUE constraint ...")    → UniqueViolation
/// Database("FOREIGN KEY ...")          → ForeignKeyViolation
/// Database("CHECK constraint ...")     → CheckViolation
/// Database(other)                      → Rejected
/// PoolTimedOut                         → Busy
/// PoolClosed                           → Unavailable
/// anything else                        → Driver
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                if let Some(field) = msg.strip_prefix("UNIQUE constraint failed: ") {
                    DbError::UniqueViolation {
                        field: field.to_string(),
                        value: "unknown".to_string(),
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else if msg.contains("CHECK constraint failed") {
                    DbError::CheckViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::Rejected(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::Busy,
            sqlx::Error::PoolClosed => DbError::Unavailable("catalog was closed".to_string()),

            _ => DbError::Driver(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::Schema(err.to_string())
    }
}

pub type DbResult<T> = Result<T, DbError>;

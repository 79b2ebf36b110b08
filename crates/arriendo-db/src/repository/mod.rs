//! # Repository Module
//!
//! Catalog repositories.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP handler                                                           │
//! │       │  db.units().get_by_id("u-101")                                  │
//! │       ▼                                                                 │
//! │  UnitRepository / BuildingRepository                                    │
//! │       │  SQL + private row struct (sqlx::FromRow)                       │
//! │       ▼                                                                 │
//! │  Row ──TryFrom──► arriendo_core::{Unit, Building, BuildingSummary}      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Row structs stay private: callers only ever see core domain types.
//!
//! ## Available Repositories
//!
//! - [`BuildingRepository`](building::BuildingRepository) - Buildings and listing summaries
//! - [`UnitRepository`](unit::UnitRepository) - Units and availability

use uuid::Uuid;

pub mod building;
pub mod unit;

/// Generates a new record ID.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

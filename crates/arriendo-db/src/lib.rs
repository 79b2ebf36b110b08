//! # arriendo-db: Catalog Storage for Arriendo
//!
//! This crate provides the building/unit catalog the quotation endpoint
//! resolves units from. It uses SQLite with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Arriendo Data Flow                               │
//! │                                                                         │
//! │  POST /api/quotations { unitId, startDate, options }                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    arriendo-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│ BuildingRepo   │    │  (embedded)  │  │   │
//! │  │   │  SqlitePool   │    │ UnitRepo       │    │ 001_init.sql │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼  Unit + Building (badges)                                       │
//! │  arriendo-core PricingEngine                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Building and unit repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use arriendo_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./arriendo.db")).await?;
//!
//! let unit = db.units().get_by_id("u-101").await?;
//! let page = db.buildings().list_summaries(20, 0).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::building::BuildingRepository;
pub use repository::generate_id;
pub use repository::unit::UnitRepository;

//! # arriendo-core: Pure Pricing Logic for Arriendo
//!
//! This crate computes what a tenant pays when moving in. It contains the
//! quotation engine and the catalog types it reads, as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Arriendo Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web UI (listing, detail, quoter)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP / JSON                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    arriendo-api (axum)                          │   │
//! │  │    POST /api/quotations, GET /api/buildings, ...                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ arriendo-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ quotation │  │   money   │  │ calendar  │  │ promotion │  │   │
//! │  │   │  Engine   │  │   Money   │  │ Proration │  │  Badges   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    arriendo-db (Catalog)                        │   │
//! │  │              SQLite buildings, units, migrations                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`quotation`] - The pricing engine and its request/result types
//! - [`money`] - Money type with integer arithmetic and half-up rounding
//! - [`calendar`] - Month lengths and move-in proration
//! - [`promotion`] - Badge normalization into a promotion context
//! - [`types`] - Buildings, units, rates
//! - [`validation`] - Input rules
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same unit, request, promotions and "today" give the same result
//! 2. **No I/O**: the caller resolves the unit and supplies today's date
//! 3. **Integer Money**: whole pesos in i64, rounded once per line
//! 4. **Explicit Errors**: invalid input is an error, never a zero
//!
//! ## Example Usage
//!
//! ```rust
//! use arriendo_core::{compute_quotation, Money, PromotionContext};
//! use arriendo_core::quotation::{QuotationInput, QuotationOptions, UnitPricingInput};
//! use chrono::NaiveDate;
//!
//! let unit = UnitPricingInput {
//!     unit_id: "u-101".to_string(),
//!     price: Money::from_pesos(500_000),
//!     common_expenses: Money::zero(),
//!     parking_available: false,
//!     storage_available: false,
//!     available: true,
//! };
//! let input = QuotationInput {
//!     unit_id: "u-101".to_string(),
//!     start_date: "2024-05-01".to_string(),
//!     options: QuotationOptions {
//!         parking_selected: false,
//!         storage_selected: false,
//!         parking_price: None,
//!         storage_price: None,
//!         credit_report_fee: 0,
//!     },
//! };
//! let promotions = PromotionContext::new(true, 50).unwrap();
//! let today = NaiveDate::from_ymd_opt(2024, 4, 20).unwrap();
//!
//! let result = compute_quotation(&unit, &input, promotions, today).unwrap();
//! assert_eq!(result.lines.net_rent.pesos(), 250_000);
//! assert!(result.lines.commission.is_zero());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calendar;
pub mod error;
pub mod money;
pub mod promotion;
pub mod quotation;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use promotion::{BadgeKind, PromotionBadge, PromotionContext};
pub use quotation::{
    compute_quotation, PricingEngine, PricingPolicy, QuotationInput, QuotationResult,
};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default page size for building listings.
pub const DEFAULT_LIST_LIMIT: i64 = 20;

/// Largest page size a listing request may ask for.
pub const MAX_LIST_LIMIT: i64 = 100;

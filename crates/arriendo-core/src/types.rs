//! # Domain Types
//!
//! Catalog types shared by the database layer and the HTTP app.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐        ┌─────────────────────┐                 │
//! │  │      Building       │ 1    * │        Unit         │                 │
//! │  │  ─────────────────  │───────►│  ─────────────────  │                 │
//! │  │  id                 │        │  id, building_id    │                 │
//! │  │  name, comuna       │        │  tipologia, m2      │                 │
//! │  │  parking_price      │        │  price (monthly)    │                 │
//! │  │  storage_price      │        │  common_expenses    │                 │
//! │  │  badges ───────────────┐     │  estacionamiento    │                 │
//! │  └─────────────────────┘  │     │  bodega, disponible │                 │
//! │                           │     └──────────┬──────────┘                 │
//! │                           ▼                ▼                            │
//! │                  PromotionContext   UnitPricingInput                    │
//! │                           └───────┬────────┘                            │
//! │                                   ▼                                     │
//! │                            PricingEngine                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::promotion::{PromotionBadge, PromotionContext};
use crate::quotation::UnitPricingInput;
use crate::validation::ValidationResult;

// =============================================================================
// Rate
// =============================================================================

/// A fraction represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000. A guarantee of one month's rent is
/// 10000 bps; a half-month commission is 5000 bps. Integer bps keep every
/// rate exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Creates a rate from a whole percentage (`50` → 5000 bps).
    #[inline]
    pub const fn from_percent(percent: u32) -> Self {
        Rate(percent * 100)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    /// 100%: one full month.
    #[inline]
    pub const fn one_month() -> Self {
        Rate(10_000)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

// =============================================================================
// Building
// =============================================================================

/// A building listed on the site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Building {
    /// Unique identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Street address.
    pub address: String,

    /// Municipality (comuna).
    pub comuna: String,

    /// Monthly price of a parking spot, if the building rents them.
    ///
    /// Listing price only. A quotation charges the `parkingPrice` sent with
    /// the request, never this value.
    pub parking_price: Option<Money>,

    /// Monthly price of a storage unit, if the building rents them.
    ///
    /// Listing price only, like `parking_price`.
    pub storage_price: Option<Money>,

    /// Promotion badges shown on the listing.
    pub badges: Vec<PromotionBadge>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Building {
    /// Normalizes this building's badges into the engine's promotion context.
    ///
    /// See [`PromotionContext::from_badges`] for the rules.
    pub fn promotions(&self) -> ValidationResult<PromotionContext> {
        PromotionContext::from_badges(&self.badges)
    }
}

// =============================================================================
// Unit
// =============================================================================

/// A rentable unit inside a building.
///
/// ## Invariants
/// - `price > 0`
/// - `m2 > 0`
///
/// Both are enforced by the database schema and re-checked by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Unit {
    pub id: String,

    pub building_id: String,

    /// Layout code (e.g. "1D1B", "2D2B", "Studio").
    pub tipologia: String,

    /// Floor area in square meters.
    pub m2: f64,

    /// Full monthly base rent.
    pub price: Money,

    /// Monthly common-expense share (gastos comunes).
    pub common_expenses: Money,

    /// Parking can be rented with this unit.
    pub estacionamiento: bool,

    /// Storage can be rented with this unit.
    pub bodega: bool,

    /// Unit is currently offered for rent.
    pub disponible: bool,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Unit {
    /// Snapshot of the fields the pricing engine consumes.
    pub fn pricing_input(&self) -> UnitPricingInput {
        UnitPricingInput {
            unit_id: self.id.clone(),
            price: self.price,
            common_expenses: self.common_expenses,
            parking_available: self.estacionamiento,
            storage_available: self.bodega,
            available: self.disponible,
        }
    }
}

// =============================================================================
// Listing Projection
// =============================================================================

/// A building as shown in the listing grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BuildingSummary {
    #[serde(flatten)]
    pub building: Building,

    /// Number of units with `disponible = true`.
    pub available_units: i64,

    /// Lowest monthly rent among available units.
    pub from_price: Option<Money>,
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Quotation Endpoint
//!
//! `POST /api/quotations` turns a unit and a move-in date into the first
//! payment breakdown.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  { unitId, startDate, options }                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  units.get_by_id ──── None ────────────────────────────► 404            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  buildings.get_by_id ─ None ───────────────────────────► 404            │
//! │       │                                                                 │
//! │       ▼  badges → PromotionContext                                      │
//! │  PricingEngine::quote(unit, input, promotions, today)                   │
//! │       │         ├── unavailable ──────────────────────► 409            │
//! │       │         └── invalid input ────────────────────► 400            │
//! │       ▼                                                                 │
//! │  200 QuotationResult                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is persisted; the same request always yields the same breakdown
//! for the same catalog and date.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::{debug, info};

use arriendo_core::validation::validate_unit_id;
use arriendo_core::{QuotationInput, QuotationResult};

use crate::error::ApiError;
use crate::state::AppState;

/// Computes a quotation for one unit.
pub async fn create_quotation(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<QuotationInput>, JsonRejection>,
) -> Result<Json<QuotationResult>, ApiError> {
    let Json(input) = payload?;
    validate_unit_id(&input.unit_id)?;
    let unit_id = input.unit_id.trim().to_string();

    debug!(unit_id = %unit_id, start_date = %input.start_date, "Quotation requested");

    let unit = state
        .db
        .units()
        .get_by_id(&unit_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Unit", &unit_id))?;

    let building = state
        .db
        .buildings()
        .get_by_id(&unit.building_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Building", &unit.building_id))?;

    let promotions = building.promotions()?;
    let result = state.engine.quote(
        &unit.pricing_input(),
        &input,
        promotions,
        state.clock.today(),
    )?;

    info!(
        unit_id = %result.meta.unit_id,
        start_date = %result.meta.start_date,
        days_charged = result.meta.days_charged,
        first_payment = result.first_payment().pesos(),
        "Quotation computed"
    );

    Ok(Json(result))
}

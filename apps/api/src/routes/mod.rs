//! # HTTP Routes
//!
//! ```text
//! POST /api/quotations          → quotations::create_quotation
//! GET  /api/buildings           → buildings::list_buildings
//! GET  /api/buildings/{id}      → buildings::get_building
//! GET  /health                  → health::health_check
//! ```

pub mod buildings;
pub mod health;
pub mod quotations;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/quotations", post(quotations::create_quotation))
        .route("/api/buildings", get(buildings::list_buildings))
        .route("/api/buildings/{id}", get(buildings::get_building))
        .route("/health", get(health::health_check))
        .with_state(state)
}

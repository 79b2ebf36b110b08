//! # Catalog Endpoints
//!
//! Read-only listing of buildings and their units, used by the web UI to
//! pick a unit before asking for a quotation.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use arriendo_core::{Building, BuildingSummary, Unit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};

use crate::error::ApiError;
use crate::state::AppState;

/// `?limit=&offset=` for the building listing.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListParams {
    /// Limit clamped to `1..=MAX_LIST_LIMIT`.
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_LIST_LIMIT)
            .clamp(1, MAX_LIST_LIMIT)
    }

    /// Offset, never negative.
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

/// One page of the building listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingPage {
    pub items: Vec<BuildingSummary>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// A building with all of its units.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingDetail {
    #[serde(flatten)]
    pub building: Building,
    pub units: Vec<Unit>,
}

/// Lists buildings with their available-unit count and starting price.
pub async fn list_buildings(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<BuildingPage>, ApiError> {
    let Query(params) = params?;
    let (limit, offset) = (params.limit(), params.offset());

    let buildings = state.db.buildings();
    let items = buildings.list_summaries(limit, offset).await?;
    let total = buildings.count().await?;

    debug!(limit, offset, returned = items.len(), total, "Listed buildings");

    Ok(Json(BuildingPage {
        items,
        total,
        limit,
        offset,
    }))
}

/// Gets one building and its units, cheapest first.
pub async fn get_building(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<BuildingDetail>, ApiError> {
    let building = state
        .db
        .buildings()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Building", &id))?;

    let units = state.db.units().list_by_building(&building.id).await?;

    Ok(Json(BuildingDetail { building, units }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_clamping() {
        let defaults = ListParams::default();
        assert_eq!(defaults.limit(), DEFAULT_LIST_LIMIT);
        assert_eq!(defaults.offset(), 0);

        let wild = ListParams {
            limit: Some(10_000),
            offset: Some(-3),
        };
        assert_eq!(wild.limit(), MAX_LIST_LIMIT);
        assert_eq!(wild.offset(), 0);

        let zero = ListParams {
            limit: Some(0),
            offset: Some(40),
        };
        assert_eq!(zero.limit(), 1);
        assert_eq!(zero.offset(), 40);
    }
}

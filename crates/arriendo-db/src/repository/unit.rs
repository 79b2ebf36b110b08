//! # Unit Repository
//!
//! Database operations for rentable units.
//!
//! A unit is the engine's main input: its `price`, `common_expenses`,
//! amenity flags and `disponible` become a `UnitPricingInput` at quote time.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use arriendo_core::validation::{validate_common_expenses, validate_floor_area, validate_unit_price};
use arriendo_core::{Money, Unit};

#[derive(Debug, sqlx::FromRow)]
struct UnitRow {
    id: String,
    building_id: String,
    tipologia: String,
    m2: f64,
    price: i64,
    common_expenses: i64,
    estacionamiento: bool,
    bodega: bool,
    disponible: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UnitRow> for Unit {
    fn from(row: UnitRow) -> Self {
        Unit {
            id: row.id,
            building_id: row.building_id,
            tipologia: row.tipologia,
            m2: row.m2,
            price: Money::from_pesos(row.price),
            common_expenses: Money::from_pesos(row.common_expenses),
            estacionamiento: row.estacionamiento,
            bodega: row.bodega,
            disponible: row.disponible,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for unit database operations.
#[derive(Debug, Clone)]
pub struct UnitRepository {
    pool: SqlitePool,
}

impl UnitRepository {
    /// Creates a new UnitRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UnitRepository { pool }
    }

    /// Lists all units of a building, available or not, cheapest first.
    pub async fn list_by_building(&self, building_id: &str) -> DbResult<Vec<Unit>> {
        let rows = sqlx::query_as::<_, UnitRow>(
            r#"
            SELECT
                id, building_id, tipologia, m2,
                price, common_expenses,
                estacionamiento, bodega, disponible,
                created_at, updated_at
            FROM units
            WHERE building_id = ?1
            ORDER BY price, id
            "#,
        )
        .bind(building_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(building_id = %building_id, count = rows.len(), "Listed units");
        Ok(rows.into_iter().map(Unit::from).collect())
    }

    /// Gets a unit by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Unit))` - Unit found
    /// * `Ok(None)` - Unit not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Unit>> {
        let row = sqlx::query_as::<_, UnitRow>(
            r#"
            SELECT
                id, building_id, tipologia, m2,
                price, common_expenses,
                estacionamiento, bodega, disponible,
                created_at, updated_at
            FROM units
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Unit::from))
    }

    /// Inserts a new unit.
    ///
    /// ## Returns
    /// * `Err(DbError::Invalid)` - Non-positive price or area, negative common expenses
    /// * `Err(DbError::ForeignKeyViolation)` - Building doesn't exist
    /// * `Err(DbError::UniqueViolation)` - ID already exists
    pub async fn insert(&self, unit: &Unit) -> DbResult<Unit> {
        debug!(id = %unit.id, building_id = %unit.building_id, "Inserting unit");

        validate_unit_price(unit.price)?;
        validate_floor_area(unit.m2)?;
        validate_common_expenses(unit.common_expenses)?;

        sqlx::query(
            r#"
            INSERT INTO units (
                id, building_id, tipologia, m2,
                price, common_expenses,
                estacionamiento, bodega, disponible,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&unit.id)
        .bind(&unit.building_id)
        .bind(&unit.tipologia)
        .bind(unit.m2)
        .bind(unit.price.pesos())
        .bind(unit.common_expenses.pesos())
        .bind(unit.estacionamiento)
        .bind(unit.bodega)
        .bind(unit.disponible)
        .bind(unit.created_at)
        .bind(unit.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(unit.clone())
    }

    /// Marks a unit as offered (or no longer offered) for rent.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Unit doesn't exist
    pub async fn set_availability(&self, id: &str, disponible: bool) -> DbResult<()> {
        debug!(id = %id, disponible = %disponible, "Updating unit availability");

        let result = sqlx::query(
            r#"
            UPDATE units
            SET disponible = ?2, updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(disponible)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Unit", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

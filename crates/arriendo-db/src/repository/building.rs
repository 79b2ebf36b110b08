//! # Building Repository
//!
//! Database operations for buildings and the listing grid.
//!
//! ## Listing Projection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  buildings b                      units u (disponible = 1)              │
//! │  ───────────                      ────────────────────────              │
//! │  b-1 Vista Parque  ◄──────────────  u-101 290.000                       │
//! │                    ◄──────────────  u-102 340.000                       │
//! │  b-2 Plaza Ñuñoa   (no available units)                                 │
//! │                                                                         │
//! │  ► { b-1, availableUnits: 2, fromPrice: 290.000 }                       │
//! │  ► { b-2, availableUnits: 0, fromPrice: null }                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use arriendo_core::{Building, BuildingSummary, Money, PromotionBadge};

// =============================================================================
// Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct BuildingRow {
    id: String,
    name: String,
    address: String,
    comuna: String,
    parking_price: Option<i64>,
    storage_price: Option<i64>,
    badges: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BuildingRow> for Building {
    type Error = DbError;

    fn try_from(row: BuildingRow) -> Result<Self, Self::Error> {
        let badges: Vec<PromotionBadge> = serde_json::from_str(&row.badges)
            .map_err(|e| DbError::corrupt("Building", &row.id, format!("badges: {}", e)))?;

        Ok(Building {
            id: row.id,
            name: row.name,
            address: row.address,
            comuna: row.comuna,
            parking_price: row.parking_price.map(Money::from_pesos),
            storage_price: row.storage_price.map(Money::from_pesos),
            badges,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BuildingSummaryRow {
    #[sqlx(flatten)]
    building: BuildingRow,
    available_units: i64,
    from_price: Option<i64>,
}

impl TryFrom<BuildingSummaryRow> for BuildingSummary {
    type Error = DbError;

    fn try_from(row: BuildingSummaryRow) -> Result<Self, Self::Error> {
        Ok(BuildingSummary {
            building: row.building.try_into()?,
            available_units: row.available_units,
            from_price: row.from_price.map(Money::from_pesos),
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for building database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = BuildingRepository::new(pool);
///
/// // First page of the listing
/// let page = repo.list_summaries(20, 0).await?;
///
/// // Detail
/// let building = repo.get_by_id("b-1").await?;
/// ```
#[derive(Debug, Clone)]
pub struct BuildingRepository {
    pool: SqlitePool,
}

impl BuildingRepository {
    /// Creates a new BuildingRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BuildingRepository { pool }
    }

    /// Lists buildings for the listing grid, ordered by name.
    ///
    /// ## Arguments
    /// * `limit` - Page size (the HTTP layer clamps it)
    /// * `offset` - Rows to skip
    pub async fn list_summaries(&self, limit: i64, offset: i64) -> DbResult<Vec<BuildingSummary>> {
        debug!(limit = %limit, offset = %offset, "Listing buildings");

        let rows = sqlx::query_as::<_, BuildingSummaryRow>(
            r#"
            SELECT
                b.id,
                b.name,
                b.address,
                b.comuna,
                b.parking_price,
                b.storage_price,
                b.badges,
                b.created_at,
                b.updated_at,
                COUNT(u.id) AS available_units,
                MIN(u.price) AS from_price
            FROM buildings b
            LEFT JOIN units u ON u.building_id = b.id AND u.disponible = 1
            GROUP BY b.id
            ORDER BY b.name, b.id
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Listing returned buildings");
        rows.into_iter().map(BuildingSummary::try_from).collect()
    }

    /// Gets a building by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Building))` - Building found
    /// * `Ok(None)` - Building not found
    /// * `Err(DbError::Corrupt)` - Stored badges are not valid JSON
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Building>> {
        let row = sqlx::query_as::<_, BuildingRow>(
            r#"
            SELECT
                id, name, address, comuna,
                parking_price, storage_price, badges,
                created_at, updated_at
            FROM buildings
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Building::try_from).transpose()
    }

    /// Inserts a new building.
    ///
    /// Badges are checked before insert, so a building whose discount badge
    /// can't be resolved never reaches the catalog.
    ///
    /// ## Returns
    /// * `Err(DbError::Invalid)` - A badge is malformed
    /// * `Err(DbError::UniqueViolation)` - ID already exists
    pub async fn insert(&self, building: &Building) -> DbResult<Building> {
        debug!(id = %building.id, name = %building.name, "Inserting building");

        building.promotions()?;
        let badges = serde_json::to_string(&building.badges)
            .map_err(|e| DbError::Driver(format!("badges: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO buildings (
                id, name, address, comuna,
                parking_price, storage_price, badges,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&building.id)
        .bind(&building.name)
        .bind(&building.address)
        .bind(&building.comuna)
        .bind(building.parking_price.map(|p| p.pesos()))
        .bind(building.storage_price.map(|p| p.pesos()))
        .bind(badges)
        .bind(building.created_at)
        .bind(building.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(building.clone())
    }

    /// Counts buildings (for pagination and the seed tool).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM buildings")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

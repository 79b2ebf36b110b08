//! # Catalog Connection
//!
//! Opens the SQLite catalog and hands out repositories.
//!
//! ## Access Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Who touches the catalog                           │
//! │                                                                         │
//! │  arriendo-api (long-running)          seed (one-shot)                   │
//! │  ───────────────────────────          ───────────────                   │
//! │  GET  /api/buildings    read          INSERT buildings                  │
//! │  GET  /api/buildings/x  read          INSERT units                      │
//! │  POST /api/quotations   read (2 rows)                                   │
//! │       │                                      │                          │
//! │       └──────────────┬───────────────────────┘                          │
//! │                      ▼                                                  │
//! │              arriendo.db  (WAL journal)                                 │
//! │                                                                         │
//! │  Readers never wait for the seed tool; a write that finds the file      │
//! │  locked retries for `busy_timeout` before failing.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! In-memory catalogs (tests) live on a single connection: a second
//! connection would open a second, empty database.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::building::BuildingRepository;
use crate::repository::unit::UnitRepository;

/// How long a handler waits for a free connection before `DbError::Busy`.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

// =============================================================================
// Configuration
// =============================================================================

/// Where the catalog lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogLocation {
    /// A database file, created on first open.
    File(PathBuf),
    /// A private in-memory catalog, gone when the pool closes.
    Memory,
}

/// Catalog connection settings.
///
/// ```rust,ignore
/// let config = DbConfig::new("./arriendo.db").max_connections(8);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub location: CatalogLocation,

    /// Upper bound on concurrent handler connections. Default: 5.
    pub max_connections: u32,

    /// How long a write waits on a locked file. Default: 5 seconds.
    pub busy_timeout: Duration,

    /// Apply pending migrations when opening. Default: true.
    pub run_migrations: bool,
}

impl DbConfig {
    /// Catalog stored in the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            location: CatalogLocation::File(path.into()),
            max_connections: 5,
            busy_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    /// Fresh, empty catalog in memory. Each call is isolated from the others.
    pub fn in_memory() -> Self {
        DbConfig {
            location: CatalogLocation::Memory,
            max_connections: 1,
            busy_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    /// Sets the connection limit. Ignored for in-memory catalogs.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Connections the pool will actually open.
    fn pool_size(&self) -> u32 {
        match self.location {
            CatalogLocation::Memory => 1,
            CatalogLocation::File(_) => self.max_connections.max(1),
        }
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = match &self.location {
            CatalogLocation::Memory => SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::Unavailable(e.to_string()))?,
            CatalogLocation::File(path) => SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal),
        };

        // Off by default in SQLite; units.building_id depends on it
        Ok(options
            .foreign_keys(true)
            .busy_timeout(self.busy_timeout))
    }

    fn describe(&self) -> String {
        match &self.location {
            CatalogLocation::File(path) => path.display().to_string(),
            CatalogLocation::Memory => ":memory:".to_string(),
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Open catalog. Clones share one pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the catalog and, unless disabled, brings its schema up to date.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        let location = config.describe();
        let pool_size = config.pool_size();
        info!(location = %location, pool_size, "Opening catalog");

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(config.connect_options()?)
            .await
            .map_err(|e| DbError::Unavailable(format!("{}: {}", location, e)))?;

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        } else {
            debug!("Skipping migrations");
        }

        Ok(db)
    }

    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await?;
        info!("Catalog schema up to date");
        Ok(())
    }

    /// Raw pool, for ad-hoc queries in tests and tools.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn buildings(&self) -> BuildingRepository {
        BuildingRepository::new(self.pool.clone())
    }

    pub fn units(&self) -> UnitRepository {
        UnitRepository::new(self.pool.clone())
    }

    /// Closes every connection. Later queries fail.
    pub async fn close(&self) {
        info!("Closing catalog");
        self.pool.close().await;
    }

    /// `true` while the catalog answers a trivial query.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

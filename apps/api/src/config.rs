//! # Server Configuration
//!
//! Configuration management for the API server.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ARRIENDO_PORT=9000                                                 │
//! │     ARRIENDO_GUARANTEE_BPS=3300                                        │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/arriendo/arriendo.toml (Linux)                           │
//! │     ~/Library/Application Support/cl.arriendo.arriendo/arriendo.toml   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     0.0.0.0:8080, ./arriendo.db, one-month guarantee                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [server]
//! bind_addr = "0.0.0.0"
//! port = 8080
//!
//! [database]
//! path = "/var/lib/arriendo/arriendo.db"
//! max_connections = 5
//!
//! [pricing]
//! guarantee_bps = 10000   # one month of rent
//! commission_bps = 5000   # half a month of rent
//!
//! [logging]
//! filter = "arriendo_api=info,arriendo_db=info,tower_http=warn,sqlx=warn"
//! ```

use arriendo_core::validation::validate_rate_bps;
use arriendo_core::PricingPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

// =============================================================================
// Errors
// =============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML or has wrong types.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is outside its allowed range.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// =============================================================================
// Sections
// =============================================================================

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            bind_addr: default_bind_addr(),
            port: default_port(),
        }
    }
}

/// Catalog database settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./arriendo.db")
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Rates applied to every quotation, in basis points of the monthly rent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSettings {
    #[serde(default = "default_guarantee_bps")]
    pub guarantee_bps: u32,

    #[serde(default = "default_commission_bps")]
    pub commission_bps: u32,
}

fn default_guarantee_bps() -> u32 {
    PricingPolicy::DEFAULT_GUARANTEE_BPS
}

fn default_commission_bps() -> u32 {
    PricingPolicy::DEFAULT_COMMISSION_BPS
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            guarantee_bps: default_guarantee_bps(),
            commission_bps: default_commission_bps(),
        }
    }
}

/// Log filter, in `tracing_subscriber::EnvFilter` syntax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "arriendo_api=info,arriendo_db=info,tower_http=warn,sqlx=warn".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete server configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub pricing: PricingSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl ApiConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else the platform config dir)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` that doesn't exist is an error; a missing
    /// default file is not.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Reads and parses a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parses TOML. Missing sections and keys take their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be greater than 0".into()));
        }

        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("database.path must not be empty".into()));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be greater than 0".into(),
            ));
        }

        validate_rate_bps("pricing.guarantee_bps", self.pricing.guarantee_bps)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        validate_rate_bps("pricing.commission_bps", self.pricing.commission_bps)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        Ok(())
    }

    /// Applies `ARRIENDO_*` environment variable overrides.
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from any key lookup.
    ///
    /// A numeric key that doesn't parse fails the whole load.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("ARRIENDO_BIND_ADDR") {
            debug!(bind_addr = %addr, "Overriding bind address from environment");
            self.server.bind_addr = addr;
        }

        if let Some(port) = lookup("ARRIENDO_PORT") {
            self.server.port = parse_override("ARRIENDO_PORT", &port)?;
        }

        if let Some(path) = lookup("ARRIENDO_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = PathBuf::from(path);
        }

        if let Some(max) = lookup("ARRIENDO_DB_MAX_CONNECTIONS") {
            self.database.max_connections = parse_override("ARRIENDO_DB_MAX_CONNECTIONS", &max)?;
        }

        if let Some(bps) = lookup("ARRIENDO_GUARANTEE_BPS") {
            self.pricing.guarantee_bps = parse_override("ARRIENDO_GUARANTEE_BPS", &bps)?;
        }

        if let Some(bps) = lookup("ARRIENDO_COMMISSION_BPS") {
            self.pricing.commission_bps = parse_override("ARRIENDO_COMMISSION_BPS", &bps)?;
        }

        if let Some(filter) = lookup("ARRIENDO_LOG") {
            self.logging.filter = filter;
        }

        Ok(())
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("cl", "arriendo", "arriendo")
            .map(|dirs| dirs.config_dir().join("arriendo.toml"))
    }

    /// Returns `bind_addr:port`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.bind_addr, self.server.port)
    }

    /// Builds the engine policy from the `[pricing]` section.
    pub fn pricing_policy(&self) -> Result<PricingPolicy, ConfigError> {
        PricingPolicy::new(self.pricing.guarantee_bps, self.pricing.commission_bps)
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

fn parse_override<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("{} is not a valid number: '{}'", key, value)))
}

// =============================================================================
// Unit Tests
// =============================================================================

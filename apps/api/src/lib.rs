//! # arriendo-api: HTTP Surface for Arriendo
//!
//! JSON endpoints for the web UI: the quotation calculator and the
//! read-only building catalog.
//!
//! ## Request Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        arriendo-api                                     │
//! │                                                                         │
//! │  axum Router (routes/)                                                  │
//! │       │                                                                 │
//! │       ├──► AppState.db      (arriendo-db: buildings, units)            │
//! │       ├──► AppState.engine  (arriendo-core: PricingEngine)             │
//! │       └──► AppState.clock   (today's date)                             │
//! │                                                                         │
//! │  Errors of every layer collapse into ApiError → { code, reason, ... }  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Layered server configuration (defaults, TOML, env)
//! - [`error`] - HTTP error type and status mapping
//! - [`routes`] - Handlers and the router
//! - [`state`] - Shared handler state

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ErrorCode};
pub use routes::router;
pub use state::{AppState, Clock};

//! # Arriendo API Server
//!
//! ## Usage
//! ```bash
//! # Config from the platform config dir (or built-in defaults)
//! cargo run -p arriendo-api
//!
//! # Explicit config file
//! cargo run -p arriendo-api -- --config ./arriendo.toml
//! ```
//!
//! `RUST_LOG` overrides the configured log filter.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use arriendo_api::{router, ApiConfig, AppState, Clock};
use arriendo_core::PricingEngine;
use arriendo_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = parse_args();
    let config = ApiConfig::load(config_path).context("Failed to load configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .context("Invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!("Starting Arriendo API server...");
    info!(
        bind = %config.bind_address(),
        db = %config.database.path.display(),
        guarantee_bps = config.pricing.guarantee_bps,
        commission_bps = config.pricing.commission_bps,
        "Configuration loaded"
    );

    let db = Database::new(
        DbConfig::new(&config.database.path).max_connections(config.database.max_connections),
    )
    .await
    .context("Failed to open catalog database")?;

    let engine = PricingEngine::new(config.pricing_policy()?);
    let state = Arc::new(AppState::new(db.clone(), engine, Clock::System));
    let app = router(state);

    let bind_addr = config.bind_address();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;

    info!(addr = %bind_addr, "HTTP server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Reads `--config <PATH>` from the command line.
fn parse_args() -> Option<PathBuf> {
    let args: Vec<String> = env::args().collect();
    let mut config_path = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Arriendo API Server");
                println!();
                println!("Usage: arriendo-api [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>  Configuration file (TOML)");
                println!("  -h, --help           Show this help message");
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    config_path
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}

//! Admin HTTP API for QuickBite promo alerting.
//!
//! Exposes the alert scan trigger, the alert log, and a health check,
//! plus an optional background checker that runs the scan periodically.

mod config;
mod error;
mod routes;
mod scheduler;
mod state;

use std::sync::Arc;

use alert_engine::AlertScanner;
use database::Database;
use mail_relay::{RelayClient, RelayConfig};
use notifier::EmailNotifier;
use tracing::info;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting admin API server");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    // Wire the scanner to the mail relay
    let relay = RelayClient::new(RelayConfig::from_env()?)?;
    let sink = Arc::new(EmailNotifier::new(relay));
    let scanner = AlertScanner::new(db.clone(), sink);

    // Optional background checker
    if let Some(period) = config.check_interval {
        scheduler::spawn_checker(scanner.clone(), period);
    }

    // Build application state
    let state = AppState::new(db, scanner);

    // Build router
    let app = routes::router().with_state(state);

    // Start server
    info!(addr = %config.addr, "Admin API listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

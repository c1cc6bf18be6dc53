//! Route handlers for the admin API.

pub mod alerts;
pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health))
        // API endpoints
        .route("/api/alerts/check", post(alerts::check_api))
        .route("/api/alerts/log", get(alerts::log_api))
}

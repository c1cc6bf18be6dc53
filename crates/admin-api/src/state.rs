//! Application state shared across handlers.

use alert_engine::AlertScanner;
use database::Database;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection.
    pub db: Database,
    /// Alert scanner triggered by the check endpoint.
    pub scanner: AlertScanner,
}

impl AppState {
    /// Create new application state.
    pub fn new(db: Database, scanner: AlertScanner) -> Self {
        Self { db, scanner }
    }
}

//! Alert scan trigger and alert log endpoints.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use alert_engine::ScanOutcome;
use database::alert_log;
use database::models::AlertLogEntry;

use crate::error::Result;
use crate::state::AppState;

/// Summary of a completed scan.
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub success: bool,
    pub triggered: Vec<String>,
    pub count: usize,
}

/// Returned when thresholds exist but list no recipients.
#[derive(Debug, Serialize)]
pub struct NoRecipientsResponse {
    pub message: String,
    pub triggered: Vec<String>,
}

/// Trigger one alert scan.
pub async fn check_api(State(state): State<AppState>) -> Result<Response> {
    match state.scanner.run().await? {
        ScanOutcome::Completed { triggered } => {
            let count = triggered.len();
            Ok(Json(CheckResponse {
                success: true,
                triggered,
                count,
            })
            .into_response())
        }
        ScanOutcome::NoRecipients => Ok(Json(NoRecipientsResponse {
            message: "No alert recipients configured".to_string(),
            triggered: Vec::new(),
        })
        .into_response()),
    }
}

/// Query parameters for the alert log.
#[derive(Debug, Deserialize)]
pub struct LogQuery {
    /// Maximum number of entries to return.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    50
}

/// List recent alert log entries, newest first.
pub async fn log_api(
    State(state): State<AppState>,
    Query(query): Query<LogQuery>,
) -> Result<Json<Vec<AlertLogEntry>>> {
    let entries = alert_log::list_recent(state.db.pool(), query.limit).await?;
    Ok(Json(entries))
}

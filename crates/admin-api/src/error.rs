//! Error types for the admin API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use alert_engine::EngineError;

/// Errors that can occur in the admin API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Alert scan failure, including a missing thresholds row.
    #[error("{0}")]
    Engine(#[from] EngineError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] database::DatabaseError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Engine(err) => {
                tracing::error!("Alert scan failed: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            ApiError::Database(err) => {
                tracing::error!("Database error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for admin API handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

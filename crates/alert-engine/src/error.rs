//! Alert engine error types.

use thiserror::Error;

/// Errors that abort an evaluation run.
///
/// Per-metric delivery and log failures are contained inside the scan
/// and never surface here; only the run inputs are load-bearing.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The alert thresholds row has never been configured.
    #[error("Alert thresholds not configured")]
    ThresholdsMissing,

    /// Database failure while loading the run inputs.
    #[error(transparent)]
    Database(#[from] database::DatabaseError),
}

//! The AlertSink trait definition.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use mail_relay::RelayError;

/// Metric snapshot attached to an alert, keyed by camelCase field names.
pub type Details = serde_json::Map<String, serde_json::Value>;

/// A decided alert, ready for delivery.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertNotice {
    /// Alert type tag, e.g. `redemption_cap`.
    pub alert_type: String,
    /// The promo code the alert concerns.
    pub promo_code: String,
    /// Snapshot of the metric values at decision time.
    pub details: Details,
}

impl AlertNotice {
    /// Create a notice for the given alert type and code.
    pub fn new(
        alert_type: impl Into<String>,
        promo_code: impl Into<String>,
        details: Details,
    ) -> Self {
        Self {
            alert_type: alert_type.into(),
            promo_code: promo_code.into(),
            details,
        }
    }
}

/// Errors that can occur while delivering an alert.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The mail relay refused or failed the send.
    #[error(transparent)]
    Relay(#[from] RelayError),

    /// The sink rejected the delivery.
    #[error("delivery rejected: {0}")]
    Rejected(String),
}

/// A destination that alert notices can be delivered to.
///
/// Implementations range from the production email notifier to in-memory
/// sinks used in tests. The trait is object-safe and is normally used as
/// `Arc<dyn AlertSink>`.
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Deliver a notice to the given recipients.
    ///
    /// Returns `Ok(())` only when the delivery was accepted by the
    /// underlying transport.
    async fn deliver(&self, notice: &AlertNotice, recipients: &[String]) -> Result<(), NotifyError>;

    /// Get a human-readable name for this sink.
    fn name(&self) -> &str;
}

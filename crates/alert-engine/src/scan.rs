//! The alert scan.
//!
//! One scan loads the threshold configuration and every promo code, runs
//! the metric checks per code, and for each fresh hit delivers a notice
//! and appends an alert log row. Codes are processed sequentially in
//! storage order; a hit already logged inside the dedup window is
//! skipped.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};

use database::models::{AlertType, PromoCode};
use database::{alert_log, alert_thresholds, promo_code, Database};
use notifier::{AlertNotice, AlertSink, Details};

use crate::error::EngineError;
use crate::metrics::evaluate;

/// Trailing window inside which a `(code, alert_type)` alert fires at
/// most once.
pub const DEDUP_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

/// Result of one scan invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Thresholds exist but list no recipients; nothing was evaluated.
    NoRecipients,
    /// The scan ran to completion. `triggered` holds one
    /// `"{code}:{alert_type}"` id per freshly dispatched alert, in
    /// evaluation order.
    Completed { triggered: Vec<String> },
}

/// Evaluates promo codes against thresholds and dispatches fresh alerts.
#[derive(Clone)]
pub struct AlertScanner {
    db: Database,
    sink: Arc<dyn AlertSink>,
    window: Duration,
}

impl AlertScanner {
    /// Create a scanner using the default 24-hour dedup window.
    pub fn new(db: Database, sink: Arc<dyn AlertSink>) -> Self {
        Self {
            db,
            sink,
            window: DEDUP_WINDOW,
        }
    }

    /// Override the dedup window.
    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Run one scan over all promo codes.
    ///
    /// Fails only when the thresholds row is missing or an input load
    /// fails; everything after that point is contained per metric. An
    /// alert counts as triggered only when its log row was freshly
    /// written, which requires the delivery to have been accepted first.
    pub async fn run(&self) -> Result<ScanOutcome, EngineError> {
        let thresholds = alert_thresholds::get_thresholds(self.db.pool())
            .await?
            .ok_or(EngineError::ThresholdsMissing)?;

        let recipients = thresholds.emails();
        if recipients.is_empty() {
            info!("No alert recipients configured, skipping scan");
            return Ok(ScanOutcome::NoRecipients);
        }

        let codes = promo_code::list_promo_codes(self.db.pool()).await?;
        let now = Utc::now();

        info!(codes = codes.len(), "Starting promo alert scan");

        let mut triggered = Vec::new();
        for promo in &codes {
            for (alert_type, details) in evaluate(promo, &thresholds, now) {
                match self
                    .process_metric(promo, alert_type, details, recipients)
                    .await
                {
                    Ok(true) => triggered.push(format!("{}:{}", promo.code, alert_type)),
                    Ok(false) => {}
                    Err(e) => {
                        warn!(
                            code = %promo.code,
                            alert_type = %alert_type,
                            error = %e,
                            "Alert processing failed"
                        );
                    }
                }
            }
        }

        info!(triggered = triggered.len(), "Promo alert scan complete");
        Ok(ScanOutcome::Completed { triggered })
    }

    /// Handle one metric hit: dedup check, delivery, log append.
    ///
    /// Returns `Ok(true)` only when this call wrote the log row. A
    /// delivery failure leaves no log row, so the alert stays eligible
    /// for the next scan.
    async fn process_metric(
        &self,
        promo: &PromoCode,
        alert_type: AlertType,
        details: Details,
        recipients: &[String],
    ) -> Result<bool, EngineError> {
        if alert_log::recent_alert_exists(self.db.pool(), &promo.code, alert_type, self.window)
            .await?
        {
            debug!(
                code = %promo.code,
                alert_type = %alert_type,
                "Alert suppressed by dedup window"
            );
            return Ok(false);
        }

        let notice = AlertNotice::new(alert_type.as_str(), &promo.code, details);

        if let Err(e) = self.sink.deliver(&notice, recipients).await {
            warn!(
                code = %promo.code,
                alert_type = %alert_type,
                error = %e,
                "Alert delivery failed, leaving it eligible for the next scan"
            );
            return Ok(false);
        }

        let inserted = alert_log::record_alert(
            self.db.pool(),
            &promo.code,
            alert_type,
            &notice.details,
            self.window,
        )
        .await?;

        if !inserted {
            debug!(
                code = %promo.code,
                alert_type = %alert_type,
                "Concurrent scan already logged this alert"
            );
        }

        Ok(inserted)
    }
}

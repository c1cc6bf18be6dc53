//! Periodic alert scan scheduling.

use std::time::Duration;

use tokio::time::interval;
use tracing::{error, info};

use alert_engine::{AlertScanner, ScanOutcome};

/// Spawn a background task running the alert scan at a fixed period.
///
/// The first scan runs immediately. The task never stops on its own;
/// per-tick failures are logged and the next tick proceeds as
/// scheduled.
pub fn spawn_checker(scanner: AlertScanner, period: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        info!(period = ?period, "Starting periodic alert checker");

        loop {
            ticker.tick().await;

            match scanner.run().await {
                Ok(ScanOutcome::Completed { triggered }) if !triggered.is_empty() => {
                    info!(triggered = ?triggered, "Scheduled scan dispatched alerts");
                }
                Ok(ScanOutcome::Completed { .. }) | Ok(ScanOutcome::NoRecipients) => {}
                Err(e) => {
                    error!("Scheduled scan failed: {}", e);
                    // Keep polling despite errors
                }
            }
        }
    })
}

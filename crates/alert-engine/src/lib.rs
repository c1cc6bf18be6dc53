//! Promo code alert engine for QuickBite.
//!
//! Scans every promo code against the configured alert thresholds and
//! dispatches email alerts for threshold crossings, deduplicated over a
//! rolling 24-hour window per `(code, alert type)` pair. The metric
//! checks live in [`metrics`]; [`AlertScanner`] ties them to the
//! database and a delivery sink.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use alert_engine::{AlertScanner, ScanOutcome};
//! use database::Database;
//! use notifier::MemorySink;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("sqlite:quickbite.db?mode=rwc").await?;
//! db.migrate().await?;
//!
//! let scanner = AlertScanner::new(db, Arc::new(MemorySink::new()));
//! match scanner.run().await? {
//!     ScanOutcome::Completed { triggered } => println!("Triggered: {:?}", triggered),
//!     ScanOutcome::NoRecipients => println!("No recipients configured"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod metrics;
pub mod scan;

pub use error::EngineError;
pub use metrics::{check_expiry, check_redemption, check_roi, evaluate, ExpiryHit, RedemptionHit, RoiHit};
pub use scan::{AlertScanner, ScanOutcome, DEDUP_WINDOW};

//! Alert delivery for QuickBite promo alerts.
//!
//! This crate defines the delivery seam between the alert engine and the
//! outside world:
//!
//! - [`AlertSink`] - the trait alert notices are delivered through
//! - [`EmailNotifier`] - production sink that emails via the mail relay
//! - [`MemorySink`] - in-memory sink for tests
//! - [`render_alert`] - pure rendering of a notice into subject/HTML/text
//!
//! # Example
//!
//! ```no_run
//! use notifier::{AlertNotice, AlertSink, Details, EmailNotifier};
//! use mail_relay::{RelayClient, RelayConfig};
//!
//! # async fn example() -> Result<(), notifier::NotifyError> {
//! let relay = RelayClient::new(RelayConfig::default())?;
//! let sink = EmailNotifier::new(relay);
//!
//! let mut details = Details::new();
//! details.insert("daysLeft".to_string(), serde_json::json!(3));
//! let notice = AlertNotice::new("expiring_soon", "SPRING10", details);
//!
//! sink.deliver(&notice, &["ops@quickbite.dev".to_string()]).await?;
//! # Ok(())
//! # }
//! ```

mod email;
mod memory;
pub mod render;
mod sink;

pub use email::EmailNotifier;
pub use memory::{MemorySink, RecordedAlert};
pub use render::{render_alert, style_for, AlertStyle, RenderedAlert};
pub use sink::{AlertNotice, AlertSink, Details, NotifyError};

// Re-export async_trait for implementors
pub use async_trait::async_trait;

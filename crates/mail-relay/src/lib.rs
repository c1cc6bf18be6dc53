//! HTTP client for the QuickBite mail relay service.
//!
//! The relay accepts fully rendered email over a small JSON API and takes
//! care of actual delivery. This crate provides the client half:
//!
//! - Submitting messages for delivery
//! - Health checking the relay
//! - Configuration from the environment
//!
//! # Example
//!
//! ```no_run
//! use mail_relay::{EmailMessage, RelayClient, RelayConfig};
//!
//! # async fn example() -> Result<(), mail_relay::RelayError> {
//! let config = RelayConfig::from_env()?;
//! let client = RelayClient::new(config)?;
//!
//! let message = EmailMessage::new(
//!     ["ops@quickbite.dev"],
//!     "Weekly digest",
//!     "<h1>Hello</h1>",
//! );
//! let receipt = client.send(message).await?;
//! println!("Accepted: {:?}", receipt.message_id);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::RelayClient;
pub use config::{RelayConfig, DEFAULT_FROM};
pub use error::RelayError;
pub use types::{EmailMessage, SendReceipt};

//! Mail relay connection configuration.

use std::env;
use std::time::Duration;

use crate::RelayError;

/// Default sender address when `MAIL_FROM` is not set.
pub const DEFAULT_FROM: &str = "alerts@quickbite.dev";

/// Configuration for the mail relay client.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Base URL of the relay service.
    pub base_url: String,
    /// Sender address stamped onto outgoing mail.
    pub from: String,
    /// Optional bearer token for the relay.
    pub token: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self::new("http://127.0.0.1:8090")
    }
}

impl RelayConfig {
    /// Create a configuration for the given relay base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            from: DEFAULT_FROM.to_string(),
            token: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `MAIL_RELAY_URL` | Relay base URL | `http://127.0.0.1:8090` |
    /// | `MAIL_FROM` | Sender address | `alerts@quickbite.dev` |
    /// | `MAIL_RELAY_TOKEN` | Bearer token | (none) |
    /// | `MAIL_RELAY_TIMEOUT_SECS` | Request timeout | `30` |
    pub fn from_env() -> Result<Self, RelayError> {
        let base_url =
            env::var("MAIL_RELAY_URL").unwrap_or_else(|_| "http://127.0.0.1:8090".to_string());

        let from = env::var("MAIL_FROM").unwrap_or_else(|_| DEFAULT_FROM.to_string());

        let token = env::var("MAIL_RELAY_TOKEN").ok();

        let timeout_secs = env::var("MAIL_RELAY_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .map_err(|e| RelayError::Config(format!("Invalid MAIL_RELAY_TIMEOUT_SECS: {}", e)))?;

        Ok(Self {
            base_url,
            from,
            token,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Builder method to set the sender address.
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = from.into();
        self
    }

    /// Builder method to set the bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Builder method to set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// URL of the send endpoint.
    pub fn send_url(&self) -> String {
        format!("{}/api/v1/send", self.base_url.trim_end_matches('/'))
    }

    /// URL of the health endpoint.
    pub fn health_url(&self) -> String {
        format!("{}/api/v1/health", self.base_url.trim_end_matches('/'))
    }
}

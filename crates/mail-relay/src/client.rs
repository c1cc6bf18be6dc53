//! Mail relay HTTP client.

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::types::{EmailMessage, SendReceipt};

/// Client for submitting email to the mail relay service.
#[derive(Debug, Clone)]
pub struct RelayClient {
    http: Client,
    config: RelayConfig,
}

impl RelayClient {
    /// Create a new client with the given configuration.
    pub fn new(config: RelayConfig) -> Result<Self, RelayError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(RelayError::Http)?;

        info!(base_url = %config.base_url, from = %config.from, "Created mail relay client");

        Ok(Self { http, config })
    }

    /// Get the configuration this client was built with.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Perform a health check against the relay.
    pub async fn health_check(&self) -> Result<bool, RelayError> {
        let url = self.config.health_url();
        debug!("Health check: {}", url);

        let resp = self.http.get(&url).send().await?;
        Ok(resp.status().is_success())
    }

    /// Submit an email for delivery.
    ///
    /// A non-success status from the relay becomes [`RelayError::Status`];
    /// the response body is captured for diagnostics.
    pub async fn send(&self, mut message: EmailMessage) -> Result<SendReceipt, RelayError> {
        if message.from.is_none() {
            message.from = Some(self.config.from.clone());
        }

        let mut request = self.http.post(self.config.send_url()).json(&message);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let resp = request.send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %body, "Mail relay rejected send");
            return Err(RelayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        // A 2xx means the relay accepted the message; the receipt body
        // is best-effort and may be empty.
        let receipt: SendReceipt = resp.json().await.unwrap_or_default();
        info!(
            recipients = message.to.len(),
            subject = %message.subject,
            message_id = ?receipt.message_id,
            "Email accepted by relay"
        );

        Ok(receipt)
    }
}

//! Email delivery of alert notices via the mail relay.

use async_trait::async_trait;
use tracing::info;

use mail_relay::{EmailMessage, RelayClient};

use crate::render::render_alert;
use crate::sink::{AlertNotice, AlertSink, NotifyError};

/// Delivers alert notices as email through the mail relay.
#[derive(Clone)]
pub struct EmailNotifier {
    relay: RelayClient,
}

impl EmailNotifier {
    /// Create a notifier on top of an existing relay client.
    pub fn new(relay: RelayClient) -> Self {
        Self { relay }
    }

    /// Get the underlying relay client.
    pub fn relay(&self) -> &RelayClient {
        &self.relay
    }
}

#[async_trait]
impl AlertSink for EmailNotifier {
    async fn deliver(&self, notice: &AlertNotice, recipients: &[String]) -> Result<(), NotifyError> {
        let rendered = render_alert(notice);

        info!(
            alert_type = %notice.alert_type,
            promo_code = %notice.promo_code,
            recipients = recipients.len(),
            "Sending alert email"
        );

        let message = EmailMessage::new(recipients.iter().cloned(), rendered.subject, rendered.html)
            .with_text(rendered.text);

        self.relay.send(message).await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "EmailNotifier"
    }
}

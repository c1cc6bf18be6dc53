//! Wire types for the mail relay.

use serde::{Deserialize, Serialize};

/// An email handed to the relay for delivery.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailMessage {
    /// Recipient addresses.
    pub to: Vec<String>,

    /// Sender address; the client fills this from its configuration
    /// when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    /// Subject line.
    pub subject: String,

    /// HTML body.
    pub html: String,

    /// Optional plain-text alternative.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl EmailMessage {
    /// Create a new message for the given recipients.
    pub fn new(
        to: impl IntoIterator<Item = impl Into<String>>,
        subject: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into_iter().map(Into::into).collect(),
            from: None,
            subject: subject.into(),
            html: html.into(),
            text: None,
        }
    }

    /// Set the plain-text alternative body.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set an explicit sender address.
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }
}

/// Acknowledgement returned by the relay on success.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendReceipt {
    /// Provider message ID, when the relay reports one.
    #[serde(default)]
    pub message_id: Option<String>,
}

//! Notification collaborator: best-effort delivery to registrants.
//!
//! The lifecycle controller tolerates total unavailability of this
//! channel; a delivery failure is downgraded to a warning on an
//! otherwise-successful verification. The shipped implementation hands
//! the message to an HTTP relay; the actual transport (SMTP or
//! otherwise) is a deployment concern behind that endpoint.

use serde_json::json;

use crate::error::RegistryError;

/// Best-effort outbound notification channel.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Requests delivery of a plain-text message to `to`.
    ///
    /// # Errors
    ///
    /// Returns any delivery failure; callers downgrade it to a warning.
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()>;
}

/// Posts messages as JSON to a configured webhook URL.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    /// Creates a notifier targeting the given webhook URL.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Internal`] when the HTTP client cannot
    /// be constructed.
    pub fn new(url: impl Into<String>) -> Result<Self, RegistryError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| RegistryError::Internal(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait::async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        let payload = json!({
            "to": to,
            "subject": subject,
            "body": body,
        });
        self.client
            .post(&self.url)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

//! Password reset notification delivery

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

/// Delivers password reset messages to users
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send a password reset message to `email`
    async fn send_password_reset(&self, email: &str) -> Result<()>;
}

/// Notifier that only records the request in the service log
///
/// Used when no delivery endpoint is configured.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_password_reset(&self, email: &str) -> Result<()> {
        debug!(%email, "password reset requested; no delivery endpoint configured");
        Ok(())
    }
}

/// Notifier that posts reset requests to an external mail webhook
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send_password_reset(&self, email: &str) -> Result<()> {
        self.client
            .post(&self.url)
            .json(&json!({
                "type": "password_reset",
                "email": email,
            }))
            .send()
            .await
            .context("password reset webhook unreachable")?
            .error_for_status()
            .context("password reset webhook rejected the request")?;

        debug!(%email, "password reset dispatched");
        Ok(())
    }
}

//! Slack incoming-webhook delivery.
//!
//! Delivery is a thin pipe: post the payload, interpret the status
//! code. Retry, backoff, and rate limiting belong to the caller's
//! infrastructure, not here.

use crate::payload::SlackMessage;

/// Errors that can occur during payload delivery.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("webhook returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Trait for outbound delivery channels.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one rendered payload through this channel.
    async fn send(&self, payload: &SlackMessage) -> Result<(), DeliveryError>;

    /// Human-readable name for this channel.
    fn channel_name(&self) -> &str;
}

/// Posts payloads as JSON to a Slack incoming-webhook URL.
#[derive(Debug, Clone)]
pub struct SlackWebhook {
    url: String,
    /// Shared client (connection pooling).
    client: reqwest::Client,
}

impl SlackWebhook {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl Notifier for SlackWebhook {
    async fn send(&self, payload: &SlackMessage) -> Result<(), DeliveryError> {
        let response = self.client.post(&self.url).json(payload).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(%status, body = %body, "webhook returned non-2xx status");
            return Err(DeliveryError::Status { status, body });
        }

        tracing::debug!(
            channel = %payload.channel,
            username = %payload.username,
            %status,
            "notification delivered"
        );
        Ok(())
    }

    fn channel_name(&self) -> &str {
        "slack"
    }
}

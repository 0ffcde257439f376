use async_trait::async_trait;
use reqwest::Url;
use tracing::info;

use crate::error::{NotifyError, Result};
use crate::payload::NotificationPayload;

/// Destination for a composed notification.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send(&self, payload: &NotificationPayload) -> Result<()>;
}

/// Slack incoming webhook. The URL is a secret and is never logged.
pub struct SlackWebhook {
    client: reqwest::Client,
    url: Url,
}

impl SlackWebhook {
    pub fn new(url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }
}

#[async_trait]
impl NotificationSink for SlackWebhook {
    async fn send(&self, payload: &NotificationPayload) -> Result<()> {
        let resp = self
            .client
            .post(self.url.clone())
            .json(payload)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            // the url may embed the webhook secret
            .map_err(|e| NotifyError::Delivery(e.without_url()))?;
        info!(status = %resp.status(), "notification delivered");
        Ok(())
    }
}

/// Prints the payload instead of sending it.
#[derive(Debug, Default)]
pub struct StdoutSink;

#[async_trait]
impl NotificationSink for StdoutSink {
    async fn send(&self, payload: &NotificationPayload) -> Result<()> {
        let json = serde_json::to_string_pretty(payload)?;
        println!("{json}");
        Ok(())
    }
}

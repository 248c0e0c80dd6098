//! Discord webhook wrapper — delivers notification messages.
//!
//! The payload carries message content plus optional per-message username
//! and avatar overrides; `None` fields are omitted from the JSON body so the
//! webhook's own defaults apply.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Avatar shown for "something good happened" notifications.
pub const POSITIVE_AVATAR: &str =
    "https://twemoji.maxcdn.com/v/latest/72x72/2705.png";
/// Avatar shown for "something bad happened" notifications.
pub const NEGATIVE_AVATAR: &str =
    "https://twemoji.maxcdn.com/v/latest/72x72/274c.png";
/// Avatar shown for neutral notifications.
pub const PASSIVE_AVATAR: &str =
    "https://twemoji.maxcdn.com/v/latest/72x72/2139.png";

/// One webhook message.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookMessage {
    /// Message content.
    pub content: String,
    /// Username override (webhook default when `None`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Avatar URL override (webhook default when `None`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl WebhookMessage {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            username: None,
            avatar_url: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_avatar(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }
}

/// Notification delivery, abstracted for testing.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &WebhookMessage) -> Result<()>;
}

/// Discord webhook client.
#[derive(Clone)]
pub struct DiscordWebhook {
    client: reqwest::Client,
    url: String,
}

impl DiscordWebhook {
    pub fn new(url: &str) -> Result<Self> {
        if url.is_empty() {
            bail!("webhook URL is empty");
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(crate::hypixel::DEFAULT_TIMEOUT_MS))
            .build()
            .context("building webhook HTTP client")?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl Notifier for DiscordWebhook {
    async fn send(&self, message: &WebhookMessage) -> Result<()> {
        let resp = self
            .client
            .post(&self.url)
            .json(message)
            .send()
            .await
            .context("posting to webhook")?;

        if !resp.status().is_success() {
            bail!(
                "webhook delivery failed: {} {}",
                resp.status(),
                resp.text().await.unwrap_or_default()
            );
        }

        Ok(())
    }
}

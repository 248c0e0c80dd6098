//! Hypixel API wrapper — key validation and player status lookups.
//!
//! Thin HTTP boundary: one pooled reqwest client, `API-Key` header, bounded
//! per-call timeout so one slow lookup cannot stall a whole poll cycle.
//! Non-success responses surface as [`ProviderError::Api`] carrying the
//! opaque error payload; the watcher decides what is fatal.

use crate::types::{Presence, Session, Snapshot};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.hypixel.net";

/// Default per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Errors surfaced by the status provider boundary.
#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The API answered 2xx but the body was not the expected shape.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Client misconfiguration caught before any request is made.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Remote status lookup, abstracted for testing.
#[async_trait]
pub trait StatusProvider: Send + Sync {
    /// Check that the configured API key is usable.
    ///
    /// Returns the response status code on success.
    async fn validate_key(&self) -> Result<u16, ProviderError>;

    /// Fetch the current presence snapshot for one player.
    async fn fetch_status(&self, uuid: &str) -> Result<Snapshot, ProviderError>;
}

/// Hypixel API client.
#[derive(Clone, Debug)]
pub struct HypixelClient {
    client: reqwest::Client,
    base_url: String,
}

/// `/status` response body.
#[derive(Deserialize)]
struct StatusResponse {
    session: SessionPayload,
}

#[derive(Deserialize)]
struct SessionPayload {
    #[serde(default)]
    online: bool,
    #[serde(flatten)]
    session: Session,
}

impl HypixelClient {
    /// Create a client against the production endpoint.
    pub fn new(api_key: &str) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS)
    }

    /// Create a client against an explicit endpoint (used by tests).
    pub fn with_base_url(
        api_key: &str,
        base_url: &str,
        timeout_ms: u64,
    ) -> Result<Self, ProviderError> {
        if api_key.is_empty() {
            return Err(ProviderError::Config("Hypixel API key is empty".to_string()));
        }

        let mut headers = reqwest::header::HeaderMap::new();
        let mut key_value = reqwest::header::HeaderValue::from_str(api_key)
            .map_err(|_| ProviderError::Config("API key is not a valid header value".to_string()))?;
        key_value.set_sensitive(true);
        headers.insert("API-Key", key_value);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl StatusProvider for HypixelClient {
    async fn validate_key(&self) -> Result<u16, ProviderError> {
        let url = format!("{}/key", self.base_url);
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();

        if !status.is_success() {
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }

        Ok(status.as_u16())
    }

    async fn fetch_status(&self, uuid: &str) -> Result<Snapshot, ProviderError> {
        let url = format!("{}/status", self.base_url);
        let resp = self.client.get(&url).query(&[("uuid", uuid)]).send().await?;
        let status = resp.status();

        if !status.is_success() {
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }

        let body: StatusResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        let presence = if body.session.online {
            Presence::Online(body.session.session)
        } else {
            Presence::Offline
        };

        Snapshot::new(uuid, presence)
            .ok_or_else(|| ProviderError::Malformed("empty player uuid".to_string()))
    }
}

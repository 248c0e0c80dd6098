//! Configuration loading and resolution.
//!
//! Config is a JSON file supplying the tracked players, the ordered rule
//! chain, both credentials, and the poll interval. The API key and webhook
//! URL can be overridden through the environment so secrets can stay out of
//! the file.

use crate::rules::Rule;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Env var naming a config file path.
pub const CONFIG_ENV: &str = "STATUSWATCH_CONFIG";
/// Env var overriding the API key from the file.
pub const API_KEY_ENV: &str = "HYPIXEL_API_KEY";
/// Env var overriding the webhook URL from the file.
pub const WEBHOOK_ENV: &str = "STATUSWATCH_WEBHOOK_URL";

fn default_interval_secs() -> u64 {
    60
}

/// Full daemon configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Hypixel API key (obtained in-game with `/api`).
    #[serde(default)]
    pub api_key: String,
    /// Discord webhook URL.
    #[serde(default)]
    pub webhook_url: String,
    /// Player UUIDs to track. Strictly ordered; polled in this order.
    pub uuids: Vec<String>,
    /// Notification rules. Strictly ordered; first match wins, so layer the
    /// most specific rules first.
    pub rules: Vec<Rule>,
    /// Seconds to sleep between poll cycles.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl Config {
    /// Load a config file and apply environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let mut config: Config = serde_json::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))?;

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            config.api_key = key;
        }
        if let Ok(url) = std::env::var(WEBHOOK_ENV) {
            config.webhook_url = url;
        }

        Ok(config)
    }

    /// Check the invariants the rest of the system assumes.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            bail!("Hypixel API key is empty (set api_key or {API_KEY_ENV})");
        }
        if self.webhook_url.is_empty() {
            bail!("webhook URL is empty (set webhook_url or {WEBHOOK_ENV})");
        }
        if self.uuids.is_empty() {
            bail!("no player UUIDs configured");
        }
        Ok(())
    }
}

/// Resolve the config file path.
///
/// Priority: explicit `--config` → `STATUSWATCH_CONFIG` env →
/// `./statuswatch.json` → `~/.statuswatch/config.json`.
pub fn resolve_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(path) = explicit {
        return PathBuf::from(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return PathBuf::from(env_path);
    }

    let cwd_config = PathBuf::from("statuswatch.json");
    if cwd_config.exists() {
        return cwd_config;
    }

    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".statuswatch")
        .join("config.json")
}

//! Relay configuration.
//!
//! An explicit struct passed into rendering and delivery. No ambient
//! globals: the environment is read once at startup, in the binary.

use std::collections::HashMap;
use std::env;

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::RelayError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Presentation defaults and routing for outbound Slack payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Username shown when a notification kind defines none.
    pub default_username: String,
    /// Channel used when a topic name has no mapping.
    pub default_channel: String,
    /// Icon used when the per-kind icon lookup misses.
    pub default_icon: String,
    /// Topic name to Slack channel. Keyed by bare topic name, so
    /// multiple regions sharing a topic name share a channel.
    pub channel_map: HashMap<String, String>,
    /// Incoming-webhook URL. Optional here; the worker requires it.
    pub webhook_url: Option<String>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            default_username: "AWS Lambda".to_string(),
            default_channel: "#webhook-tests".to_string(),
            default_icon: ":information_source:".to_string(),
            channel_map: HashMap::new(),
            webhook_url: None,
        }
    }
}

impl RelayConfig {
    /// Build config from environment variables (call `load_dotenv()` first).
    ///
    /// `CHANNEL_MAP` holds a base64-encoded JSON object mapping topic
    /// names to channels. `WEBHOOK_URL` may omit the scheme; `https://`
    /// is prepended when missing.
    pub fn from_env() -> Result<Self, RelayError> {
        let channel_map = match env_opt("CHANNEL_MAP") {
            Some(encoded) => decode_channel_map(&encoded)?,
            None => HashMap::new(),
        };

        Ok(Self {
            default_username: env_or("DEFAULT_USERNAME", "AWS Lambda"),
            default_channel: env_or("DEFAULT_CHANNEL", "#webhook-tests"),
            default_icon: env_or("DEFAULT_EMOJI", ":information_source:"),
            channel_map,
            webhook_url: env_opt("WEBHOOK_URL").map(|url| normalize_webhook_url(&url)),
        })
    }

    /// Resolve a topic name to its channel, falling back to the default.
    pub fn channel_for(&self, topic_name: &str) -> &str {
        self.channel_map
            .get(topic_name)
            .map(String::as_str)
            .unwrap_or(&self.default_channel)
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!(
            default_username = %self.default_username,
            default_channel = %self.default_channel,
            default_icon = %self.default_icon,
            mapped_topics = self.channel_map.len(),
            webhook_configured = self.webhook_url.is_some(),
            "config loaded"
        );
    }
}

fn normalize_webhook_url(url: &str) -> String {
    if url.starts_with("https://") || url.starts_with("http://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

fn decode_channel_map(encoded: &str) -> Result<HashMap<String, String>, RelayError> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| RelayError::Config(format!("CHANNEL_MAP is not valid base64: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| RelayError::Config(format!("CHANNEL_MAP is not a JSON object: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_for_mapped_topic() {
        let mut config = RelayConfig::default();
        config
            .channel_map
            .insert("production-notices".to_string(), "#events-prod".to_string());
        assert_eq!(config.channel_for("production-notices"), "#events-prod");
    }

    #[test]
    fn channel_for_unmapped_topic_uses_default() {
        let config = RelayConfig::default();
        assert_eq!(config.channel_for("unmapped"), "#webhook-tests");
    }

    #[test]
    fn decode_channel_map_roundtrip() {
        // base64 of {"production-notices":"#events"}
        let encoded = base64::engine::general_purpose::STANDARD
            .encode(r##"{"production-notices":"#events"}"##);
        let map = decode_channel_map(&encoded).unwrap();
        assert_eq!(map["production-notices"], "#events");
    }

    #[test]
    fn decode_channel_map_rejects_garbage() {
        let result = decode_channel_map("not base64!!!");
        match result {
            Err(RelayError::Config(msg)) => assert!(msg.contains("base64")),
            other => panic!("expected Config error, got: {other:?}"),
        }
    }

    #[test]
    fn webhook_url_scheme_prepended() {
        assert_eq!(
            normalize_webhook_url("hooks.slack.com/services/T/B/X"),
            "https://hooks.slack.com/services/T/B/X"
        );
        assert_eq!(
            normalize_webhook_url("https://hooks.slack.com/services/T/B/X"),
            "https://hooks.slack.com/services/T/B/X"
        );
    }
}

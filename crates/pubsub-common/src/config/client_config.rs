//! Client configuration
//!
//! Loads configuration from environment variables. Timer periods are not
//! configurable; they are protocol constants.

use pubsub_core::SubscriptionRequest;
use serde::Deserialize;
use std::env;

/// Default pub/sub endpoint
pub const DEFAULT_ENDPOINT: &str = "wss://pubsub-edge.twitch.tv";

/// Default capacity of the consumer event channel
pub const DEFAULT_EVENT_BUFFER: usize = 256;

/// Client configuration, read-only for the life of the client
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Bearer token sent with every PING and LISTEN (may be empty)
    #[serde(default)]
    pub credential: String,
    /// WebSocket URL to connect to
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Topics to LISTEN on after every successful open, in order
    #[serde(default)]
    pub subscriptions: Vec<SubscriptionRequest>,
    /// Capacity of the consumer event channel
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_event_buffer() -> usize {
    DEFAULT_EVENT_BUFFER
}

impl ClientConfig {
    /// Create a configuration with the default endpoint and event buffer
    pub fn new(credential: impl Into<String>, subscriptions: Vec<SubscriptionRequest>) -> Self {
        Self {
            credential: credential.into(),
            endpoint: default_endpoint(),
            subscriptions,
            event_buffer: default_event_buffer(),
        }
    }

    /// Load configuration from environment variables
    ///
    /// | variable | meaning |
    /// |---|---|
    /// | `PUBSUB_OAUTH` | credential, empty when unset |
    /// | `PUBSUB_ENDPOINT` | WebSocket URL |
    /// | `PUBSUB_SUBSCRIPTIONS` | comma-separated `alias:channel:user_id` |
    /// | `PUBSUB_EVENT_BUFFER` | consumer channel capacity |
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let subscriptions = match lookup("PUBSUB_SUBSCRIPTIONS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| {
                    s.parse::<SubscriptionRequest>().map_err(|e| {
                        ConfigError::InvalidValue("PUBSUB_SUBSCRIPTIONS", e.to_string())
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        let event_buffer = match lookup("PUBSUB_EVENT_BUFFER") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(0) => {
                    return Err(ConfigError::InvalidValue(
                        "PUBSUB_EVENT_BUFFER",
                        "must be greater than zero".to_string(),
                    ))
                }
                Ok(n) => n,
                Err(e) => return Err(ConfigError::InvalidValue("PUBSUB_EVENT_BUFFER", e.to_string())),
            },
            None => default_event_buffer(),
        };

        Ok(Self {
            credential: lookup("PUBSUB_OAUTH").unwrap_or_default(),
            endpoint: lookup("PUBSUB_ENDPOINT").unwrap_or_else(default_endpoint),
            subscriptions,
            event_buffer,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

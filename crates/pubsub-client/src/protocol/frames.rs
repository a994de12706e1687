//! Frame formats
//!
//! Outbound frames are built by the client; inbound frames are parsed
//! loosely so that new server fields never break decoding.

use super::FrameType;
use pubsub_core::{generate_nonce, SubscriptionRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `data` of a PING frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingData {
    pub auth_token: String,
}

/// `data` of a LISTEN frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListenData {
    pub topics: Vec<String>,
    pub auth_token: String,
}

/// Frames sent by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum OutboundFrame {
    /// `{"type":"PING","data":{"auth_token":…}}`
    Ping { data: PingData },
    /// `{"type":"LISTEN","nonce":…,"data":{"topics":[…],"auth_token":…}}`
    Listen { nonce: String, data: ListenData },
}

impl OutboundFrame {
    /// Create a PING frame
    #[must_use]
    pub fn ping(credential: &str) -> Self {
        Self::Ping {
            data: PingData {
                auth_token: credential.to_string(),
            },
        }
    }

    /// Create a LISTEN frame for a single subscription with a fresh nonce
    #[must_use]
    pub fn listen(subscription: &SubscriptionRequest, credential: &str) -> Self {
        Self::Listen {
            nonce: generate_nonce(),
            data: ListenData {
                topics: vec![subscription.wire_topic()],
                auth_token: credential.to_string(),
            },
        }
    }

    /// Frame type discriminator
    #[must_use]
    pub const fn frame_type(&self) -> FrameType {
        match self {
            Self::Ping { .. } => FrameType::Ping,
            Self::Listen { .. } => FrameType::Listen,
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Frames received from the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundFrame {
    /// Frame type
    #[serde(rename = "type")]
    pub frame_type: FrameType,

    /// Nonce echoed on RESPONSE frames
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,

    /// Error value on RESPONSE frames, empty on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,

    /// Payload of MESSAGE frames
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl InboundFrame {
    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The error carried by a RESPONSE, `None` when absent, null or empty
    #[must_use]
    pub fn error_value(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl std::fmt::Display for InboundFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.nonce {
            Some(nonce) => write!(f, "InboundFrame(type={}, nonce={nonce})", self.frame_type),
            None => write!(f, "InboundFrame(type={})", self.frame_type),
        }
    }
}

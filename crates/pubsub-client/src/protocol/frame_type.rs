//! Frame type discriminator

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Value of the `type` field of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameType {
    /// Keep-alive (client only)
    Ping,
    /// Keep-alive reply (server only)
    Pong,
    /// Subscribe to topics (client only)
    Listen,
    /// Result of a LISTEN (server only)
    Response,
    /// Server asks the client to reconnect (server only)
    Reconnect,
    /// Topic data (server only)
    Message,
    /// Any type this client does not know about
    Unknown,
}

impl FrameType {
    /// Parse a wire name, `None` for names this client does not know
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "PING" => Some(Self::Ping),
            "PONG" => Some(Self::Pong),
            "LISTEN" => Some(Self::Listen),
            "RESPONSE" => Some(Self::Response),
            "RECONNECT" => Some(Self::Reconnect),
            "MESSAGE" => Some(Self::Message),
            _ => None,
        }
    }

    /// Wire name of this frame type
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ping => "PING",
            Self::Pong => "PONG",
            Self::Listen => "LISTEN",
            Self::Response => "RESPONSE",
            Self::Reconnect => "RECONNECT",
            Self::Message => "MESSAGE",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl Serialize for FrameType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for FrameType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name).unwrap_or(Self::Unknown))
    }
}

impl std::fmt::Display for FrameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

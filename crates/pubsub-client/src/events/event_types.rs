//! Event type definitions

use crate::error::ClientError;
use serde_json::Value;

/// Events emitted by the client
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    /// Transport opened, PING and LISTENs sent
    Connected,
    /// Something went wrong; the client keeps running
    Error(ClientError),
    /// `data` of a MESSAGE frame, unexamined
    Message(Value),
    /// The current transport closed
    Disconnected,
}

impl ClientEvent {
    /// Event name as listeners know it
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Error(_) => "error",
            Self::Message(_) => "message",
            Self::Disconnected => "disconnect",
        }
    }
}

impl std::fmt::Display for ClientEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error(error) => write!(f, "error: {error}"),
            Self::Message(data) => write!(f, "message: {data}"),
            other => f.write_str(other.name()),
        }
    }
}

//! Client error types
//!
//! Nothing is ever returned to the caller as a failure of the running
//! client; every variant here travels as the payload of an `error` event.

use thiserror::Error;

/// Errors surfaced on the event stream
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Low-level socket failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered a LISTEN or PING with an error value
    #[error("{0}")]
    Rejected(String),

    /// The server asked the client to move to a new connection
    #[error("{advisory}", advisory = crate::protocol::RECONNECT_ADVISORY)]
    Reconnecting,

    /// An inbound frame could not be decoded
    #[error("Failed to decode frame: {0}")]
    Decode(String),
}

impl ClientError {
    /// Whether the client recovers from this on its own by reconnecting
    #[must_use]
    pub const fn is_recovered_by_reconnect(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Reconnecting)
    }
}

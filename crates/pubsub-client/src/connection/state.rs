//! Connection state

use std::fmt;

/// Lifecycle state of the current transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    /// A connect attempt is in flight
    Connecting,
    /// The transport is open; PINGs are flowing
    Open,
    /// The transport closed; a new attempt is scheduled
    Closed,
}

impl ConnectionState {
    /// Check if frames may be written
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Connecting => "CONNECTING",
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
        })
    }
}

//! Pub/sub wire protocol
//!
//! JSON text frames discriminated by a `type` field, plus the fixed timer
//! periods the protocol expects.

mod frame_type;
mod frames;

use std::time::Duration;

pub use frame_type::FrameType;
pub use frames::{InboundFrame, ListenData, OutboundFrame, PingData};

/// Period between PINGs while the connection is open
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(60);

/// Delay before a new connect attempt after a close or RECONNECT
pub const RECONNECT_DELAY: Duration = Duration::from_secs(3);

/// Advisory text emitted when the server requests a reconnect
pub const RECONNECT_ADVISORY: &str = "Reconnecting...";

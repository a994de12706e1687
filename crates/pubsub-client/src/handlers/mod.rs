//! Inbound frame handlers
//!
//! Classifies every text frame from the server into the single action the
//! connection manager has to take.

mod response;

pub use response::ResponseHandler;

use crate::protocol::{FrameType, InboundFrame};
use serde_json::Value;

/// What the connection manager should do with an inbound frame
#[derive(Debug, Clone, PartialEq)]
pub enum FrameAction {
    /// RESPONSE without an error
    Acknowledged,
    /// RESPONSE carrying the server's error value
    Rejected(String),
    /// Server-initiated migration
    Reconnect,
    /// MESSAGE payload to hand to the consumer
    Deliver(Value),
    /// Frame type with no client-side behavior
    Ignored(FrameType),
    /// Text that is not a frame
    Malformed(String),
}

/// Routes inbound frames to their handlers
pub struct FrameDispatcher;

impl FrameDispatcher {
    /// Decode and classify one text frame
    pub fn dispatch(text: &str) -> FrameAction {
        let frame = match InboundFrame::from_json(text) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::debug!(error = %e, "Failed to parse frame");
                return FrameAction::Malformed(e.to_string());
            }
        };

        tracing::trace!(frame = %frame, "Received frame");

        match frame.frame_type {
            FrameType::Response => ResponseHandler::handle(&frame),
            FrameType::Reconnect => FrameAction::Reconnect,
            FrameType::Message => FrameAction::Deliver(frame.data.unwrap_or(Value::Null)),
            other => FrameAction::Ignored(other),
        }
    }
}

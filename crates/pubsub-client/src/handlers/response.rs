//! RESPONSE handler

use super::FrameAction;
use crate::protocol::InboundFrame;

/// Handles LISTEN acknowledgements
pub struct ResponseHandler;

impl ResponseHandler {
    /// An empty or missing error is a successful acknowledgement
    pub fn handle(frame: &InboundFrame) -> FrameAction {
        match frame.error_value() {
            Some(error) => {
                tracing::warn!(nonce = ?frame.nonce, error = %error, "Server rejected request");
                FrameAction::Rejected(error)
            }
            None => {
                tracing::debug!(nonce = ?frame.nonce, "Subscription acknowledged");
                FrameAction::Acknowledged
            }
        }
    }
}

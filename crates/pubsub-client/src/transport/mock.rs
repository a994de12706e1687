//! In-memory connector for driving the connection manager in tests

use super::{Connector, TransportEvents, TransportHandle};
use crate::protocol::OutboundFrame;
use tokio::sync::mpsc;

/// Records every connect attempt instead of opening a socket
pub(crate) struct MockConnector {
    attempts: mpsc::UnboundedSender<MockTransport>,
}

/// Server side of one recorded attempt
pub(crate) struct MockTransport {
    pub url: String,
    pub events: TransportEvents,
    pub outbound: mpsc::UnboundedReceiver<String>,
}

impl MockConnector {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<MockTransport>) {
        let (attempts, rx) = mpsc::unbounded_channel();
        (Self { attempts }, rx)
    }
}

impl Connector for MockConnector {
    fn connect(&self, url: &str, events: TransportEvents) -> TransportHandle {
        let (tx, outbound) = mpsc::unbounded_channel();
        let _ = self.attempts.send(MockTransport {
            url: url.to_string(),
            events,
            outbound,
        });
        TransportHandle::new(tx)
    }
}

impl MockTransport {
    /// Next frame already written by the client, if any
    pub fn try_frame(&mut self) -> Option<OutboundFrame> {
        let text = self.outbound.try_recv().ok()?;
        Some(OutboundFrame::from_json(&text).expect("client wrote an invalid frame"))
    }

    /// Wait for the next frame; `None` once the client closed the transport
    pub async fn recv_frame(&mut self) -> Option<OutboundFrame> {
        let text = self.outbound.recv().await?;
        Some(OutboundFrame::from_json(&text).expect("client wrote an invalid frame"))
    }

    /// Drain everything written so far
    pub fn drain_frames(&mut self) -> Vec<OutboundFrame> {
        std::iter::from_fn(|| self.try_frame()).collect()
    }
}

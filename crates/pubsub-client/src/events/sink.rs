//! Event sink
//!
//! Fans client events out to every subscribed receiver.

use super::ClientEvent;
use tokio::sync::broadcast;

/// Receiving half handed to consumers
pub type EventReceiver = broadcast::Receiver<ClientEvent>;

/// Broadcast sender for client events
#[derive(Debug, Clone)]
pub struct EventSink {
    sender: broadcast::Sender<ClientEvent>,
}

impl EventSink {
    /// Create a sink buffering up to `capacity` events per slow receiver
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Register a new receiver; it sees events emitted from now on
    #[must_use]
    pub fn subscribe(&self) -> EventReceiver {
        self.sender.subscribe()
    }

    /// Emit an event to all receivers
    pub fn emit(&self, event: ClientEvent) {
        tracing::debug!(event = event.name(), "Emitting event");

        // No receivers is not an error
        let _ = self.sender.send(event);
    }
}

//! Transport seam
//!
//! A transport is one duplex text channel to the server. A [`Connector`]
//! starts an attempt and reports its lifecycle through [`TransportEvents`];
//! the connection manager writes through the returned [`TransportHandle`].

#[cfg(test)]
pub(crate) mod mock;
mod websocket;

pub use websocket::{init_crypto, WsConnector};

use thiserror::Error;
use tokio::sync::mpsc;

/// Lifecycle and data events of one transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The socket is open and writable
    Opened,
    /// A text frame arrived
    Message(String),
    /// A socket-level failure; a close may or may not follow
    Error(String),
    /// The socket is gone, whether it ever opened or not
    Closed,
}

/// A transport event tagged with the attempt it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedEvent {
    pub generation: u64,
    pub event: TransportEvent,
}

/// Emitter handed to a connector for one connect attempt
#[derive(Debug, Clone)]
pub struct TransportEvents {
    generation: u64,
    sender: mpsc::UnboundedSender<TaggedEvent>,
}

impl TransportEvents {
    pub(crate) fn new(generation: u64, sender: mpsc::UnboundedSender<TaggedEvent>) -> Self {
        Self { generation, sender }
    }

    /// Attempt number this emitter reports for
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Report an event; dropped silently once the manager is gone
    pub fn emit(&self, event: TransportEvent) {
        let _ = self.sender.send(TaggedEvent {
            generation: self.generation,
            event,
        });
    }

    pub fn opened(&self) {
        self.emit(TransportEvent::Opened);
    }

    pub fn message(&self, text: impl Into<String>) {
        self.emit(TransportEvent::Message(text.into()));
    }

    pub fn error(&self, error: impl Into<String>) {
        self.emit(TransportEvent::Error(error.into()));
    }

    pub fn closed(&self) {
        self.emit(TransportEvent::Closed);
    }
}

/// Transport write errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("Transport is closed")]
    Closed,
}

/// Owned write half of a transport
///
/// Dropping the handle (or calling [`TransportHandle::close`]) closes the
/// underlying socket.
#[derive(Debug)]
pub struct TransportHandle {
    outbound: mpsc::UnboundedSender<String>,
}

impl TransportHandle {
    /// Wrap the sender a transport driver reads outgoing frames from
    #[must_use]
    pub fn new(outbound: mpsc::UnboundedSender<String>) -> Self {
        Self { outbound }
    }

    /// Queue a text frame for sending
    pub fn send(&self, text: String) -> Result<(), TransportError> {
        self.outbound.send(text).map_err(|_| TransportError::Closed)
    }

    /// Close the transport
    pub fn close(self) {
        drop(self);
    }
}

/// Starts connect attempts
pub trait Connector: Send + Sync + 'static {
    /// Begin connecting to `url` without blocking
    ///
    /// The attempt must eventually report `Opened` or `Closed` on `events`
    /// (unless it hangs), and must close once the returned handle is dropped.
    fn connect(&self, url: &str, events: TransportEvents) -> TransportHandle;
}

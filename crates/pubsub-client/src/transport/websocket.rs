//! WebSocket transport
//!
//! One spawned driver task per connect attempt. The task owns the socket,
//! pumps inbound text frames into [`TransportEvents`] and writes whatever
//! the handle queues. `Closed` is reported however the task ends, panics
//! included.

use super::{Connector, TransportEvents, TransportHandle};
use futures_util::{SinkExt, StreamExt};
use std::sync::Once;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};

static INIT_CRYPTO: Once = Once::new();

/// Install the ring TLS provider for `wss://` endpoints
///
/// Runs once per process. A provider installed earlier by the application
/// is kept.
pub fn init_crypto() {
    INIT_CRYPTO.call_once(|| {
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

/// [`Connector`] backed by `tokio-tungstenite`
#[derive(Debug, Clone, Copy, Default)]
pub struct WsConnector;

impl Connector for WsConnector {
    fn connect(&self, url: &str, events: TransportEvents) -> TransportHandle {
        init_crypto();

        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(drive(url.to_string(), events, rx));
        TransportHandle::new(tx)
    }
}

/// Run one socket from connect to close
async fn drive(url: String, events: TransportEvents, mut outbound: mpsc::UnboundedReceiver<String>) {
    let generation = events.generation();
    let _closed = CloseOnDrop(events.clone());

    // Abandon the attempt if the handle is dropped while still connecting
    let socket = tokio::select! {
        result = connect_async(url.as_str()) => match result {
            Ok((socket, _response)) => socket,
            Err(e) => {
                tracing::warn!(generation, url = %url, error = %e, "WebSocket connect failed");
                events.error(e.to_string());
                return;
            }
        },
        () = abandoned(&mut outbound) => {
            tracing::debug!(generation, "Connect attempt abandoned");
            return;
        }
    };

    tracing::info!(generation, url = %url, "WebSocket connection established");
    events.opened();

    let (mut ws_sink, mut ws_stream) = socket.split();

    loop {
        tokio::select! {
            frame = ws_stream.next() => match frame {
                Some(Ok(Message::Text(text))) => events.message(text),
                Some(Ok(Message::Close(frame))) => {
                    tracing::info!(generation, close = ?frame, "Server closed connection");
                    break;
                }
                Some(Ok(Message::Binary(_))) => {
                    tracing::debug!(generation, "Binary frames not supported, ignoring");
                }
                // Ping/Pong are answered by tungstenite
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::warn!(generation, error = %e, "WebSocket error");
                    events.error(e.to_string());
                    break;
                }
                None => {
                    tracing::info!(generation, "WebSocket stream ended");
                    break;
                }
            },
            outgoing = outbound.recv() => match outgoing {
                Some(text) => {
                    if let Err(e) = ws_sink.send(Message::Text(text)).await {
                        tracing::warn!(generation, error = %e, "Failed to send frame");
                        events.error(e.to_string());
                        break;
                    }
                }
                None => {
                    tracing::debug!(generation, "Transport handle dropped, closing");
                    let _ = ws_sink.close().await;
                    break;
                }
            },
        }
    }
}

/// Reports `Closed` when the driver exits
struct CloseOnDrop(TransportEvents);

impl Drop for CloseOnDrop {
    fn drop(&mut self) {
        self.0.closed();
    }
}

/// Resolves once the handle side of `outbound` is gone
///
/// Nothing is written before the transport reports `Opened`, so any frame
/// seen here is dropped.
async fn abandoned(outbound: &mut mpsc::UnboundedReceiver<String>) {
    while let Some(text) = outbound.recv().await {
        tracing::debug!(bytes = text.len(), "Dropping frame queued before open");
    }
}

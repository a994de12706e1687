//! Test helpers for integration tests
//!
//! Provides an in-process WebSocket server that hands every accepted
//! connection to the test, plus timeouts around event and frame waits.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use futures_util::{SinkExt, StreamExt};
use pubsub_client::protocol::OutboundFrame;
use pubsub_client::{ClientEvent, EventReceiver};
use serde_json::Value;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{accept_async, WebSocketStream};

/// Upper bound for any single wait; covers the client's reconnect delay
pub const WAIT_TIMEOUT: Duration = Duration::from_secs(10);

/// In-process pub/sub server
pub struct TestServer {
    pub addr: SocketAddr,
    connections: mpsc::UnboundedReceiver<ServerConnection>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Bind to an ephemeral port and start accepting
    pub async fn start() -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let (tx, connections) = mpsc::unbounded_channel();

        let handle = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                match accept_async(stream).await {
                    Ok(ws) => {
                        if tx.send(ServerConnection { ws }).is_err() {
                            break;
                        }
                    }
                    Err(e) => eprintln!("WebSocket handshake failed: {e}"),
                }
            }
        });

        Ok(Self {
            addr,
            connections,
            _handle: handle,
        })
    }

    /// URL clients should connect to
    pub fn url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// Wait for the next client connection
    pub async fn accept(&mut self) -> Result<ServerConnection> {
        timeout(WAIT_TIMEOUT, self.connections.recv())
            .await
            .map_err(|_| anyhow!("Timed out waiting for a connection"))?
            .ok_or_else(|| anyhow!("Server stopped accepting"))
    }

    /// Check that no further connection arrives within `window`
    pub async fn assert_no_connection(&mut self, window: Duration) -> Result<()> {
        match timeout(window, self.connections.recv()).await {
            Ok(Some(_)) => bail!("Unexpected extra connection"),
            _ => Ok(()),
        }
    }
}

/// Server side of one client connection
pub struct ServerConnection {
    ws: WebSocketStream<TcpStream>,
}

impl ServerConnection {
    /// Next frame written by the client
    pub async fn next_frame(&mut self) -> Result<OutboundFrame> {
        loop {
            let message = timeout(WAIT_TIMEOUT, self.ws.next())
                .await
                .map_err(|_| anyhow!("Timed out waiting for a frame"))?;

            match message {
                Some(Ok(Message::Text(text))) => return Ok(OutboundFrame::from_json(&text)?),
                Some(Ok(Message::Close(_))) | None => bail!("Connection closed"),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
            }
        }
    }

    /// Read the PING and one LISTEN per subscription sent on open
    pub async fn handshake(&mut self, subscriptions: usize) -> Result<Vec<OutboundFrame>> {
        let mut frames = Vec::with_capacity(subscriptions + 1);
        for _ in 0..=subscriptions {
            frames.push(self.next_frame().await?);
        }
        Ok(frames)
    }

    /// Send a JSON frame to the client
    pub async fn send_json(&mut self, frame: Value) -> Result<()> {
        self.ws.send(Message::Text(frame.to_string())).await?;
        Ok(())
    }

    /// Close the connection from the server side
    pub async fn close(mut self) -> Result<()> {
        self.ws.close(None).await?;
        Ok(())
    }

    /// Wait until the client closes the connection
    pub async fn wait_closed(&mut self) -> Result<()> {
        loop {
            let message = timeout(WAIT_TIMEOUT, self.ws.next())
                .await
                .map_err(|_| anyhow!("Timed out waiting for the client to close"))?;

            match message {
                Some(Ok(Message::Close(_))) | None | Some(Err(_)) => return Ok(()),
                Some(Ok(_)) => {}
            }
        }
    }
}

/// Next client event, failing after [`WAIT_TIMEOUT`]
pub async fn next_event(events: &mut EventReceiver) -> Result<ClientEvent> {
    Ok(timeout(WAIT_TIMEOUT, events.recv())
        .await
        .map_err(|_| anyhow!("Timed out waiting for a client event"))??)
}

/// An address nothing is listening on
pub async fn unused_addr() -> Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    Ok(listener.local_addr()?)
}

//! Public client
//!
//! Starting a client spawns its connection manager; from then on the client
//! connects, subscribes and reconnects on its own, and reports through
//! [`ClientEvent`](crate::events::ClientEvent)s.

use crate::connection::ConnectionManager;
use crate::events::{EventReceiver, EventSink};
use crate::transport::{Connector, WsConnector};
use pubsub_common::ClientConfig;
use pubsub_core::SubscriptionRequest;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Handle to a running pub/sub client
///
/// Dropping the handle stops the client and closes its transport.
#[derive(Debug)]
pub struct PubSubClient {
    sink: EventSink,
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl PubSubClient {
    /// Start a client over WebSocket
    ///
    /// Must be called from within a tokio runtime. The returned receiver is
    /// registered before the first connect attempt, so it sees every event.
    pub fn start(config: ClientConfig) -> (Self, EventReceiver) {
        Self::start_with_connector(config, WsConnector)
    }

    /// Start a client over a custom transport
    pub fn start_with_connector<C: Connector>(config: ClientConfig, connector: C) -> (Self, EventReceiver) {
        let sink = EventSink::new(config.event_buffer);
        let receiver = sink.subscribe();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tracing::info!(
            endpoint = %config.endpoint,
            subscriptions = config.subscriptions.len(),
            authenticated = !config.credential.is_empty(),
            "Starting pub/sub client"
        );

        let manager = ConnectionManager::new(config, connector, sink.clone());
        let task = tokio::spawn(manager.run(shutdown_rx));

        (
            Self {
                sink,
                shutdown_tx,
                task,
            },
            receiver,
        )
    }

    /// Create a builder
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Register another event receiver
    #[must_use]
    pub fn subscribe(&self) -> EventReceiver {
        self.sink.subscribe()
    }

    /// Stop reconnecting, close the transport and wait for the manager to exit
    pub async fn shutdown(self) {
        let Self {
            shutdown_tx, task, ..
        } = self;

        let _ = shutdown_tx.send(());
        if let Err(e) = task.await {
            tracing::warn!(error = %e, "Connection manager task failed");
        }
    }
}

/// Builder for [`PubSubClient`]
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Create a builder with an empty credential and no subscriptions
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ClientConfig::new("", Vec::new()),
        }
    }

    /// Start from an existing configuration
    #[must_use]
    pub fn from_config(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Set the bearer credential
    #[must_use]
    pub fn credential(mut self, credential: impl Into<String>) -> Self {
        self.config.credential = credential.into();
        self
    }

    /// Set the WebSocket URL
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    /// Add a subscription
    #[must_use]
    pub fn subscription(mut self, subscription: SubscriptionRequest) -> Self {
        self.config.subscriptions.push(subscription);
        self
    }

    /// Set the consumer event channel capacity
    #[must_use]
    pub fn event_buffer(mut self, capacity: usize) -> Self {
        self.config.event_buffer = capacity;
        self
    }

    /// The configuration built so far
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build and start the client over WebSocket
    pub fn start(self) -> (PubSubClient, EventReceiver) {
        PubSubClient::start(self.config)
    }

    /// Build and start the client over a custom transport
    pub fn start_with_connector<C: Connector>(self, connector: C) -> (PubSubClient, EventReceiver) {
        PubSubClient::start_with_connector(self.config, connector)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

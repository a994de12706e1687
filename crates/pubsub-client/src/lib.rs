//! # pubsub-client
//!
//! Persistent WebSocket client for a real-time pub/sub feed.
//!
//! The client connects, LISTENs on every configured topic, keeps the
//! connection alive with periodic PINGs and reconnects after any close or
//! server-requested migration. Everything that happens is reported as a
//! [`ClientEvent`].

pub mod client;
pub mod connection;
pub mod error;
pub mod events;
pub mod handlers;
pub mod protocol;
pub mod transport;

pub use client::{ClientBuilder, PubSubClient};
pub use connection::ConnectionState;
pub use error::ClientError;
pub use events::{ClientEvent, EventReceiver, EventSink};
pub use transport::{Connector, TransportEvent, TransportEvents, TransportHandle, WsConnector};

pub use pubsub_common::ClientConfig;
pub use pubsub_core::SubscriptionRequest;

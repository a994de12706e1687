//! Pub/sub client entry point
//!
//! Run with:
//! ```bash
//! PUBSUB_SUBSCRIPTIONS=channel-points:le_xot:155644238 cargo run -p pubsub-client
//! ```
//!
//! Configuration is loaded from environment variables. Every event is
//! logged until Ctrl-C.

use anyhow::Context;
use pubsub_client::{ClientConfig, ClientEvent, PubSubClient};
use pubsub_common::try_init_tracing;
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Initialize tracing
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = %e, "Client failed");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = ClientConfig::from_env().context("Failed to load configuration")?;

    if config.subscriptions.is_empty() {
        warn!("No subscriptions configured, set PUBSUB_SUBSCRIPTIONS to alias:channel:user_id");
    }

    let (client, mut events) = PubSubClient::start(config);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(ClientEvent::Connected) => info!("PubSub connected"),
                Ok(ClientEvent::Error(e)) if e.is_recovered_by_reconnect() => {
                    warn!(error = %e, "PubSub error, reconnecting");
                }
                Ok(ClientEvent::Error(e)) => error!(error = %e, "PubSub error"),
                Ok(ClientEvent::Message(data)) => info!(data = %data, "PubSub message"),
                Ok(ClientEvent::Disconnected) => info!("PubSub disconnected"),
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "Event receiver lagged"),
                Err(RecvError::Closed) => break,
            },
            result = &mut ctrl_c => {
                result.context("Failed to listen for Ctrl-C")?;
                info!("Shutting down");
                break;
            }
        }
    }

    client.shutdown().await;
    Ok(())
}

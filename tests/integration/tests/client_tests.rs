//! Client Integration Tests
//!
//! Runs the client against an in-process WebSocket server.
//!
//! Run with: cargo test -p integration-tests --test client_tests

use std::time::Duration;

use integration_tests::{next_event, unused_addr, TestServer};
use pubsub_client::protocol::OutboundFrame;
use pubsub_client::{ClientError, ClientEvent, PubSubClient, SubscriptionRequest};
use pubsub_core::NONCE_LEN;
use serde_json::json;

fn subscriptions() -> Vec<SubscriptionRequest> {
    vec![
        SubscriptionRequest::new("channel-points", "le_xot", 155_644_238),
        SubscriptionRequest::new("whispers", "le_xot", 155_644_238),
    ]
}

fn start_client(server: &TestServer) -> (PubSubClient, pubsub_client::EventReceiver) {
    let mut builder = PubSubClient::builder().credential("token").endpoint(server.url());
    for subscription in subscriptions() {
        builder = builder.subscription(subscription);
    }
    builder.start()
}

// ============================================================================
// Handshake
// ============================================================================

#[tokio::test]
async fn test_open_sends_ping_then_listens() {
    let mut server = TestServer::start().await.unwrap();
    let (client, mut events) = start_client(&server);

    let mut conn = server.accept().await.unwrap();
    let frames = conn.handshake(2).await.unwrap();

    assert_eq!(frames[0], OutboundFrame::ping("token"));

    let mut nonces = Vec::new();
    let mut topics = Vec::new();
    for frame in &frames[1..] {
        let OutboundFrame::Listen { nonce, data } = frame else {
            panic!("expected LISTEN, got {frame:?}");
        };
        assert_eq!(nonce.len(), NONCE_LEN);
        assert!(nonce.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(data.auth_token, "token");
        nonces.push(nonce.clone());
        topics.extend(data.topics.clone());
    }

    assert_ne!(nonces[0], nonces[1]);
    assert_eq!(
        topics,
        vec![
            "channel-points-channel-v1.155644238".to_string(),
            "whispers.155644238".to_string(),
        ]
    );
    assert_eq!(next_event(&mut events).await.unwrap(), ClientEvent::Connected);

    client.shutdown().await;
}

// ============================================================================
// Inbound frames
// ============================================================================

#[tokio::test]
async fn test_responses_and_messages() {
    let mut server = TestServer::start().await.unwrap();
    let (client, mut events) = start_client(&server);

    let mut conn = server.accept().await.unwrap();
    conn.handshake(2).await.unwrap();
    assert_eq!(next_event(&mut events).await.unwrap(), ClientEvent::Connected);

    conn.send_json(json!({"type": "RESPONSE", "nonce": "abc", "error": ""}))
        .await
        .unwrap();
    conn.send_json(json!({"type": "PONG"})).await.unwrap();
    conn.send_json(json!({"type": "RESPONSE", "error": "bad auth"}))
        .await
        .unwrap();
    conn.send_json(json!({
        "type": "MESSAGE",
        "data": {"topic": "whispers.155644238", "message": "{\"body\":\"hi\"}"}
    }))
    .await
    .unwrap();

    assert_eq!(
        next_event(&mut events).await.unwrap(),
        ClientEvent::Error(ClientError::Rejected("bad auth".to_string()))
    );
    assert_eq!(
        next_event(&mut events).await.unwrap(),
        ClientEvent::Message(json!({
            "topic": "whispers.155644238",
            "message": "{\"body\":\"hi\"}"
        }))
    );

    // A rejection does not close the connection
    conn.send_json(json!({"type": "MESSAGE", "data": 1})).await.unwrap();
    assert_eq!(next_event(&mut events).await.unwrap(), ClientEvent::Message(json!(1)));

    client.shutdown().await;
}

// ============================================================================
// Recovery
// ============================================================================

#[tokio::test]
async fn test_server_close_reconnects_and_resubscribes() {
    let mut server = TestServer::start().await.unwrap();
    let (client, mut events) = start_client(&server);

    let mut conn = server.accept().await.unwrap();
    conn.handshake(2).await.unwrap();
    assert_eq!(next_event(&mut events).await.unwrap(), ClientEvent::Connected);

    conn.close().await.unwrap();
    assert_eq!(next_event(&mut events).await.unwrap(), ClientEvent::Disconnected);

    let mut second = server.accept().await.unwrap();
    let frames = second.handshake(2).await.unwrap();
    assert_eq!(frames[0], OutboundFrame::ping("token"));
    assert_eq!(next_event(&mut events).await.unwrap(), ClientEvent::Connected);

    server.assert_no_connection(Duration::from_secs(4)).await.unwrap();

    client.shutdown().await;
}

#[tokio::test]
async fn test_reconnect_frame_migrates_to_new_connection() {
    let mut server = TestServer::start().await.unwrap();
    let (client, mut events) = start_client(&server);

    let mut old = server.accept().await.unwrap();
    old.handshake(2).await.unwrap();
    assert_eq!(next_event(&mut events).await.unwrap(), ClientEvent::Connected);

    old.send_json(json!({"type": "RECONNECT"})).await.unwrap();
    assert_eq!(
        next_event(&mut events).await.unwrap(),
        ClientEvent::Error(ClientError::Reconnecting)
    );

    let mut new = server.accept().await.unwrap();
    assert_eq!(next_event(&mut events).await.unwrap(), ClientEvent::Disconnected);
    old.wait_closed().await.unwrap();

    new.handshake(2).await.unwrap();
    assert_eq!(next_event(&mut events).await.unwrap(), ClientEvent::Connected);

    server.assert_no_connection(Duration::from_secs(4)).await.unwrap();

    client.shutdown().await;
}

#[tokio::test]
async fn test_unreachable_endpoint_keeps_retrying() {
    let addr = unused_addr().await.unwrap();
    let (client, mut events) = PubSubClient::builder()
        .endpoint(format!("ws://{addr}"))
        .subscription(SubscriptionRequest::new("channel-bits", "x", 1))
        .start();

    for _ in 0..2 {
        assert!(matches!(
            next_event(&mut events).await.unwrap(),
            ClientEvent::Error(ClientError::Transport(_))
        ));
        assert_eq!(next_event(&mut events).await.unwrap(), ClientEvent::Disconnected);
    }

    client.shutdown().await;
}

#[tokio::test]
async fn test_failed_tls_endpoint_is_reported_and_retried() {
    // Plain TCP that hangs up before any TLS handshake
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            drop(stream);
        }
    });

    let (client, mut events) = PubSubClient::builder()
        .endpoint(format!("wss://{addr}"))
        .subscription(SubscriptionRequest::new("whispers", "x", 1))
        .start();

    for _ in 0..2 {
        assert!(matches!(
            next_event(&mut events).await.unwrap(),
            ClientEvent::Error(ClientError::Transport(_))
        ));
        assert_eq!(next_event(&mut events).await.unwrap(), ClientEvent::Disconnected);
    }

    client.shutdown().await;
}

#[tokio::test]
async fn test_shutdown_closes_connection() {
    let mut server = TestServer::start().await.unwrap();
    let (client, mut events) = start_client(&server);

    let mut conn = server.accept().await.unwrap();
    conn.handshake(2).await.unwrap();
    assert_eq!(next_event(&mut events).await.unwrap(), ClientEvent::Connected);

    client.shutdown().await;

    conn.wait_closed().await.unwrap();
    server.assert_no_connection(Duration::from_secs(4)).await.unwrap();
}

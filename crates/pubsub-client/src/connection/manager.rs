//! Connection manager
//!
//! A single task owns the current transport, the heartbeat interval and the
//! pending reconnect timer. Every transport event and timer expiry is
//! handled to completion inside one `select!` loop, so no two handlers ever
//! run at the same time.
//!
//! Each connect attempt gets a new generation number. Events carrying an
//! older generation belong to a superseded transport and are discarded.
//! At most one reconnect is pending at any time: a RECONNECT frame followed
//! by the old socket's own close schedules a single new attempt.

use super::ConnectionState;
use crate::error::ClientError;
use crate::events::{ClientEvent, EventSink};
use crate::handlers::{FrameAction, FrameDispatcher};
use crate::protocol::{OutboundFrame, HEARTBEAT_INTERVAL, RECONNECT_DELAY};
use crate::transport::{Connector, TaggedEvent, TransportEvent, TransportEvents, TransportHandle};
use pubsub_common::ClientConfig;
use pubsub_core::SubscriptionRequest;
use std::future;
use std::pin::Pin;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{interval_at, sleep, Instant, Interval, MissedTickBehavior, Sleep};

pub(crate) struct ConnectionManager<C> {
    config: ClientConfig,
    connector: C,
    sink: EventSink,
    state: ConnectionState,
    /// Generation of the current connect attempt
    generation: u64,
    transport: Option<TransportHandle>,
    heartbeat: Option<Interval>,
    reconnect: Option<Pin<Box<Sleep>>>,
    events_tx: mpsc::UnboundedSender<TaggedEvent>,
    events_rx: mpsc::UnboundedReceiver<TaggedEvent>,
}

impl<C: Connector> ConnectionManager<C> {
    pub(crate) fn new(config: ClientConfig, connector: C, sink: EventSink) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Self {
            config,
            connector,
            sink,
            state: ConnectionState::Closed,
            generation: 0,
            transport: None,
            heartbeat: None,
            reconnect: None,
            events_tx,
            events_rx,
        }
    }

    /// Connect and keep reconnecting until `shutdown` fires or its sender is dropped
    pub(crate) async fn run(mut self, mut shutdown: oneshot::Receiver<()>) {
        self.connect();

        loop {
            tokio::select! {
                Some(tagged) = self.events_rx.recv() => self.handle_transport_event(tagged),
                () = next_heartbeat(&mut self.heartbeat) => self.heartbeat(),
                () = reconnect_due(&mut self.reconnect) => {
                    self.reconnect = None;
                    self.connect();
                }
                _ = &mut shutdown => break,
            }
        }

        self.cancel_heartbeat();
        self.reconnect = None;
        if let Some(transport) = self.transport.take() {
            transport.close();
        }

        tracing::info!(generation = self.generation, "Connection manager stopped");
    }

    /// Start a fresh connect attempt, discarding any transport still held
    fn connect(&mut self) {
        self.cancel_heartbeat();
        self.reconnect = None;

        if let Some(previous) = self.transport.take() {
            tracing::info!(
                generation = self.generation,
                state = %self.state,
                "Closing superseded transport"
            );
            previous.close();
            self.sink.emit(ClientEvent::Disconnected);
        }

        self.generation += 1;
        self.state = ConnectionState::Connecting;

        tracing::info!(
            generation = self.generation,
            endpoint = %self.config.endpoint,
            "Connecting"
        );

        let events = TransportEvents::new(self.generation, self.events_tx.clone());
        self.transport = Some(self.connector.connect(&self.config.endpoint, events));
    }

    fn handle_transport_event(&mut self, tagged: TaggedEvent) {
        if tagged.generation != self.generation {
            tracing::trace!(
                generation = tagged.generation,
                current = self.generation,
                event = ?tagged.event,
                "Discarding event from superseded transport"
            );
            return;
        }

        match tagged.event {
            TransportEvent::Opened => self.on_open(),
            TransportEvent::Message(text) => self.on_frame(&text),
            TransportEvent::Error(error) => {
                tracing::warn!(generation = self.generation, error = %error, "Transport error");
                self.sink.emit(ClientEvent::Error(ClientError::Transport(error)));
            }
            TransportEvent::Closed => self.on_close(),
        }
    }

    fn on_open(&mut self) {
        if self.transport.is_none() {
            return;
        }

        self.state = ConnectionState::Open;

        tracing::info!(
            generation = self.generation,
            subscriptions = self.config.subscriptions.len(),
            "Connection open"
        );

        self.heartbeat();
        for subscription in &self.config.subscriptions {
            self.listen(subscription);
        }
        self.arm_heartbeat();

        self.sink.emit(ClientEvent::Connected);
    }

    fn on_frame(&mut self, text: &str) {
        match FrameDispatcher::dispatch(text) {
            FrameAction::Acknowledged => {}
            FrameAction::Rejected(error) => {
                self.sink.emit(ClientEvent::Error(ClientError::Rejected(error)));
            }
            FrameAction::Reconnect => {
                tracing::info!(generation = self.generation, "Server requested reconnect");
                self.sink.emit(ClientEvent::Error(ClientError::Reconnecting));
                self.schedule_reconnect();
            }
            FrameAction::Deliver(data) => self.sink.emit(ClientEvent::Message(data)),
            FrameAction::Ignored(frame_type) => {
                tracing::trace!(frame_type = %frame_type, "Ignoring frame");
            }
            FrameAction::Malformed(reason) => {
                self.sink.emit(ClientEvent::Error(ClientError::Decode(reason)));
            }
        }
    }

    fn on_close(&mut self) {
        // A transport reports Closed once; anything after that is noise
        let Some(transport) = self.transport.take() else {
            return;
        };
        drop(transport);

        self.state = ConnectionState::Closed;
        tracing::info!(generation = self.generation, "Connection closed");

        self.sink.emit(ClientEvent::Disconnected);
        self.cancel_heartbeat();
        self.schedule_reconnect();
    }

    /// Send a PING; a no-op unless the transport is open
    fn heartbeat(&self) {
        if !self.state.is_open() {
            tracing::trace!(state = %self.state, "Skipping heartbeat, transport not open");
            return;
        }

        self.send(&OutboundFrame::ping(&self.config.credential));
    }

    /// Send a LISTEN for one subscription; a no-op unless the transport is open
    fn listen(&self, subscription: &SubscriptionRequest) {
        if !self.state.is_open() {
            return;
        }

        let frame = OutboundFrame::listen(subscription, &self.config.credential);
        tracing::debug!(
            topic = %subscription.wire_topic(),
            channel = %subscription.channel,
            "Sending LISTEN"
        );
        self.send(&frame);
    }

    fn send(&self, frame: &OutboundFrame) {
        let Some(transport) = &self.transport else {
            return;
        };

        match frame.to_json() {
            Ok(json) => {
                if let Err(e) = transport.send(json) {
                    tracing::debug!(frame_type = %frame.frame_type(), error = %e, "Frame not sent");
                }
            }
            Err(e) => {
                tracing::warn!(frame_type = %frame.frame_type(), error = %e, "Failed to encode frame");
            }
        }
    }

    fn arm_heartbeat(&mut self) {
        self.cancel_heartbeat();

        let mut heartbeat = interval_at(Instant::now() + HEARTBEAT_INTERVAL, HEARTBEAT_INTERVAL);
        heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.heartbeat = Some(heartbeat);
    }

    fn cancel_heartbeat(&mut self) {
        self.heartbeat = None;
    }

    fn schedule_reconnect(&mut self) {
        if self.reconnect.is_some() {
            tracing::debug!(generation = self.generation, "Reconnect already scheduled");
            return;
        }

        tracing::debug!(
            generation = self.generation,
            delay_ms = RECONNECT_DELAY.as_millis(),
            "Scheduling reconnect"
        );
        self.reconnect = Some(Box::pin(sleep(RECONNECT_DELAY)));
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> ConnectionState {
        self.state
    }
}

async fn next_heartbeat(heartbeat: &mut Option<Interval>) {
    match heartbeat {
        Some(interval) => {
            interval.tick().await;
        }
        None => future::pending().await,
    }
}

async fn reconnect_due(reconnect: &mut Option<Pin<Box<Sleep>>>) {
    match reconnect {
        Some(timer) => timer.as_mut().await,
        None => future::pending().await,
    }
}

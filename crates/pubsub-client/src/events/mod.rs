//! Consumer-facing events

mod event_types;
mod sink;

pub use event_types::ClientEvent;
pub use sink::{EventReceiver, EventSink};

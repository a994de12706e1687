//! Connection lifecycle
//!
//! The connection manager owns the only transport, the heartbeat and the
//! reconnect timer, and drives them through connect, open, close and retry.

mod manager;
mod state;

pub(crate) use manager::ConnectionManager;
pub use state::ConnectionState;

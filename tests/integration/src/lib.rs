//! Integration test utilities for the pub/sub client
//!
//! This crate runs an in-process WebSocket server that plays the pub/sub
//! server's side of the protocol.

pub mod helpers;

pub use helpers::*;

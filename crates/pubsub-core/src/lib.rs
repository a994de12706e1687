//! # pubsub-core
//!
//! Domain layer for the pub/sub client: topic aliases and their wire names,
//! subscription requests, and LISTEN nonces.
//! This crate has no dependency on the transport or the async runtime.

pub mod error;
pub mod nonce;
pub mod subscription;
pub mod topic;

// Re-export commonly used types at crate root
pub use error::DomainError;
pub use nonce::{generate_nonce, NONCE_LEN};
pub use subscription::SubscriptionRequest;
pub use topic::{resolve_topic, wire_topic, TopicAlias};

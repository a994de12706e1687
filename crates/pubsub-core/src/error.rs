//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid subscription '{input}': {reason}")]
    InvalidSubscription { input: String, reason: String },
}

impl DomainError {
    pub(crate) fn invalid_subscription(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSubscription {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

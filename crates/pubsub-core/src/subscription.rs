//! Subscription requests

use crate::error::DomainError;
use crate::topic::wire_topic;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A topic the client declares interest in on every connection
///
/// `channel` is caller bookkeeping only; the server addresses the
/// subscription by wire topic and user id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionRequest {
    /// Topic alias, resolved to a wire topic before sending
    pub alias: String,
    /// Channel label
    pub channel: String,
    /// Numeric user id the topic is scoped to
    pub user_id: u64,
}

impl SubscriptionRequest {
    /// Create a new subscription request
    pub fn new(alias: impl Into<String>, channel: impl Into<String>, user_id: u64) -> Self {
        Self {
            alias: alias.into(),
            channel: channel.into(),
            user_id,
        }
    }

    /// The `<wire topic>.<user id>` string listed in the LISTEN frame
    #[must_use]
    pub fn wire_topic(&self) -> String {
        wire_topic(&self.alias, self.user_id)
    }
}

impl fmt::Display for SubscriptionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.alias, self.channel, self.user_id)
    }
}

/// Parses the compact `alias:channel:user_id` form
impl FromStr for SubscriptionRequest {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(3, ':');
        let (Some(alias), Some(channel), Some(user_id)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(DomainError::invalid_subscription(
                s,
                "expected alias:channel:user_id",
            ));
        };

        if alias.is_empty() {
            return Err(DomainError::invalid_subscription(s, "alias is empty"));
        }

        let user_id = user_id
            .parse()
            .map_err(|_| DomainError::invalid_subscription(s, "user id is not a number"))?;

        Ok(Self::new(alias, channel, user_id))
    }
}

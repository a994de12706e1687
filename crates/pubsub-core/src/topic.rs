//! Topic aliases
//!
//! Maps the short, caller-facing topic names onto the topic strings the
//! pub/sub server expects. Unknown aliases are sent verbatim.

use std::fmt;

/// Known topic aliases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopicAlias {
    /// Bits cheered in a channel
    ChannelBits,
    /// Channel points redemptions
    ChannelPoints,
    /// Subscriptions and resubscriptions
    ChannelSubscriptions,
    /// Bits badge unlocks
    ChannelBitsBadge,
    /// Moderator actions in chat
    ChatModeratorActions,
    /// Whispers to the user
    Whispers,
}

impl TopicAlias {
    /// Every known alias, in declaration order
    pub const ALL: [Self; 6] = [
        Self::ChannelBits,
        Self::ChannelPoints,
        Self::ChannelSubscriptions,
        Self::ChannelBitsBadge,
        Self::ChatModeratorActions,
        Self::Whispers,
    ];

    /// Look up an alias by its exact, case-sensitive name
    #[must_use]
    pub fn from_alias(alias: &str) -> Option<Self> {
        match alias {
            "channel-bits" => Some(Self::ChannelBits),
            "channel-points" => Some(Self::ChannelPoints),
            "channel-subscriptions" => Some(Self::ChannelSubscriptions),
            "channel-bits-badge" => Some(Self::ChannelBitsBadge),
            "chat-moderator-actions" => Some(Self::ChatModeratorActions),
            "whispers" => Some(Self::Whispers),
            _ => None,
        }
    }

    /// The caller-facing alias
    #[must_use]
    pub const fn alias(self) -> &'static str {
        match self {
            Self::ChannelBits => "channel-bits",
            Self::ChannelPoints => "channel-points",
            Self::ChannelSubscriptions => "channel-subscriptions",
            Self::ChannelBitsBadge => "channel-bits-badge",
            Self::ChatModeratorActions => "chat-moderator-actions",
            Self::Whispers => "whispers",
        }
    }

    /// The topic string sent on the wire
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::ChannelBits => "channel-bits-events-v1",
            Self::ChannelPoints => "channel-points-channel-v1",
            Self::ChannelSubscriptions => "channel-subscribe-events-v1",
            Self::ChannelBitsBadge => "channel-bits-badge-unlocks",
            Self::ChatModeratorActions => "chat_moderator_actions",
            Self::Whispers => "whispers",
        }
    }
}

impl fmt::Display for TopicAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.alias())
    }
}

/// Resolve an alias to its wire topic, passing unknown aliases through unchanged
#[must_use]
pub fn resolve_topic(alias: &str) -> &str {
    match TopicAlias::from_alias(alias) {
        Some(topic) => topic.wire_name(),
        None => alias,
    }
}

/// Build the subscription key `<wire topic>.<user id>`
#[must_use]
pub fn wire_topic(alias: &str, user_id: u64) -> String {
    format!("{}.{user_id}", resolve_topic(alias))
}

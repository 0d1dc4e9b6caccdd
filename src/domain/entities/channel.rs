use std::fmt;

/// Kind of conversation, derived from the platform's id prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationKind {
    /// Public channel (`C...`)
    Channel,
    /// Direct message (`D...`)
    Direct,
    /// Private group (`G...`)
    Group,
    Unknown,
}

impl ConversationKind {
    pub fn from_id(id: &str) -> Self {
        match id.chars().next() {
            Some('C') => ConversationKind::Channel,
            Some('D') => ConversationKind::Direct,
            Some('G') => ConversationKind::Group,
            _ => ConversationKind::Unknown,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ConversationKind::Channel => "channel",
            ConversationKind::Direct => "direct",
            ConversationKind::Group => "group",
            ConversationKind::Unknown => "unknown",
        }
    }
}

/// A channel the bot has joined
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Channel {
    pub id: String,
    pub name: String,
}

impl Channel {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    pub fn kind(&self) -> ConversationKind {
        ConversationKind::from_id(&self.id)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.name)
    }
}

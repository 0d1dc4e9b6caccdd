/// Kind of inbound event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Message,
    Other(String),
}

impl EventKind {
    pub fn as_str(&self) -> &str {
        match self {
            EventKind::Message => "message",
            EventKind::Other(s) => s,
        }
    }
}

impl From<&str> for EventKind {
    fn from(tag: &str) -> Self {
        match tag {
            "message" => EventKind::Message,
            other => EventKind::Other(other.to_string()),
        }
    }
}

/// An event received from the chat session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub kind: EventKind,
    pub channel_id: Option<String>,
    pub author_id: Option<String>,
    pub text: Option<String>,
}

impl InboundEvent {
    pub fn new(kind: impl Into<EventKind>) -> Self {
        Self {
            kind: kind.into(),
            channel_id: None,
            author_id: None,
            text: None,
        }
    }

    /// Chat message posted by `author_id` in `channel_id`
    pub fn message(
        channel_id: impl Into<String>,
        author_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self::new(EventKind::Message)
            .with_channel(channel_id)
            .with_author(author_id)
            .with_text(text)
    }

    pub fn with_channel(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = Some(channel_id.into());
        self
    }

    pub fn with_author(mut self, author_id: impl Into<String>) -> Self {
        self.author_id = Some(author_id.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

//! Event filters - Decide whether an inbound event deserves a reply

use std::fmt;
use crate::domain::entities::{BotState, ConversationKind, EventKind, InboundEvent};

/// Why an event was not answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotChatMessage,
    NotChannel,
    FromSelf,
    NotAddressed,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::NotChatMessage => "not a chat message",
            Rejection::NotChannel => "not a channel conversation",
            Rejection::FromSelf => "authored by the bot",
            Rejection::NotAddressed => "bot not addressed",
        };
        f.write_str(reason)
    }
}

/// Phrases that address the bot, matched case-insensitively
#[derive(Debug, Clone)]
pub struct Addressing {
    needles: Vec<String>,
}

impl Addressing {
    pub fn new(trigger: &str, name: &str) -> Self {
        let needles = [trigger, name]
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self { needles }
    }

    pub fn is_addressed(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.needles.iter().any(|n| text.contains(n.as_str()))
    }
}

/// An event that passed every filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addressed<'a> {
    pub channel_id: &'a str,
    pub text: &'a str,
}

pub fn is_chat_message(event: &InboundEvent) -> bool {
    event.kind == EventKind::Message && event.text.as_deref().is_some_and(|t| !t.is_empty())
}

pub fn is_channel_conversation(event: &InboundEvent) -> bool {
    event
        .channel_id
        .as_deref()
        .is_some_and(|id| ConversationKind::from_id(id) == ConversationKind::Channel)
}

pub fn is_from_self(event: &InboundEvent, state: &BotState) -> bool {
    event.author_id.as_deref().is_some_and(|id| state.is_self(id))
}

/// Apply the filters in order; the first failing one wins
pub fn classify<'a>(
    event: &'a InboundEvent,
    state: &BotState,
    addressing: &Addressing,
) -> Result<Addressed<'a>, Rejection> {
    if !is_chat_message(event) {
        return Err(Rejection::NotChatMessage);
    }
    if !is_channel_conversation(event) {
        return Err(Rejection::NotChannel);
    }
    if is_from_self(event, state) {
        return Err(Rejection::FromSelf);
    }

    let text = event.text.as_deref().unwrap_or_default();
    if !addressing.is_addressed(text) {
        return Err(Rejection::NotAddressed);
    }

    Ok(Addressed {
        channel_id: event.channel_id.as_deref().unwrap_or_default(),
        text,
    })
}

//! Message router - Turns addressed channel messages into joke replies

use std::sync::Arc;
use crate::application::errors::{BotError, StorageError};
use crate::domain::entities::{BotState, InboundEvent};
use crate::domain::traits::{ChatSession, JokeStore};
use super::filter::{classify, Addressing, Rejection};

/// What happened to a single inbound event
#[derive(Debug)]
pub enum RouteOutcome {
    /// A filter rejected the event
    Ignored(Rejection),
    /// A joke was posted. `recorded` is false when the usage update failed.
    Replied {
        joke_id: i64,
        channel: String,
        recorded: bool,
    },
    /// The event was addressed to the bot but no reply went out
    Failed(BotError),
}

impl RouteOutcome {
    pub fn is_reply(&self) -> bool {
        matches!(self, RouteOutcome::Replied { .. })
    }
}

/// Routes events from a chat session to the joke store
pub struct MessageRouter<S: ChatSession, J: JokeStore> {
    session: Arc<S>,
    store: Arc<J>,
    state: BotState,
    addressing: Addressing,
}

impl<S: ChatSession, J: JokeStore> MessageRouter<S, J> {
    pub fn new(session: Arc<S>, store: Arc<J>, state: BotState, addressing: Addressing) -> Self {
        Self {
            session,
            store,
            state,
            addressing,
        }
    }

    pub fn state(&self) -> &BotState {
        &self.state
    }

    /// Consume events until the session closes the stream.
    /// Each event is fully handled before the next one is pulled.
    pub async fn run(&self) -> usize {
        let mut replies = 0;
        while let Some(event) = self.session.next_event().await {
            if self.handle(&event).await.is_reply() {
                replies += 1;
            }
        }
        tracing::info!("Event stream closed after {} replies", replies);
        replies
    }

    /// Handle one event. Errors are logged and never escape.
    pub async fn handle(&self, event: &InboundEvent) -> RouteOutcome {
        let addressed = match classify(event, &self.state, &self.addressing) {
            Ok(addressed) => addressed,
            Err(rejection) => {
                tracing::debug!("Ignoring {} event: {}", event.kind.as_str(), rejection);
                return RouteOutcome::Ignored(rejection);
            }
        };

        tracing::debug!("[{}] addressed: {}", addressed.channel_id, addressed.text);

        match self.reply(addressed.channel_id).await {
            Ok(outcome) => outcome,
            Err(BotError::Storage(StorageError::NotFound(msg))) => {
                tracing::warn!("[{}] No joke to tell: {}", addressed.channel_id, msg);
                RouteOutcome::Failed(BotError::Storage(StorageError::NotFound(msg)))
            }
            Err(e) => {
                tracing::error!("[{}] Reply failed: {}", addressed.channel_id, e);
                RouteOutcome::Failed(e)
            }
        }
    }

    async fn reply(&self, channel_id: &str) -> Result<RouteOutcome, BotError> {
        let channel = self
            .state
            .channel_by_id(channel_id)
            .ok_or_else(|| BotError::UnknownChannel(channel_id.to_string()))?;

        let joke = self.store.pick_joke().await?;
        self.session.send_to_channel(&channel.name, &joke.text).await?;
        tracing::info!("Told joke {} in {}", joke.id, channel);

        // The joke is already out; a failed update only makes it slightly more likely next time
        let recorded = match self.store.mark_used(joke.id).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Failed to record usage of joke {}: {}", joke.id, e);
                false
            }
        };

        Ok(RouteOutcome::Replied {
            joke_id: joke.id,
            channel: channel.name.clone(),
            recorded,
        })
    }
}

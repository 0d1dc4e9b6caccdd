use async_trait::async_trait;
use crate::domain::entities::{Channel, InboundEvent, User};
use crate::application::errors::BotError;

/// ChatSession trait - abstraction for a connected chat platform session
#[async_trait]
pub trait ChatSession: Send + Sync {
    /// Channels the bot has joined
    fn channels(&self) -> Vec<Channel>;

    /// Users visible to the session, the bot itself included
    fn users(&self) -> Vec<User>;

    /// Wait for the next inbound event. `None` once the stream is closed.
    async fn next_event(&self) -> Option<InboundEvent>;

    /// Post a message to a channel by name
    async fn send_to_channel(&self, channel_name: &str, text: &str) -> Result<(), BotError>;
}

use chrono::{DateTime, Utc};

use super::{Channel, User};

/// State cached once at startup and shared by every routed event
#[derive(Debug, Clone)]
pub struct BotState {
    /// The bot's own user, resolved by name from the session's user list
    pub identity: User,
    pub channels: Vec<Channel>,
    /// Marker left by the previous run, if any
    pub last_run: Option<DateTime<Utc>>,
}

impl BotState {
    pub fn new(identity: User, channels: Vec<Channel>) -> Self {
        Self {
            identity,
            channels,
            last_run: None,
        }
    }

    pub fn with_last_run(mut self, last_run: Option<DateTime<Utc>>) -> Self {
        self.last_run = last_run;
        self
    }

    pub fn channel_by_id(&self, id: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.id == id)
    }

    pub fn channel_by_name(&self, name: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.name == name)
    }

    pub fn is_self(&self, user_id: &str) -> bool {
        self.identity.id == user_id
    }
}

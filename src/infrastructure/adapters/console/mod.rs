//! Console adapter for development/testing
//!
//! Every stdin line is a chat message in the console channel. Two prefixes
//! help exercise the filters:
//! - `/dm <text>` posts to a direct-message conversation
//! - `/as-bot <text>` posts as the bot itself

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::Mutex;
use crate::domain::entities::{Channel, InboundEvent, User};
use crate::domain::traits::ChatSession;
use crate::application::errors::BotError;
use crate::infrastructure::config::ConsoleConfig;

const DIRECT_CHANNEL_ID: &str = "D0CONSOLE";

type LineReader = BufReader<Box<dyn AsyncRead + Send + Unpin>>;

/// Console chat session for local development
pub struct ConsoleSession {
    config: ConsoleConfig,
    bot: User,
    lines: Mutex<LineReader>,
}

impl ConsoleSession {
    pub fn new(config: ConsoleConfig, bot_name: &str) -> Self {
        Self::with_reader(config, bot_name, tokio::io::stdin())
    }

    pub fn with_reader<R>(config: ConsoleConfig, bot_name: &str, reader: R) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        let reader: Box<dyn AsyncRead + Send + Unpin> = Box::new(reader);
        Self {
            bot: User::new(config.bot_id.clone(), bot_name).as_bot(),
            config,
            lines: Mutex::new(BufReader::new(reader)),
        }
    }

    fn parse_line(&self, line: &str) -> InboundEvent {
        let line = line.trim_end();
        if let Some(text) = line.strip_prefix("/dm ") {
            InboundEvent::message(DIRECT_CHANNEL_ID, self.config.user_id.as_str(), text)
        } else if let Some(text) = line.strip_prefix("/as-bot ") {
            InboundEvent::message(self.config.channel_id.as_str(), self.bot.id.as_str(), text)
        } else {
            InboundEvent::message(self.config.channel_id.as_str(), self.config.user_id.as_str(), line)
        }
    }
}

#[async_trait]
impl ChatSession for ConsoleSession {
    fn channels(&self) -> Vec<Channel> {
        vec![Channel::new(self.config.channel_id.clone(), self.config.channel_name.clone())]
    }

    fn users(&self) -> Vec<User> {
        vec![
            User::new(self.config.user_id.clone(), self.config.user_name.clone()),
            self.bot.clone(),
        ]
    }

    async fn next_event(&self) -> Option<InboundEvent> {
        let mut lines = self.lines.lock().await;
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match lines.read_until(b'\n', &mut buf).await {
                Ok(0) => return None,
                Ok(_) => match std::str::from_utf8(&buf) {
                    Ok(line) => return Some(self.parse_line(line)),
                    // One undecodable line must not end the session
                    Err(e) => tracing::warn!("Skipping console line that is not UTF-8: {}", e),
                },
                Err(e) => {
                    tracing::warn!("Console input failed: {}", e);
                    return None;
                }
            }
        }
    }

    async fn send_to_channel(&self, channel_name: &str, text: &str) -> Result<(), BotError> {
        println!("[#{}] {}: {}", channel_name, self.bot.name, text);
        Ok(())
    }
}

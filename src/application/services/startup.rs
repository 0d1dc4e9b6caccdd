//! Startup sequence - Runs once before the router consumes events

use chrono::{DateTime, Utc};
use crate::application::errors::{BotError, StartupError, StorageError};
use crate::domain::entities::{BotState, Channel, User};
use crate::domain::traits::{ChatSession, JokeStore};
use crate::infrastructure::config::BotConfig;

/// Result of the first-run check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FirstRun {
    /// No marker existed; the greeting went out and the marker was written
    Welcomed { channel: String },
    /// A marker existed and now holds the current time.
    /// `previous` is `None` when the old value could not be read.
    Refreshed { previous: Option<DateTime<Utc>> },
    /// No marker, but also no channel to greet; the marker stays unset
    NoWelcomeChannel,
}

/// Find the bot's own user by its configured name
pub fn resolve_identity(users: &[User], name: &str) -> Result<User, StartupError> {
    users
        .iter()
        .find(|u| u.name == name)
        .cloned()
        .ok_or_else(|| StartupError::IdentityNotFound(name.to_string()))
}

fn welcome_channel<'a>(bot: &BotConfig, channels: &'a [Channel]) -> Option<&'a Channel> {
    if let Some(name) = &bot.welcome_channel {
        if let Some(channel) = channels.iter().find(|c| &c.name == name) {
            return Some(channel);
        }
        tracing::warn!("Welcome channel #{} not joined, using the first channel", name);
    }
    channels.first()
}

/// Greet on the very first run, otherwise refresh the last-run marker
pub async fn first_run_check<S, J>(
    session: &S,
    store: &J,
    bot: &BotConfig,
    channels: &[Channel],
    now: DateTime<Utc>,
) -> Result<FirstRun, BotError>
where
    S: ChatSession + ?Sized,
    J: JokeStore + ?Sized,
{
    let previous = match store.last_run_marker().await {
        Ok(marker) => marker,
        Err(StorageError::Corrupt(msg)) => {
            tracing::warn!("Overwriting unreadable last-run marker: {}", msg);
            store.set_last_run_marker(now).await?;
            return Ok(FirstRun::Refreshed { previous: None });
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(previous) = previous {
        store.set_last_run_marker(now).await?;
        tracing::info!("Last run was {}", previous);
        return Ok(FirstRun::Refreshed {
            previous: Some(previous),
        });
    }

    let Some(channel) = welcome_channel(bot, channels) else {
        tracing::warn!("First run, but no joined channel to greet");
        return Ok(FirstRun::NoWelcomeChannel);
    };

    session.send_to_channel(&channel.name, &bot.welcome_text()).await?;
    store.set_last_run_marker(now).await?;
    tracing::info!("First run: introduced myself in {}", channel);

    Ok(FirstRun::Welcomed {
        channel: channel.name.clone(),
    })
}

/// Resolve the bot's identity and run the first-run check.
///
/// Only a missing identity is fatal here; a failing first-run check is
/// logged and startup carries on.
pub async fn bootstrap<S, J>(session: &S, store: &J, bot: &BotConfig) -> Result<BotState, StartupError>
where
    S: ChatSession + ?Sized,
    J: JokeStore + ?Sized,
{
    let identity = resolve_identity(&session.users(), &bot.name)?;
    tracing::info!("Running as {} ({})", identity, identity.id);

    let channels = session.channels();
    tracing::info!("Joined {} channels", channels.len());

    let last_run = match first_run_check(session, store, bot, &channels, Utc::now()).await {
        Ok(FirstRun::Refreshed { previous }) => previous,
        Ok(_) => None,
        Err(e) => {
            tracing::error!("First-run check failed: {}", e);
            None
        }
    };

    Ok(BotState::new(identity, channels).with_last_run(last_run))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crate::testing::{memory_store, MockSession, ReadOnlyStore, BOT_ID, BOT_NAME};

    fn bot_config() -> BotConfig {
        BotConfig {
            name: BOT_NAME.to_string(),
            ..BotConfig::default()
        }
    }

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_resolve_identity() {
        let users = vec![User::new("U1", "alice"), User::new(BOT_ID, BOT_NAME).as_bot()];
        assert_eq!(resolve_identity(&users, BOT_NAME).unwrap().id, BOT_ID);
        assert!(matches!(
            resolve_identity(&users, "nobody"),
            Err(StartupError::IdentityNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_first_run_welcomes_once() {
        let session = MockSession::new();
        let store = memory_store(&[]);
        let channels = session.channels();
        let bot = bot_config();

        let first = first_run_check(&session, &store, &bot, &channels, at(1)).await.unwrap();
        assert_eq!(first, FirstRun::Welcomed { channel: "general".to_string() });
        assert_eq!(store.last_run_marker().await.unwrap(), Some(at(1)));

        let second = first_run_check(&session, &store, &bot, &channels, at(2)).await.unwrap();
        assert_eq!(second, FirstRun::Refreshed { previous: Some(at(1)) });
        assert_eq!(store.last_run_marker().await.unwrap(), Some(at(2)));

        let sent = session.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "general");
        assert!(sent[0].1.contains("`parsleyism`"));
        assert!(sent[0].1.contains("`parsleybot`"));
    }

    #[tokio::test]
    async fn test_configured_welcome_channel() {
        let session = MockSession::new();
        let store = memory_store(&[]);
        let bot = BotConfig {
            welcome_channel: Some("random".to_string()),
            ..bot_config()
        };

        let result = first_run_check(&session, &store, &bot, &session.channels(), at(1)).await.unwrap();
        assert_eq!(result, FirstRun::Welcomed { channel: "random".to_string() });
    }

    #[tokio::test]
    async fn test_unjoined_welcome_channel_falls_back() {
        let session = MockSession::new();
        let store = memory_store(&[]);
        let bot = BotConfig {
            welcome_channel: Some("lobby".to_string()),
            ..bot_config()
        };

        let result = first_run_check(&session, &store, &bot, &session.channels(), at(1)).await.unwrap();
        assert_eq!(result, FirstRun::Welcomed { channel: "general".to_string() });
    }

    #[tokio::test]
    async fn test_no_channels_leaves_marker_unset() {
        let session = MockSession::new().with_channels(vec![]);
        let store = memory_store(&[]);

        let result = first_run_check(&session, &store, &bot_config(), &[], at(1)).await.unwrap();
        assert_eq!(result, FirstRun::NoWelcomeChannel);
        assert!(session.sent().is_empty());
        assert!(store.last_run_marker().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_welcome_leaves_marker_unset() {
        let session = MockSession::new().failing_sends();
        let store = memory_store(&[]);

        let result = first_run_check(&session, &store, &bot_config(), &session.channels(), at(1)).await;
        assert!(matches!(result, Err(BotError::Session(_))));
        assert!(store.last_run_marker().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_bootstrap_builds_state() {
        let session = MockSession::new();
        let store = memory_store(&[("A", 0)]);
        store.set_last_run_marker(at(5)).await.unwrap();

        let state = bootstrap(&session, &store, &bot_config()).await.unwrap();
        assert_eq!(state.identity.id, BOT_ID);
        assert_eq!(state.channels.len(), 2);
        assert_eq!(state.last_run, Some(at(5)));
        assert!(session.sent().is_empty());
    }

    #[tokio::test]
    async fn test_bootstrap_survives_marker_write_failure() {
        let session = MockSession::new();
        let store = ReadOnlyStore { inner: memory_store(&[]) };

        let state = bootstrap(&session, &store, &bot_config()).await.unwrap();
        assert_eq!(state.identity.id, BOT_ID);
        assert!(state.last_run.is_none());
    }

    #[tokio::test]
    async fn test_bootstrap_without_identity_is_fatal() {
        let session = MockSession::new();
        let store = memory_store(&[]);
        let bot = BotConfig {
            name: "chuckbot".to_string(),
            ..BotConfig::default()
        };

        let result = bootstrap(&session, &store, &bot).await;
        assert!(matches!(result, Err(StartupError::IdentityNotFound(ref n)) if n == "chuckbot"));
        assert!(session.sent().is_empty());
    }
}

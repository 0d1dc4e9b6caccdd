//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;

/// Default relative location of the joke database
pub const DEFAULT_DB_PATH: &str = "data/parsleybot.db";

const DEFAULT_WELCOME: &str = "Hello World!\nI'm here to make obscure references and chew bubblegum... \
and I'm all out of bubblegum. Just say `{trigger}` or `{name}` to invoke me!";

/// Bot configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub bot: BotConfig,
    pub storage: StorageConfig,
    pub console: ConsoleConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BotConfig {
    /// Handle the bot is known by; also used to find its own user
    pub name: String,
    /// Phrase that makes the bot answer
    pub trigger: String,
    /// Channel name for the first-run greeting; first joined channel if unset
    pub welcome_channel: Option<String>,
    /// Greeting template, `{trigger}` and `{name}` are substituted
    pub welcome_message: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct StorageConfig {
    pub path: PathBuf,
}

/// Console adapter (dev mode) identities
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ConsoleConfig {
    pub channel_id: String,
    pub channel_name: String,
    pub user_id: String,
    pub user_name: String,
    pub bot_id: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "parsleybot".to_string(),
            trigger: "parsleyism".to_string(),
            welcome_channel: None,
            welcome_message: DEFAULT_WELCOME.to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DB_PATH),
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            channel_id: "C0CONSOLE".to_string(),
            channel_name: "general".to_string(),
            user_id: "U0CONSOLE".to_string(),
            user_name: "console".to_string(),
            bot_id: "U0PARSLEY".to_string(),
        }
    }
}

impl BotConfig {
    /// Render the greeting posted on the very first run
    pub fn welcome_text(&self) -> String {
        self.welcome_message
            .replace("{trigger}", &self.trigger)
            .replace("{name}", &self.name)
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn load_env() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Override values from `BOT_NAME`, `BOT_TRIGGER` and `BOT_DB_PATH`
    pub fn apply_env(&mut self) {
        if let Ok(name) = std::env::var("BOT_NAME") {
            self.bot.name = name;
        }

        if let Ok(trigger) = std::env::var("BOT_TRIGGER") {
            self.bot.trigger = trigger;
        }

        if let Ok(path) = std::env::var("BOT_DB_PATH") {
            self.storage.path = PathBuf::from(path);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.name.trim().is_empty() {
            return Err(ConfigError::InvalidValue("bot.name must not be empty".to_string()));
        }
        if self.bot.trigger.trim().is_empty() {
            return Err(ConfigError::InvalidValue("bot.trigger must not be empty".to_string()));
        }
        if self.storage.path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue("storage.path must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bot.name, "parsleybot");
        assert_eq!(config.bot.trigger, "parsleyism");
        assert_eq!(config.storage.path, PathBuf::from("data/parsleybot.db"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("bot:\n  name: chuckbot\n").unwrap();
        assert_eq!(config.bot.name, "chuckbot");
        assert_eq!(config.bot.trigger, "parsleyism");
        assert_eq!(config.console.channel_name, "general");
    }

    #[test]
    fn test_kebab_case_keys() {
        let yaml = "bot:\n  welcome-channel: random\nstorage:\n  path: /tmp/jokes.db\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.bot.welcome_channel.as_deref(), Some("random"));
        assert_eq!(config.storage.path, PathBuf::from("/tmp/jokes.db"));
    }

    #[test]
    fn test_invalid_yaml() {
        let result = Config::from_yaml("bot: [");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_empty_trigger_rejected() {
        let mut config = Config::default();
        config.bot.trigger = "  ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_welcome_text_substitutes_placeholders() {
        let bot = BotConfig {
            welcome_message: "say {trigger} or {name}".to_string(),
            ..BotConfig::default()
        };
        assert_eq!(bot.welcome_text(), "say parsleyism or parsleybot");
    }

    #[test]
    fn test_yaml_roundtrip_of_defaults() {
        let yaml = serde_yaml::to_string(&Config::default()).unwrap();
        assert!(yaml.contains("welcome-message"));
        let parsed = Config::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.bot.welcome_message, Config::default().bot.welcome_message);
    }
}

//! Application layer errors

use std::path::PathBuf;
use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Session error: {0}")]
    Session(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Unknown channel: {0}")]
    UnknownChannel(String),
}

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound(_))
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Errors that stop the bot before it starts consuming events
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Database path \"{}\" does not exist or is not readable", .0.display())]
    StoreUnavailable(PathBuf),

    #[error("Failed to open database: {0}")]
    StoreOpen(String),

    #[error("Database is missing the `{0}` table")]
    SchemaMissing(&'static str),

    #[error("Bot user `{0}` not found among workspace users")]
    IdentityNotFound(String),
}

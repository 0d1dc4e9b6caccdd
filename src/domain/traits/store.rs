use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crate::application::errors::StorageError;
use crate::domain::entities::Joke;

/// JokeStore trait - abstraction for joke persistence and rotation
#[async_trait]
pub trait JokeStore: Send + Sync {
    /// Least used joke, ties broken at random. `StorageError::NotFound` when empty.
    async fn pick_joke(&self) -> Result<Joke, StorageError>;

    /// Increment the usage counter of a joke by one
    async fn mark_used(&self, id: i64) -> Result<(), StorageError>;

    /// All jokes, least used first
    async fn list_jokes(&self) -> Result<Vec<Joke>, StorageError>;

    async fn last_run_marker(&self) -> Result<Option<DateTime<Utc>>, StorageError>;

    async fn set_last_run_marker(&self, at: DateTime<Utc>) -> Result<(), StorageError>;
}

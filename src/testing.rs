//! Shared fixtures for unit tests

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::application::errors::{BotError, StorageError};
use crate::domain::entities::{Channel, InboundEvent, Joke, User};
use crate::domain::traits::{ChatSession, JokeStore};
use crate::infrastructure::database::SqliteJokeStore;

pub const BOT_ID: &str = "UBOT";
pub const BOT_NAME: &str = "parsleybot";
pub const HUMAN_ID: &str = "UHUMAN";

pub fn provision(conn: &Connection) {
    conn.execute_batch(
        "CREATE TABLE jokes (id INTEGER PRIMARY KEY AUTOINCREMENT, joke TEXT NOT NULL, used INTEGER DEFAULT 0);
         CREATE TABLE info (name TEXT PRIMARY KEY, val TEXT);",
    )
    .unwrap();
}

/// In-memory store seeded with `(text, used)` rows; ids start at 1
pub fn memory_store(jokes: &[(&str, i64)]) -> SqliteJokeStore {
    let conn = Connection::open_in_memory().unwrap();
    provision(&conn);
    for (text, used) in jokes {
        conn.execute(
            "INSERT INTO jokes (joke, used) VALUES (?1, ?2)",
            rusqlite::params![text, used],
        )
        .unwrap();
    }
    SqliteJokeStore::from_connection(conn).unwrap()
}

/// Session replaying queued events and recording everything sent
pub struct MockSession {
    channels: Vec<Channel>,
    users: Vec<User>,
    events: Mutex<VecDeque<InboundEvent>>,
    sent: Mutex<Vec<(String, String)>>,
    fail_sends: bool,
}

impl MockSession {
    pub fn new() -> Self {
        Self {
            channels: vec![Channel::new("C123", "general"), Channel::new("C456", "random")],
            users: vec![
                User::new(HUMAN_ID, "alice"),
                User::new(BOT_ID, BOT_NAME).as_bot(),
            ],
            events: Mutex::new(VecDeque::new()),
            sent: Mutex::new(Vec::new()),
            fail_sends: false,
        }
    }

    pub fn with_channels(mut self, channels: Vec<Channel>) -> Self {
        self.channels = channels;
        self
    }

    pub fn with_events(self, events: Vec<InboundEvent>) -> Self {
        self.events.lock().unwrap().extend(events);
        self
    }

    pub fn failing_sends(mut self) -> Self {
        self.fail_sends = true;
        self
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatSession for MockSession {
    fn channels(&self) -> Vec<Channel> {
        self.channels.clone()
    }

    fn users(&self) -> Vec<User> {
        self.users.clone()
    }

    async fn next_event(&self) -> Option<InboundEvent> {
        self.events.lock().unwrap().pop_front()
    }

    async fn send_to_channel(&self, channel_name: &str, text: &str) -> Result<(), BotError> {
        if self.fail_sends {
            return Err(BotError::Session("connection reset".to_string()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((channel_name.to_string(), text.to_string()));
        Ok(())
    }
}

/// Store whose writes always fail with a database error
pub struct ReadOnlyStore {
    pub inner: SqliteJokeStore,
}

fn io_error() -> StorageError {
    StorageError::Database("disk I/O error".to_string())
}

#[async_trait]
impl JokeStore for ReadOnlyStore {
    async fn pick_joke(&self) -> Result<Joke, StorageError> {
        self.inner.pick_joke().await
    }

    async fn mark_used(&self, _id: i64) -> Result<(), StorageError> {
        Err(io_error())
    }

    async fn list_jokes(&self) -> Result<Vec<Joke>, StorageError> {
        self.inner.list_jokes().await
    }

    async fn last_run_marker(&self) -> Result<Option<DateTime<Utc>>, StorageError> {
        self.inner.last_run_marker().await
    }

    async fn set_last_run_marker(&self, _at: DateTime<Utc>) -> Result<(), StorageError> {
        Err(io_error())
    }
}

//! SQLite-backed joke store
//!
//! Expects a pre-provisioned database with the tables
//! `jokes (id INTEGER, joke TEXT, used INTEGER)` and `info (name TEXT, val TEXT)`.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OpenFlags, OptionalExtension, Row};
use std::path::Path;
use tokio::sync::Mutex;

use crate::application::errors::{StartupError, StorageError};
use crate::domain::entities::Joke;
use crate::domain::traits::JokeStore;

/// Key of the last-run marker row in the `info` table
pub const LAST_RUN_KEY: &str = "lastrun";

const REQUIRED_TABLES: [&str; 2] = ["jokes", "info"];

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::Database(e.to_string())
    }
}

impl From<rusqlite::Error> for StartupError {
    fn from(e: rusqlite::Error) -> Self {
        StartupError::StoreOpen(e.to_string())
    }
}

pub struct SqliteJokeStore {
    conn: Mutex<Connection>,
}

impl SqliteJokeStore {
    /// Open an existing database file. Never creates one.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StartupError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(StartupError::StoreUnavailable(path.to_path_buf()));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        tracing::debug!("Opened database at {}", path.display());
        Self::from_connection(conn)
    }

    /// Wrap an already open connection, checking the schema first
    pub fn from_connection(conn: Connection) -> Result<Self, StartupError> {
        Self::check_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn check_schema(conn: &Connection) -> Result<(), StartupError> {
        for table in REQUIRED_TABLES {
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
                [table],
                |row| row.get(0),
            )?;
            if !exists {
                return Err(StartupError::SchemaMissing(table));
            }
        }
        Ok(())
    }

    fn row_to_joke(row: &Row<'_>) -> rusqlite::Result<Joke> {
        let used: i64 = row.get(2)?;
        Ok(Joke {
            id: row.get(0)?,
            text: row.get(1)?,
            used_count: used.max(0) as u64,
        })
    }
}

#[async_trait]
impl JokeStore for SqliteJokeStore {
    async fn pick_joke(&self) -> Result<Joke, StorageError> {
        let conn = self.conn.lock().await;
        conn.query_row(
            "SELECT id, joke, COALESCE(used, 0) AS used FROM jokes
             ORDER BY used ASC, RANDOM() LIMIT 1",
            [],
            Self::row_to_joke,
        )
        .optional()?
        .ok_or_else(|| StorageError::NotFound("no jokes in store".to_string()))
    }

    async fn mark_used(&self, id: i64) -> Result<(), StorageError> {
        let conn = self.conn.lock().await;
        let rows = conn.execute(
            "UPDATE jokes SET used = COALESCE(used, 0) + 1 WHERE id = ?1",
            [id],
        )?;
        if rows == 0 {
            return Err(StorageError::NotFound(format!("joke {}", id)));
        }
        Ok(())
    }

    async fn list_jokes(&self) -> Result<Vec<Joke>, StorageError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT id, joke, COALESCE(used, 0) AS used FROM jokes ORDER BY used ASC, id ASC",
        )?;

        let rows = stmt.query_map([], Self::row_to_joke)?;

        let mut jokes = Vec::new();
        for joke in rows {
            jokes.push(joke?);
        }
        Ok(jokes)
    }

    async fn last_run_marker(&self) -> Result<Option<DateTime<Utc>>, StorageError> {
        let conn = self.conn.lock().await;
        let value: Option<String> = conn
            .query_row(
                "SELECT val FROM info WHERE name = ?1 LIMIT 1",
                [LAST_RUN_KEY],
                |row| row.get(0),
            )
            .optional()?;

        value
            .map(|v| {
                DateTime::parse_from_rfc3339(&v)
                    .map(|at| at.with_timezone(&Utc))
                    .map_err(|e| StorageError::Corrupt(format!("{} = {:?}: {}", LAST_RUN_KEY, v, e)))
            })
            .transpose()
    }

    async fn set_last_run_marker(&self, at: DateTime<Utc>) -> Result<(), StorageError> {
        let value = at.to_rfc3339_opts(SecondsFormat::Millis, true);
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;

        let updated = tx.execute(
            "UPDATE info SET val = ?1 WHERE name = ?2",
            [value.as_str(), LAST_RUN_KEY],
        )?;
        if updated == 0 {
            tx.execute(
                "INSERT INTO info (name, val) VALUES (?1, ?2)",
                [LAST_RUN_KEY, value.as_str()],
            )?;
        }

        tx.commit()?;
        Ok(())
    }
}

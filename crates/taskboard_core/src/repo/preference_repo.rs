//! Key-value preference repository and SQLite implementation.
//!
//! # Responsibility
//! - Store opaque text values under string keys.
//! - Support bulk removal of every key sharing a namespace prefix.
//!
//! # Invariants
//! - Writes replace any existing value for the key.
//! - Deleting a missing key is not an error.

use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Failure anywhere between opening the preference file and reading a key.
#[derive(Debug)]
pub enum RepoError {
    /// The preference file (or in-memory database) could not be opened.
    Open {
        mode: &'static str,
        source: rusqlite::Error,
    },
    /// A schema step failed; earlier steps stay committed.
    Migration { version: u32, source: rusqlite::Error },
    /// The file was written by a newer build that stores preferences differently.
    SchemaTooNew { found: u32, supported: u32 },
    Sqlite(rusqlite::Error),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { mode, source } => {
                write!(f, "cannot open {mode} preference store: {source}")
            }
            Self::Migration { version, source } => {
                write!(f, "preference schema step {version} failed: {source}")
            }
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "preference store uses schema {found}, this build understands up to {supported}"
            ),
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid preference data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } | Self::Migration { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Repository interface for key-value preferences.
pub trait PreferenceRepository {
    /// Returns the stored text for `key`, if any.
    fn read(&self, key: &str) -> RepoResult<Option<String>>;
    /// Inserts or replaces the value for `key`.
    fn write(&self, key: &str, value: &str) -> RepoResult<()>;
    /// Removes `key` if present.
    fn delete(&self, key: &str) -> RepoResult<()>;
    /// Removes every key starting with `prefix`. Returns how many were removed.
    fn delete_prefix(&self, prefix: &str) -> RepoResult<usize>;
}

/// SQLite-backed preference repository.
pub struct SqlitePreferenceRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePreferenceRepository<'conn> {
    /// Wraps a connection opened through `db::open_db*`.
    ///
    /// # Errors
    /// - Returns `InvalidData` when the `preferences` table is missing, i.e.
    ///   the connection skipped `db::ensure_schema`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let table: Option<String> = conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'preferences';",
                [],
                |row| row.get(0),
            )
            .optional()?;
        if table.is_none() {
            return Err(RepoError::InvalidData(
                "preferences table missing; open the connection via db::open_db".to_string(),
            ));
        }
        Ok(Self { conn })
    }
}

impl PreferenceRepository for SqlitePreferenceRepository<'_> {
    fn read(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1;",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO preferences (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn delete(&self, key: &str) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM preferences WHERE key = ?1;", [key])?;
        Ok(())
    }

    fn delete_prefix(&self, prefix: &str) -> RepoResult<usize> {
        // Compared with substr rather than LIKE: `_` in prefixes is literal.
        let removed = self.conn.execute(
            "DELETE FROM preferences WHERE substr(key, 1, length(?1)) = ?1;",
            [prefix],
        )?;
        Ok(removed)
    }
}

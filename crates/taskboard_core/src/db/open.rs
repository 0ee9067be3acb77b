//! Connection bootstrap for the preference database.
//!
//! # Invariants
//! - Returned connections have the current preference schema.
//! - Open attempts emit one `prefs_open` start event and one outcome event.

use super::schema::ensure_schema;
use crate::repo::preference_repo::{RepoError, RepoResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens (or creates) a preference file and brings its schema up to date.
pub fn open_db(path: impl AsRef<Path>) -> RepoResult<Connection> {
    open_with("file", || Connection::open(path))
}

/// Opens a throwaway in-memory preference database.
pub fn open_db_in_memory() -> RepoResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

fn open_with(
    mode: &'static str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> RepoResult<Connection> {
    let started_at = Instant::now();
    info!("event=prefs_open module=db status=start mode={mode}");

    let result = connect()
        .map_err(|source| RepoError::Open { mode, source })
        .and_then(|mut conn| {
            conn.busy_timeout(Duration::from_secs(5))?;
            let status = ensure_schema(&mut conn)?;
            Ok((conn, status))
        });

    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok((conn, status)) => {
            info!(
                "event=prefs_open module=db status=ok mode={mode} duration_ms={duration_ms} schema={status:?}"
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=prefs_open module=db status=error mode={mode} duration_ms={duration_ms} error={err}"
            );
            Err(err)
        }
    }
}

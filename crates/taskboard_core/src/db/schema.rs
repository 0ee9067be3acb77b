//! Versioned layout of the preference table.
//!
//! The stored version lives in `PRAGMA user_version`. Each step commits on
//! its own, so a failing step leaves the file at the last good version.

use crate::repo::preference_repo::{RepoError, RepoResult};
use log::{error, info};
use rusqlite::Connection;

/// `(version, sql)` pairs in ascending version order.
const STEPS: &[(u32, &str)] = &[(1, include_str!("sql/0001_preferences.sql"))];

/// Outcome of [`ensure_schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaStatus {
    Current,
    Upgraded { from: u32, to: u32 },
}

/// Highest schema version this build can read and write.
pub fn schema_version() -> u32 {
    STEPS.last().map_or(0, |(version, _)| *version)
}

/// Runs every step newer than the file's stored version.
///
/// # Errors
/// - `SchemaTooNew` when the file was written by a newer build.
/// - `Migration` naming the step that failed.
pub fn ensure_schema(conn: &mut Connection) -> RepoResult<SchemaStatus> {
    let found = stored_version(conn)?;
    let supported = schema_version();
    if found > supported {
        error!(
            "event=prefs_schema module=db status=error error_code=schema_too_new found={found} supported={supported}"
        );
        return Err(RepoError::SchemaTooNew { found, supported });
    }
    if found == supported {
        return Ok(SchemaStatus::Current);
    }

    for &(version, sql) in STEPS.iter().filter(|(version, _)| *version > found) {
        apply_step(conn, version, sql).map_err(|source| {
            error!("event=prefs_schema module=db status=error version={version} error={source}");
            RepoError::Migration { version, source }
        })?;
        info!("event=prefs_schema module=db status=ok version={version}");
    }
    Ok(SchemaStatus::Upgraded {
        from: found,
        to: supported,
    })
}

fn apply_step(conn: &mut Connection, version: u32, sql: &str) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(sql)?;
    tx.pragma_update(None, "user_version", version)?;
    tx.commit()
}

fn stored_version(conn: &Connection) -> RepoResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    Ok(version)
}

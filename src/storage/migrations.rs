//! Database migrations for rollcall.
//!
//! Each migration is a function that upgrades the schema by one version.
//! Migrations are run automatically when the database is opened.

use rusqlite::Connection;

use crate::error::RollcallError;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, RollcallError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| {
            RollcallError::StorageUnavailable(format!("Failed to get schema version: {e}"))
        })
}

fn set_version(conn: &Connection, version: i32) -> Result<(), RollcallError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| {
            RollcallError::StorageUnavailable(format!("Failed to set schema version: {e}"))
        })
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), RollcallError> {
    let current = get_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    for version in (current + 1)..=CURRENT_VERSION {
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

fn run_migration(conn: &Connection, version: i32) -> Result<(), RollcallError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(RollcallError::StorageUnavailable(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: the `members` presence table, one row per (chat, user).
fn migrate_v1(conn: &Connection) -> Result<(), RollcallError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS members (
            chat_id    INTEGER NOT NULL,
            user_id    INTEGER NOT NULL,
            username   TEXT NOT NULL DEFAULT '',
            first_name TEXT NOT NULL DEFAULT '',
            last_name  TEXT NOT NULL DEFAULT '',
            is_bot     INTEGER NOT NULL DEFAULT 0,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            last_seen  INTEGER,
            PRIMARY KEY (chat_id, user_id)
        );
        ",
    )
    .map_err(|e| RollcallError::StorageUnavailable(format!("Migration v1 failed: {e}")))
}

//! Presence store.
//!
//! Persists one record per (chat, user) in the `members` table. Every write
//! overwrites the whole record: the last upsert applied wins, whatever
//! `seen_at` it carried.

use chrono::Utc;
use rusqlite::{params, Row};
use tracing::warn;

use super::record::{sort_canonical, Participant, PresenceRecord};
use crate::error::RollcallError;
use crate::storage::Database;

/// Result of a degraded snapshot read.
///
/// When storage fails, `records` is empty and `unavailable` holds the error.
#[derive(Debug)]
pub struct Snapshot {
    pub records: Vec<PresenceRecord>,
    pub unavailable: Option<RollcallError>,
}

impl Snapshot {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Record count for one tracked chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ChatSummary {
    pub chat_id: i64,
    pub members: i64,
}

/// Storage for presence records.
pub struct PresenceStore {
    db: Database,
}

impl PresenceStore {
    /// Open the store at the default database location.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn new() -> Result<Self, RollcallError> {
        let db = Database::open()?;
        Ok(Self { db })
    }

    /// Create a store over an existing database.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Underlying database handle.
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.db
    }

    /// Close the store and its database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database fails to close.
    pub fn close(self) -> Result<(), RollcallError> {
        self.db.close()
    }

    /// Insert or overwrite the record for `(chat_id, user.user_id)`.
    ///
    /// `seen_at` defaults to the current time. A `None` user is a no-op and
    /// returns `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` if the write fails.
    pub fn upsert(
        &self,
        chat_id: i64,
        user: Option<&Participant>,
        seen_at: Option<i64>,
    ) -> Result<bool, RollcallError> {
        let Some(user) = user else {
            return Ok(false);
        };
        let seen_at = seen_at.unwrap_or_else(|| Utc::now().timestamp());
        let attrs = &user.attrs;

        self.db.with_connection(|conn| {
            conn.execute(
                r"INSERT INTO members
                  (chat_id, user_id, username, first_name, last_name, is_bot, is_deleted, last_seen)
                  VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                  ON CONFLICT(chat_id, user_id) DO UPDATE SET
                    username = excluded.username,
                    first_name = excluded.first_name,
                    last_name = excluded.last_name,
                    is_bot = excluded.is_bot,
                    is_deleted = excluded.is_deleted,
                    last_seen = excluded.last_seen",
                params![
                    chat_id,
                    user.user_id,
                    attrs.username,
                    attrs.first_name,
                    attrs.last_name,
                    attrs.is_bot,
                    attrs.is_deleted,
                    seen_at,
                ],
            )
            .map_err(|e| {
                RollcallError::StorageUnavailable(format!(
                    "Failed to upsert user {} in chat {chat_id}: {e}",
                    user.user_id
                ))
            })?;
            Ok(true)
        })
    }

    /// All records for a chat, in canonical order.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` if the read fails.
    pub fn try_snapshot(&self, chat_id: i64) -> Result<Vec<PresenceRecord>, RollcallError> {
        let mut records = self.db.with_connection(|conn| {
            let mut stmt = conn
                .prepare(
                    r"SELECT chat_id, user_id, username, first_name, last_name,
                             is_bot, is_deleted, last_seen
                      FROM members WHERE chat_id = ?1",
                )
                .map_err(|e| {
                    RollcallError::StorageUnavailable(format!("Failed to prepare query: {e}"))
                })?;

            let rows = stmt
                .query_map([chat_id], row_to_record)
                .map_err(|e| {
                    RollcallError::StorageUnavailable(format!(
                        "Failed to query chat {chat_id}: {e}"
                    ))
                })?;

            let mut records = Vec::new();
            for row in rows {
                records.push(row?);
            }
            Ok(records)
        })?;

        sort_canonical(&mut records);
        Ok(records)
    }

    /// All records for a chat, degrading to an empty list on storage failure.
    ///
    /// The failure is logged here and handed back in [`Snapshot::unavailable`].
    #[must_use]
    pub fn snapshot(&self, chat_id: i64) -> Snapshot {
        match self.try_snapshot(chat_id) {
            Ok(records) => Snapshot {
                records,
                unavailable: None,
            },
            Err(e) => {
                warn!(chat_id, error = %e, "snapshot read failed");
                Snapshot {
                    records: Vec::new(),
                    unavailable: Some(e),
                }
            }
        }
    }

    /// Every chat with at least one record, ordered by chat id.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` if the read fails.
    pub fn chats(&self) -> Result<Vec<ChatSummary>, RollcallError> {
        self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT chat_id, COUNT(*) FROM members GROUP BY chat_id ORDER BY chat_id",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(ChatSummary {
                    chat_id: row.get(0)?,
                    members: row.get(1)?,
                })
            })?;

            let mut chats = Vec::new();
            for row in rows {
                chats.push(row?);
            }
            Ok(chats)
        })
    }
}

fn row_to_record(row: &Row<'_>) -> Result<PresenceRecord, rusqlite::Error> {
    Ok(PresenceRecord {
        chat_id: row.get(0)?,
        user_id: row.get(1)?,
        username: row.get(2)?,
        first_name: row.get(3)?,
        last_name: row.get(4)?,
        is_bot: row.get(5)?,
        is_deleted: row.get(6)?,
        last_seen: row.get(7)?,
    })
}

//! Command implementations for rollcall.
//!
//! This module contains the implementation of all CLI commands.

mod check;
mod export;
mod record;

pub use check::{check, NO_MEMBER_DATA};
pub use export::{export, NO_EXPORT_DATA};
pub use record::{ingest, ingest_reader, record, IngestSummary};

use std::path::Path;
use std::time::Duration;

use colored::Colorize;
use serde_json::json;

use crate::cli::args::OutputFormat;
use crate::error::RollcallError;
use crate::output::{format_chats, to_json};
use crate::presence::{AdminGate, PresenceStore};

/// Reject `requester` unless it administers `chat_id`.
///
/// A missing requester means the caller already authorized the request.
fn authorize(
    gate: &impl AdminGate,
    chat_id: i64,
    requester: Option<i64>,
    denial: &str,
) -> Result<(), RollcallError> {
    match requester {
        Some(user_id) if !gate.is_admin(chat_id, user_id) => {
            Err(RollcallError::PermissionDenied(denial.to_string()))
        }
        _ => Ok(()),
    }
}

/// Execute chats command
///
/// # Errors
///
/// Returns an error if the store cannot be read or output formatting fails.
pub fn chats(store: &PresenceStore, format: OutputFormat) -> Result<String, RollcallError> {
    let chats = store.chats()?;
    format_chats(&chats, format)
}

/// `{h}h {m}m {s}s`
#[must_use]
pub fn uptime_text(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    let (m, s) = (secs / 60, secs % 60);
    let (h, m) = (m / 60, m % 60);
    format!("{h}h {m}m {s}s")
}

/// Execute status command
///
/// # Errors
///
/// Returns an error if the store cannot be read or output formatting fails.
pub fn status(
    store: &PresenceStore,
    db_path: &Path,
    uptime: Duration,
    format: OutputFormat,
) -> Result<String, RollcallError> {
    let schema_version = store.database().schema_version()?;
    let chats = store.chats()?;
    let records: i64 = chats.iter().map(|c| c.members).sum();

    match format {
        OutputFormat::Json => to_json(&json!({
            "database": db_path.display().to_string(),
            "schema_version": schema_version,
            "chats": chats.len(),
            "records": records,
            "uptime": uptime_text(uptime),
        })),
        OutputFormat::Pretty => Ok(format!(
            "{} uptime {}\n  {}: {}\n  {}: {}\n  {}: {}\n  {}: {}",
            "PONG".green().bold(),
            uptime_text(uptime),
            "Database".dimmed(),
            db_path.display(),
            "Schema".dimmed(),
            schema_version,
            "Chats".dimmed(),
            chats.len(),
            "Records".dimmed(),
            records
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presence::{MockAdminGate, Participant, UserAttrs};
    use crate::storage::Database;

    #[test]
    fn test_uptime_text() {
        assert_eq!(uptime_text(Duration::from_secs(0)), "0h 0m 0s");
        assert_eq!(uptime_text(Duration::from_secs(3_723)), "1h 2m 3s");
        assert_eq!(uptime_text(Duration::from_secs(90_061)), "25h 1m 1s");
    }

    #[test]
    fn test_authorize_skips_gate_without_requester() {
        let gate = MockAdminGate::new();
        assert!(authorize(&gate, -100, None, "no").is_ok());
    }

    #[test]
    fn test_authorize_denial_message() {
        let mut gate = MockAdminGate::new();
        gate.expect_is_admin().return_const(false);

        let err = authorize(&gate, -100, Some(1), "Only admins can use this command.").unwrap_err();
        assert_eq!(err.to_string(), "Only admins can use this command.");
    }

    #[test]
    fn test_status_json() {
        let store = PresenceStore::with_database(Database::open_in_memory().unwrap());
        store
            .upsert(-100, Some(&Participant::new(1, UserAttrs::default())), Some(1))
            .unwrap();

        let output = status(
            &store,
            Path::new(":memory:"),
            Duration::from_secs(61),
            OutputFormat::Json,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["chats"], 1);
        assert_eq!(value["records"], 1);
        assert_eq!(value["uptime"], "0h 1m 1s");
        assert!(value["schema_version"].as_i64().unwrap() > 0);
    }
}

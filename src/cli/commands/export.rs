//! CSV export command.

use std::path::Path;

use chrono::Utc;
use colored::Colorize;
use tracing::info;

use super::authorize;
use crate::cli::args::OutputFormat;
use crate::error::RollcallError;
use crate::output::format_export_json;
use crate::presence::{AdminGate, PresenceStore};
use crate::report::{export_file_name, export_rows, to_csv};

/// Message shown when a chat has nothing to export.
pub const NO_EXPORT_DATA: &str = "No data available to export.";

/// Execute the export command.
///
/// Pretty output writes `members_{chat}_{unix}.csv` into `dir`; JSON output
/// prints the rows instead of writing a file.
///
/// # Errors
///
/// Returns `PermissionDenied` for a non-admin requester, or `Io` if the file
/// cannot be written.
pub fn export(
    store: &PresenceStore,
    gate: &impl AdminGate,
    chat_id: i64,
    requester: Option<i64>,
    dir: &Path,
    format: OutputFormat,
) -> Result<String, RollcallError> {
    authorize(gate, chat_id, requester, "Only admins can export data.")?;

    let snapshot = store.snapshot(chat_id);
    let file_name = export_file_name(chat_id, Utc::now().timestamp());
    let rows = export_rows(&snapshot.records);

    if format == OutputFormat::Json {
        return format_export_json(chat_id, &file_name, &rows);
    }

    if rows.is_empty() {
        return Ok(NO_EXPORT_DATA.to_string());
    }

    std::fs::create_dir_all(dir)?;
    let path = dir.join(&file_name);
    std::fs::write(&path, to_csv(&rows))?;
    info!(chat_id, rows = rows.len(), path = %path.display(), "export written");

    Ok(format!(
        "{} {} member(s) to {}",
        "Exported".green(),
        rows.len(),
        path.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presence::{ConfigAdminGate, Participant, UserAttrs};
    use crate::storage::Database;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn create_test_store() -> PresenceStore {
        PresenceStore::with_database(Database::open_in_memory().unwrap())
    }

    #[test]
    fn test_export_writes_csv() {
        let store = create_test_store();
        let temp_dir = TempDir::new().unwrap();
        store
            .upsert(
                -100,
                Some(&Participant::new(
                    5,
                    UserAttrs {
                        username: "ada".into(),
                        ..UserAttrs::default()
                    },
                )),
                Some(1_700_000_000),
            )
            .unwrap();

        let gate = ConfigAdminGate::default();
        let output =
            export(&store, &gate, -100, None, temp_dir.path(), OutputFormat::Pretty).unwrap();
        assert!(output.contains("1 member(s)"));

        let entries: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].starts_with("members_-100_"));
        assert!(entries[0].ends_with(".csv"));

        let contents = std::fs::read_to_string(temp_dir.path().join(&entries[0])).unwrap();
        assert!(contents.starts_with("user_id,username,"));
        assert!(contents.contains("5,ada,,,0,0,2023-11-14T22:13:20"));
    }

    #[test]
    fn test_export_empty_chat_writes_nothing() {
        let store = create_test_store();
        let temp_dir = TempDir::new().unwrap();
        let out_dir = temp_dir.path().join("exports");

        let output = export(
            &store,
            &ConfigAdminGate::default(),
            -100,
            None,
            &out_dir,
            OutputFormat::Pretty,
        )
        .unwrap();

        assert_eq!(output, NO_EXPORT_DATA);
        assert!(!out_dir.exists());
    }

    #[test]
    fn test_export_requires_admin_when_requester_given() {
        let store = create_test_store();
        let temp_dir = TempDir::new().unwrap();
        let gate = ConfigAdminGate::new(HashMap::from([(-100, vec![1])]));

        let denied = export(&store, &gate, -100, Some(2), temp_dir.path(), OutputFormat::Json);
        assert!(matches!(denied, Err(RollcallError::PermissionDenied(_))));

        let allowed = export(&store, &gate, -100, Some(1), temp_dir.path(), OutputFormat::Json);
        assert!(allowed.is_ok());
    }
}

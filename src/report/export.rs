//! Tabular export of a chat snapshot.
//!
//! Produces fixed-column rows and CSV text; writing and sending the file is
//! up to the caller.

use chrono::DateTime;
use serde::Serialize;

use crate::presence::{sort_canonical, PresenceRecord};

/// Column names, in order.
pub const EXPORT_HEADER: [&str; 7] = [
    "user_id",
    "username",
    "first_name",
    "last_name",
    "is_bot",
    "is_deleted",
    "last_seen_iso",
];

/// One exported member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub user_id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_bot: u8,
    pub is_deleted: u8,
    /// UTC, `YYYY-MM-DDTHH:MM:SS`; empty when never seen.
    pub last_seen_iso: String,
}

impl ExportRow {
    fn fields(&self) -> [String; 7] {
        [
            self.user_id.to_string(),
            self.username.clone(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.is_bot.to_string(),
            self.is_deleted.to_string(),
            self.last_seen_iso.clone(),
        ]
    }
}

impl From<&PresenceRecord> for ExportRow {
    fn from(record: &PresenceRecord) -> Self {
        Self {
            user_id: record.user_id,
            username: record.username.clone(),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            is_bot: u8::from(record.is_bot),
            is_deleted: u8::from(record.is_deleted),
            last_seen_iso: record.last_seen.map(iso_utc).unwrap_or_default(),
        }
    }
}

/// Epoch seconds as a UTC ISO-8601 timestamp.
///
/// Values outside chrono's range fall back to the raw number.
#[must_use]
pub fn iso_utc(epoch_secs: i64) -> String {
    DateTime::from_timestamp(epoch_secs, 0).map_or_else(
        || epoch_secs.to_string(),
        |dt| dt.naive_utc().format("%Y-%m-%dT%H:%M:%S").to_string(),
    )
}

/// One row per record, in canonical order.
#[must_use]
pub fn export_rows(snapshot: &[PresenceRecord]) -> Vec<ExportRow> {
    let mut records = snapshot.to_vec();
    sort_canonical(&mut records);
    records.iter().map(ExportRow::from).collect()
}

/// Suggested artifact name: `members_{chat_id}_{unix_timestamp}.csv`.
#[must_use]
pub fn export_file_name(chat_id: i64, unix_timestamp: i64) -> String {
    format!("members_{chat_id}_{unix_timestamp}.csv")
}

/// CSV text with header row, CRLF line endings, quoting where needed.
#[must_use]
pub fn to_csv(rows: &[ExportRow]) -> String {
    let mut out = csv_line(EXPORT_HEADER.iter().copied());
    for row in rows {
        let fields = row.fields();
        out.push_str(&csv_line(fields.iter().map(String::as_str)));
    }
    out
}

fn csv_line<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    let mut line = fields.map(csv_field).collect::<Vec<_>>().join(",");
    line.push_str("\r\n");
    line
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

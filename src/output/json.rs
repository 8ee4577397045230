//! JSON output formatting for rollcall.

use serde::Serialize;
use serde_json::json;

use crate::error::RollcallError;
use crate::presence::ChatSummary;
use crate::report::{preset_label, ExportRow, Report};

/// Format a check report as JSON, including the plain text rendering
///
/// # Errors
///
/// Returns `RollcallError::Json` if serialization fails.
pub fn format_report_json(chat_id: i64, report: &Report) -> Result<String, RollcallError> {
    let output = json!({
        "chat_id": chat_id,
        "report": report,
        "text": report.text(),
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the threshold chooser as JSON
///
/// # Errors
///
/// Returns `RollcallError::Json` if serialization fails.
pub fn format_threshold_menu_json(chat_id: i64, presets: &[i64]) -> Result<String, RollcallError> {
    let choices: Vec<_> = presets
        .iter()
        .map(|m| json!({ "label": preset_label(*m), "minutes": m }))
        .collect();
    let output = json!({
        "chat_id": chat_id,
        "choices": choices,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format export rows as JSON
///
/// # Errors
///
/// Returns `RollcallError::Json` if serialization fails.
pub fn format_export_json(
    chat_id: i64,
    file_name: &str,
    rows: &[ExportRow],
) -> Result<String, RollcallError> {
    let output = json!({
        "chat_id": chat_id,
        "file_name": file_name,
        "count": rows.len(),
        "rows": rows,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format tracked chats as JSON
///
/// # Errors
///
/// Returns `RollcallError::Json` if serialization fails.
pub fn format_chats_json(chats: &[ChatSummary]) -> Result<String, RollcallError> {
    let output = json!({
        "count": chats.len(),
        "items": chats,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `RollcallError::Json` if serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, RollcallError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presence::sample_record;
    use crate::report::{classify, export_rows, render};

    #[test]
    fn test_format_report_json() {
        let report = render(60, classify(&[sample_record(1, Some(100))], 60, 100));
        let output = format_report_json(-100, &report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["chat_id"], -100);
        assert_eq!(value["report"]["threshold_label"], "1 Hour(s)");
        assert_eq!(value["report"]["counts"]["online"], 1);
        assert_eq!(value["report"]["sections"][0]["bucket"], "online");
        assert_eq!(value["report"]["buckets"]["online"][0]["user_id"], 1);
        assert!(value["text"].as_str().unwrap().contains("Online-ish: 1"));
    }

    #[test]
    fn test_format_threshold_menu_json() {
        let output = format_threshold_menu_json(-100, &[30, 2880]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["choices"][0]["label"], "30 Min");
        assert_eq!(value["choices"][1]["label"], "2 Day");
        assert_eq!(value["choices"][1]["minutes"], 2880);
    }

    #[test]
    fn test_format_export_json() {
        let rows = export_rows(&[sample_record(1, None), sample_record(2, Some(0))]);
        let output = format_export_json(-100, "members_-100_5.csv", &rows).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["count"], 2);
        assert_eq!(value["rows"][0]["user_id"], 2);
        assert_eq!(value["rows"][0]["last_seen_iso"], "1970-01-01T00:00:00");
        assert_eq!(value["rows"][1]["last_seen_iso"], "");
    }

    #[test]
    fn test_format_chats_json() {
        let output = format_chats_json(&[ChatSummary { chat_id: -1, members: 4 }]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["count"], 1);
        assert_eq!(value["items"][0]["members"], 4);
    }
}

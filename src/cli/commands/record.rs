//! Event recording commands: `record` and `ingest`.

use std::io::BufRead;

use colored::Colorize;
use serde::Serialize;
use tracing::warn;

use crate::cli::args::{OutputFormat, RecordCommands};
use crate::error::RollcallError;
use crate::output::to_json;
use crate::presence::{
    apply_event, ActivityEvent, JoinEvent, LeaveEvent, PresenceEvent, PresenceStore,
};

/// Outcome of applying an event stream.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    /// Events parsed and applied.
    pub events: usize,
    /// Records written.
    pub records: usize,
    /// Lines that were not valid events.
    pub skipped: usize,
    /// Events whose write failed.
    pub failed: usize,
}

/// Execute a `record` subcommand.
///
/// # Errors
///
/// Returns `StorageUnavailable` if the write fails.
pub fn record(
    store: &PresenceStore,
    cmd: RecordCommands,
    format: OutputFormat,
) -> Result<String, RollcallError> {
    let event = match cmd {
        RecordCommands::Activity(args) => PresenceEvent::Activity(ActivityEvent {
            chat_id: args.chat_id,
            user: Some(args.participant()),
            timestamp: args.at,
        }),
        RecordCommands::Join(args) => PresenceEvent::Join(JoinEvent {
            chat_id: args.chat_id,
            users: vec![args.participant()],
            timestamp: args.at,
        }),
        RecordCommands::Leave(args) => PresenceEvent::Leave(LeaveEvent {
            chat_id: args.chat_id,
            user: Some(args.participant()),
            timestamp: args.at,
        }),
    };

    let written = apply_event(store, &event)?;

    match format {
        OutputFormat::Json => to_json(&serde_json::json!({
            "event": event,
            "records": written,
        })),
        OutputFormat::Pretty => Ok(format!(
            "{} {written} record(s) in chat {}",
            "Recorded".green(),
            event.chat_id()
        )),
    }
}

/// Apply every JSON Lines event from `reader`.
///
/// Bad lines and failed writes are logged and counted; reading stops only if
/// the reader itself fails.
///
/// # Errors
///
/// Returns `Io` if reading a line fails.
pub fn ingest_reader(
    store: &PresenceStore,
    reader: impl BufRead,
) -> Result<IngestSummary, RollcallError> {
    let mut summary = IngestSummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let event: PresenceEvent = match serde_json::from_str(line) {
            Ok(event) => event,
            Err(e) => {
                warn!(line = index + 1, error = %e, "skipping malformed event");
                summary.skipped += 1;
                continue;
            }
        };

        match apply_event(store, &event) {
            Ok(written) => {
                summary.events += 1;
                summary.records += written;
            }
            Err(e) => {
                warn!(
                    line = index + 1,
                    chat_id = event.chat_id(),
                    error = %e,
                    "event not recorded"
                );
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

/// Execute the `ingest` command.
///
/// # Errors
///
/// Returns `Io` if the input cannot be read.
pub fn ingest(
    store: &PresenceStore,
    file: Option<&std::path::Path>,
    format: OutputFormat,
) -> Result<String, RollcallError> {
    let summary = match file {
        Some(path) if path.as_os_str() != "-" => {
            let file = std::fs::File::open(path)?;
            ingest_reader(store, std::io::BufReader::new(file))?
        }
        _ => ingest_reader(store, std::io::stdin().lock())?,
    };

    match format {
        OutputFormat::Json => to_json(&summary),
        OutputFormat::Pretty => {
            let mut output = format!(
                "{} {} event(s), {} record(s) written",
                "Applied".green(),
                summary.events,
                summary.records
            );
            if summary.skipped > 0 {
                output.push_str(&format!(
                    "\n{} {} malformed line(s)",
                    "Skipped".yellow(),
                    summary.skipped
                ));
            }
            if summary.failed > 0 {
                output.push_str(&format!("\n{} {} event(s)", "Failed".red(), summary.failed));
            }
            Ok(output)
        }
    }
}

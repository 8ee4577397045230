//! Output formatting for rollcall.
//!
//! This module provides formatters for displaying reports, exports, and chat
//! listings in various formats.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::RollcallError;
use crate::presence::ChatSummary;
use crate::report::Report;

pub use json::*;
pub use pretty::*;

/// Format a check report based on output format
///
/// # Errors
///
/// Returns `RollcallError::Json` if JSON serialization fails.
pub fn format_report(
    chat_id: i64,
    report: &Report,
    format: OutputFormat,
) -> Result<String, RollcallError> {
    match format {
        OutputFormat::Pretty => Ok(format_report_pretty(report)),
        OutputFormat::Json => format_report_json(chat_id, report),
    }
}

/// Format the threshold chooser based on output format
///
/// # Errors
///
/// Returns `RollcallError::Json` if JSON serialization fails.
pub fn format_threshold_menu(
    chat_id: i64,
    presets: &[i64],
    format: OutputFormat,
) -> Result<String, RollcallError> {
    match format {
        OutputFormat::Pretty => Ok(format_threshold_menu_pretty(chat_id, presets)),
        OutputFormat::Json => format_threshold_menu_json(chat_id, presets),
    }
}

/// Format tracked chats based on output format
///
/// # Errors
///
/// Returns `RollcallError::Json` if JSON serialization fails.
pub fn format_chats(chats: &[ChatSummary], format: OutputFormat) -> Result<String, RollcallError> {
    match format {
        OutputFormat::Pretty => Ok(format_chats_pretty(chats)),
        OutputFormat::Json => format_chats_json(chats),
    }
}

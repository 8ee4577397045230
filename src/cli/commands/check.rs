//! Check report command.

use chrono::Utc;
use tracing::info;

use super::authorize;
use crate::cli::args::{CheckArgs, OutputFormat};
use crate::config::ReportConfig;
use crate::error::RollcallError;
use crate::output::{format_report, format_threshold_menu};
use crate::presence::{AdminGate, PresenceStore};
use crate::report::{classify, render_with_limit, ThresholdParser};

/// Message shown when a chat has no records yet.
pub const NO_MEMBER_DATA: &str = "No member data yet.";

/// Execute the check command.
///
/// With no threshold token, returns the threshold chooser unless `--no-menu`
/// asks for the configured default.
///
/// # Errors
///
/// Returns `PermissionDenied` if `--as` names a non-admin, or a JSON error if
/// formatting fails. Storage failures degrade to the empty-chat answer.
pub fn check(
    store: &PresenceStore,
    gate: &impl AdminGate,
    settings: &ReportConfig,
    args: &CheckArgs,
    format: OutputFormat,
) -> Result<String, RollcallError> {
    authorize(gate, args.chat_id, args.requester, "Only admins can use this command.")?;

    if args.threshold.is_none() && !args.no_menu {
        return format_threshold_menu(args.chat_id, &settings.presets, format);
    }

    let parser = ThresholdParser::new(settings.default_threshold_minutes);
    let threshold_minutes = parser.parse(args.threshold.as_deref());
    info!(
        chat_id = args.chat_id,
        requester = ?args.requester,
        threshold_minutes,
        "check requested"
    );

    let snapshot = store.snapshot(args.chat_id);
    if snapshot.is_empty() && format == OutputFormat::Pretty {
        return Ok(NO_MEMBER_DATA.to_string());
    }

    let buckets = classify(&snapshot.records, threshold_minutes, Utc::now().timestamp());
    let report = render_with_limit(threshold_minutes, buckets, settings.list_limit);
    format_report(args.chat_id, &report, format)
}

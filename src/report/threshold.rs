//! Threshold token parsing.
//!
//! Tokens are either a minute count (`45`) or a day count with a `d` suffix
//! (`2d`, `2D`). Anything unparseable falls back to 30 minutes.

/// Threshold used when a token cannot be parsed.
pub const FALLBACK_THRESHOLD_MINUTES: i64 = 30;

const MINUTES_PER_DAY: i64 = 1440;

/// Converts threshold tokens into minute counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdParser {
    default_minutes: i64,
}

impl Default for ThresholdParser {
    fn default() -> Self {
        Self::new(FALLBACK_THRESHOLD_MINUTES)
    }
}

impl ThresholdParser {
    /// Parser returning `default_minutes` when no token is given.
    #[must_use]
    pub const fn new(default_minutes: i64) -> Self {
        Self { default_minutes }
    }

    /// Resolve an optional token to minutes. Never fails.
    #[must_use]
    pub fn parse(&self, token: Option<&str>) -> i64 {
        token.map_or(self.default_minutes, parse_threshold)
    }
}

/// Parse a single threshold token into minutes.
#[must_use]
pub fn parse_threshold(token: &str) -> i64 {
    parse_strict(token).unwrap_or(FALLBACK_THRESHOLD_MINUTES)
}

/// Chooser label for a preset: `30 Min`, `1 Day`.
#[must_use]
pub fn preset_label(minutes: i64) -> String {
    if minutes >= MINUTES_PER_DAY && minutes % MINUTES_PER_DAY == 0 {
        format!("{} Day", minutes / MINUTES_PER_DAY)
    } else {
        format!("{minutes} Min")
    }
}

fn parse_strict(token: &str) -> Option<i64> {
    let token = token.trim();

    match token.strip_suffix(['d', 'D']) {
        Some(days) => days.parse::<i64>().ok()?.checked_mul(MINUTES_PER_DAY),
        None => token.parse::<i64>().ok(),
    }
}

//! Membership reports and exports.
//!
//! - `threshold`: turns `/check`-style tokens into minute counts
//! - `engine`: recency classification and report rendering
//! - `export`: fixed-column rows and CSV

mod engine;
mod export;
mod threshold;

pub use engine::{
    bucket_for, classify, format_entry, format_threshold, render, render_with_limit, Bucket,
    Buckets, Counts, Report, Section, DEFAULT_LIST_LIMIT,
};
pub use export::{export_file_name, export_rows, iso_utc, to_csv, ExportRow, EXPORT_HEADER};
pub use threshold::{parse_threshold, preset_label, ThresholdParser, FALLBACK_THRESHOLD_MINUTES};

//! rollcall - last-seen presence tracking for chat groups
//!
//! This crate keeps a per-chat record of when each member was last seen
//! (from activity, joins, and leaves) and classifies the membership into
//! recency buckets for reports and CSV exports.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod presence;
pub mod report;
pub mod storage;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::RollcallError;
pub use presence::{PresenceRecord, PresenceStore};

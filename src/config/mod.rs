//! Configuration management for rollcall.
//!
//! This module handles loading configuration from `~/.rollcall/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{Config, GeneralConfig, LoggingConfig, ReportConfig};

//! Tracing subscriber setup.
//!
//! Logs go to stderr so report and export output on stdout stays clean.
//! `RUST_LOG` takes precedence over the configured level.

use tracing_subscriber::EnvFilter;

/// Filter used when `--verbose` is passed.
pub const VERBOSE_LEVEL: &str = "debug";

/// Build the filter: `RUST_LOG` if set, else `fallback`.
#[must_use]
pub fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber. A second call is ignored.
pub fn init(fallback: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(fallback))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

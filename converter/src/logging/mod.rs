//! Log output set-up for the command-line tool.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LogLevel;

/// Filter for `level`, unless `RUST_LOG` is set.
pub fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_directive()))
}

/// Install the global subscriber, writing compact lines to stderr.
///
/// Does nothing if a subscriber is already installed.
pub fn init(level: LogLevel) {
    let _ = fmt()
        .with_env_filter(env_filter(level))
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}

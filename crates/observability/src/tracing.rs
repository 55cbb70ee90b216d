//! Tracing/logging initialization.
//!
//! Logs go to stderr as JSON lines so they never mix with the menu on stdout.

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the process, falling back to `default_filter`
/// when `RUST_LOG` is unset or invalid.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}

//! Diagnostics for fanlog itself.
//!
//! The library reports rotations, registered files and config loading
//! through `tracing`. These diagnostics go to stderr and are separate from
//! the lines a [`crate::Logger`] writes to its destinations.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize diagnostics at WARN unless RUST_LOG says otherwise
pub fn init() {
    init_with_level("warn")
}

/// Initialize diagnostics with a specific default level
///
/// # Arguments
/// * `default_level` - Default level (trace, debug, info, warn, error)
///
/// This can still be overridden by RUST_LOG environment variable.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init();
}

/// Initialize logging for testing (captures logs for test output)
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}

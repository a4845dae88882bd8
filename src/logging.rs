//! Logging initialization for the dashboard CLI.
//!
//! Configures the `tracing` subscriber with level filtering via the
//! `MDASH_LOG` environment variable. Falls back to `info` level when the
//! variable is unset.
//!
//! # Usage
//!
//! ```bash
//! # Default (info level)
//! mdash list
//!
//! # Debug level
//! MDASH_LOG=debug mdash list
//!
//! # Module-specific filtering
//! MDASH_LOG=module_dashboard=debug,warn mdash list
//! ```

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// Reads the `MDASH_LOG` environment variable for filter directives and
/// falls back to `info` when it is unset or invalid. Output goes to stderr,
/// keeping stdout free for command output.
///
/// Not called for the TUI: log lines on the terminal would fight the
/// alternate screen.
///
/// # Panics
///
/// Panics if a global subscriber has already been set (should only be
/// called once, at startup).
pub fn init() {
    let filter = EnvFilter::try_from_env("MDASH_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

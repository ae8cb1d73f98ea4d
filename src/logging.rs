//! Log output for the CLI.
//!
//! The library logs through `tracing` macros only. The binary installs a
//! subscriber with [`init`] so logs go to stderr and stdout stays free for
//! extracted keys and reports.

use std::io::IsTerminal;

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Log an `info!` event prefixed with a green success mark.
macro_rules! success {
    ($($arg:tt)+) => {
        ::tracing::info!(
            "{} {}",
            ::colored::Colorize::green($crate::logging::SUCCESS_MARK),
            format!($($arg)+)
        )
    };
}

/// Install the stderr subscriber.
///
/// `RUST_LOG` takes precedence; otherwise the level is `info`, or `debug`
/// when `verbose` is set.
pub fn init(verbose: bool) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if verbose => EnvFilter::new("debug"),
        Err(_) => EnvFilter::new("info"),
    };
    let ansi = std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(ansi)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}

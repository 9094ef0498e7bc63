// SPDX-License-Identifier: PMPL-1.0-or-later

//! `tracing` subscriber setup for the command-line tool.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "PLANNING_I18N_LOG";

/// Install a stderr formatter. `PLANNING_I18N_LOG` wins over `verbose`.
/// Calling this twice is harmless; the second subscriber is discarded.
pub fn init(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

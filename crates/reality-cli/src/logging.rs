//! Tracing subscriber setup.
//!
//! Events go to stderr so that stdout carries only command output.

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

/// Selects JSON log lines when set to `json`
pub const LOG_FORMAT_ENV: &str = "REALITYCTL_LOG_FORMAT";

static TRACING: OnceLock<()> = OnceLock::new();

/// Default filter for the given verbosity.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Initialize tracing once, safe to call multiple times.
///
/// `RUST_LOG` takes precedence over the verbosity flag.
pub fn init_once(verbose: bool) {
    TRACING.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));
        let fmt_json = std::env::var(LOG_FORMAT_ENV)
            .ok()
            .is_some_and(|v| v.eq_ignore_ascii_case("json"));
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true);
        // A subscriber installed earlier (e.g. by a test harness) stays in place
        if fmt_json {
            builder.json().try_init().ok();
        } else {
            builder.compact().try_init().ok();
        }
        tracing::debug!(json = fmt_json, "tracing initialized");
    });
}

//! Diagnostic logging setup

use tracing_subscriber::EnvFilter;

use crate::infrastructure::telemetry::TELEMETRY_TARGET;

/// Filter used when `RUST_LOG` is unset. Telemetry records stay visible at info.
pub fn default_filter() -> String {
    format!("warn,{}=info", TELEMETRY_TARGET)
}

/// Install the global subscriber. Logs go to stderr so stdout carries only the analysis.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter()));

    // A second init (e.g. in tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

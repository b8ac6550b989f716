//! Tracing subscriber setup for the command-line front end.

use tracing_subscriber::EnvFilter;

/// Builds the log filter: `RUST_LOG` when set, otherwise `level` for this crate.
pub fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("solar_budget={level}")))
}

/// Installs a formatting subscriber writing to stderr.
///
/// Stdout stays reserved for simulation output. Calling this more than once
/// is harmless; later calls leave the first subscriber in place.
pub fn init(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

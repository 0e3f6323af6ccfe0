//! Logging init for the `purl` binary: stderr, filtered by `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor the config's `log` key is set.
pub const DEFAULT_FILTER: &str = "warn";

/// Pick the filter directive: `RUST_LOG`, then the config value, then
/// [`DEFAULT_FILTER`]. Invalid directives fall through to the next source.
pub fn env_filter(config_filter: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config_filter.unwrap_or(DEFAULT_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a stderr subscriber. Stdout stays reserved for results.
///
/// Only the first call installs a subscriber; later calls leave it in place
/// and log that they were skipped.
pub fn init_logging(config_filter: Option<&str>) {
    let filter = env_filter(config_filter);
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if let Err(e) = installed {
        tracing::debug!(error = %e, "logging already initialized");
    }
}

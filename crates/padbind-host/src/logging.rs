//! Structured logging setup shared by frontends and integration tests.

use tracing_subscriber::EnvFilter;

/// Initialises structured logging.  Level is overridden by `RUST_LOG`; the
/// `level` argument is the fallback (typically from the config file).
///
/// Safe to call more than once; later calls are ignored.
pub fn init(level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_owned()));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

//! Tracing bootstrap for embedders that do not bring their own subscriber.

use tracing_subscriber::EnvFilter;

/// Installs a stderr `tracing` subscriber honoring `RUST_LOG`, defaulting to
/// `info`. Does nothing if a global subscriber is already set, so library
/// users and tests can call it freely.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

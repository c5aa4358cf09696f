//! Tracing initialization for tests

use once_cell::sync::Lazy;
use tracing_subscriber::EnvFilter;

static INIT: Lazy<()> = Lazy::new(|| {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
});

/// Installs the test subscriber once per process
///
/// Safe to call from every test; only the first call does anything.
/// Control verbosity with `RUST_LOG`.
pub fn init_test_tracing() {
    Lazy::force(&INIT);
}

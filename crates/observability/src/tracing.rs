//! JSON log output for the session core.
//!
//! The storage and codec layers swallow failures by contract and emit
//! `debug`/`warn` events instead; this module gives those events a sink.

use tracing_subscriber::EnvFilter;

/// Install the process-wide subscriber.
///
/// Filtering defaults to `info` and is overridden by `RUST_LOG`. Calling
/// this more than once is harmless; later calls lose the race and back off,
/// which is what the test suites rely on.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}

//! Logging setup for the binary and for tests.

use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber.
///
/// `RUST_LOG` controls the filter (default `info`), for example
/// `RUST_LOG=debug` or `RUST_LOG=promolex=trace`. `color` toggles ANSI
/// escapes in the output.
pub fn init(color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).with_ansi(color).init();
}

/// Subscriber for tests: verbose, captured per test, safe to call from
/// several tests in one process.
pub fn init_test() {
    let _ = fmt().with_env_filter(EnvFilter::new("debug")).with_test_writer().try_init();
}

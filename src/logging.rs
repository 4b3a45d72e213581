//! Logging setup for the command-line harness.
//!
//! The library only emits `tracing` events; installing a subscriber is up to
//! the embedding program. Logs go to stderr so they never mix with the
//! result tables on stdout.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize console logging.
///
/// Reads the filter from `RUST_LOG` (defaults to `info`, or `debug` for this
/// crate when `verbose` is set). Calling it twice is harmless.
pub fn init_logging(verbose: bool) {
    let default = if verbose {
        "info,sdot_bench=debug"
    } else {
        "info"
    };

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

//! Structured logging setup.
//!
//! Verbosity is controlled by the `RUST_LOG` environment variable; the
//! default shows warnings and errors only. Per-file parse problems are
//! logged at `warn`, pipeline phase counts at `debug`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber. Call once at startup.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Initialize with an explicit filter string; used by tests.
pub fn init_tracing_with_filter(filter: &str) {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::new(filter))
        .try_init();
}

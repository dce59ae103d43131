// src/logging.rs
use std::sync::Once;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Installs the stderr subscriber. Safe to call more than once.
///
/// `RUST_LOG` wins when set; otherwise the crate logs at `warn`, or `debug`
/// with `verbose`.
pub fn init(verbose: bool) {
    INIT.call_once(|| {
        let fallback = if verbose {
            "sourcesleuth_core=debug,sourcesleuth=debug"
        } else {
            "warn"
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true);
        // Another subscriber (a test harness) may already be installed.
        let _ = tracing_subscriber::registry().with(layer).with(filter).try_init();
    });
}

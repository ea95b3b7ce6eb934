//! Logging setup.
//!
//! Diagnostics go to stderr behind an `ACTGUARD_LOG` env filter; stdout is
//! reserved for the report the runner captures.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Filter applied when `ACTGUARD_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "warn";

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("ACTGUARD_LOG")
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    tracing_subscriber::registry().with(layer).init()
}

//! Logging initialization.
//!
//! Logs go to stderr so that stdout only carries command output. The filter
//! is read from `CPF_LOG`, then `RUST_LOG`, and defaults to `warn`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "CPF_LOG";

/// Default filter when no environment variable is set.
const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let layer = fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr);

    // A subscriber may already be installed (e.g. by a test harness).
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}

//! Operator-facing diagnostics on stderr.
//!
//! Crate code logs through `tracing` macros with structured fields. Binaries
//! call [`init`] once at startup; the filter comes from `RUST_LOG` when set,
//! otherwise from the default passed in.
//!
//! ```rust,ignore
//! storycode::logging::init("storycode=info");
//! tracing::info!(seq = 1, "Story request started");
//! ```

use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber. A second call is a no-op.
pub fn init(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();

    if installed.is_ok() {
        tracing::debug!(default_filter, "Logging initialized");
    }
}

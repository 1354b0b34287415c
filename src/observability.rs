//! Logging initialization.

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

static INIT: OnceLock<()> = OnceLock::new();

/// Installs the global tracing subscriber, once.
///
/// Filter comes from `RUST_LOG` with a default of `tamscope=info`. Safe to
/// call repeatedly (later calls are no-ops), and quiet when an embedding
/// application already installed its own subscriber.
pub fn init() {
    INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tamscope=info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init();
    });
}

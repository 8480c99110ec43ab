use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Default filter when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "budget_tracker_core=info";

/// Install a global `tracing` fmt subscriber once per process.
///
/// Honors `RUST_LOG`; falls back to [`DEFAULT_FILTER`]. Safe to call repeatedly,
/// and a no-op if the host already installed its own subscriber.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        if fmt().with_env_filter(filter).try_init().is_ok() {
            tracing::debug!("budget tracker tracing initialized");
        }
    });
}

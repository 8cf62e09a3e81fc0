use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Used when `RUST_LOG` is unset. Keeps HTTP client internals quiet.
const DEFAULT_FILTER: &str = "info,hyper=warn,reqwest=warn";

/// Initialize structured logging for the application.
///
/// This must be called once at startup (in main.rs).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    info!("Logging initialized");
}

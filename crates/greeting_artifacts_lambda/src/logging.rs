use tracing_subscriber::EnvFilter;

pub const COMPONENT: &str = "greeting_handler";

const DEFAULT_FILTER: &str = "info";

/// Installs a JSON-lines subscriber filtered by `RUST_LOG` (default `info`).
pub fn init_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(false)
        .with_target(false)
        .with_ansi(false)
        .try_init()
}

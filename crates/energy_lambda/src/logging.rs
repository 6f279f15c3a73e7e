use tracing_subscriber::EnvFilter;

/// Installs the JSON log formatter used by every function binary.
///
/// CloudWatch stamps each line on ingestion, so the formatter omits its own
/// timestamp. `RUST_LOG` overrides the default `info` level.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(false)
        .with_current_span(false)
        .with_ansi(false)
        .without_time()
        .try_init();
}

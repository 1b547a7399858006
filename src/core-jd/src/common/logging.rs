use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber from RUST_LOG, falling back to the
/// supplied default directives when RUST_LOG is unset or invalid.
pub fn setup_logging(default_log_settings: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_settings));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

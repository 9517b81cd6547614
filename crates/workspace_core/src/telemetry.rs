use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber for a host shell. `RUST_LOG` takes precedence
/// over `default_filter`. Safe to call more than once.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

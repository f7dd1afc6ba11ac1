use super::HerdConfig;
use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise `config.log_filter` is used, so
/// `log_filter = "herd_ledger=debug"` in `config/herd.toml` shows every
/// staged request and stock movement.
///
/// Calling this twice is harmless: the second install is ignored.
pub fn setup_tracing(config: &HerdConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}

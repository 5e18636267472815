use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

/// Installs the global tracing subscriber
///
/// `RUST_LOG` wins when set; otherwise the configured level applies. Returns
/// `false` when a subscriber was already installed, which is harmless.
pub fn init_tracing(config: &Config) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init()
        .is_ok()
}

//! Structured logging setup.
//!
//! Installs a global `tracing` subscriber once per process. `RUST_LOG`
//! overrides the configured filter directive.

use std::sync::OnceLock;

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use crate::config::LoggingConfig;

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize logging from configuration. Later calls are no-ops.
pub fn init(config: &LoggingConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));

        let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = if config.use_json() {
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .json()
                .boxed()
        } else {
            fmt::layer().with_target(true).boxed()
        };

        // A subscriber may already be installed by an embedding process or test harness
        if tracing_subscriber::registry()
            .with(fmt_layer)
            .with(filter)
            .try_init()
            .is_err()
        {
            tracing::debug!("Global tracing subscriber already initialized");
        }

        tracing::info!(
            environment = ?config.environment,
            json = config.use_json(),
            "Logging initialized"
        );
    });
}

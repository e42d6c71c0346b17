use crate::config::LoggingConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive for the configured `[logging].level`. `RUST_LOG` still
/// takes precedence when set.
pub fn filter_for(config: &LoggingConfig) -> String {
    format!("gpa_ledger={}", config.level)
}

/// Installs the subscriber described by the `[logging]` table: compact text
/// by default, one JSON object per event when `json = true`.
pub fn init_logger(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_for(config)));

    let compact = (!config.json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .compact()
    });
    let json = config.json.then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .json()
            .with_current_span(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(compact)
        .with(json)
        .init();
}

//! Logging infrastructure for Praiser.
//!
//! Logs are written to the platform data directory
//! (e.g. `~/.local/share/praiser/logs/`).

use praiser_core::PraiserError;
use praiser_core::config::LoggingConfig;
use praiser_infrastructure::PraiserPaths;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Initialize the logging system.
///
/// Sets up tracing with:
/// - File output to the platform log directory, rotated daily
/// - Configurable log level via config or the `RUST_LOG` env var
pub fn init(config: &LoggingConfig) -> praiser_core::Result<LoggingGuard> {
    let log_dir = PraiserPaths::logs_dir()
        .map_err(|e| PraiserError::config(format!("failed to resolve log directory: {}", e)))?;

    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "praiser.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    tracing::info!(
        log_dir = %log_dir.display(),
        level = %config.level,
        "Logging initialized"
    );

    Ok(LoggingGuard { _guard: guard })
}

/// Initialize logging for tests (logs to the test writer).
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Guard that keeps the logging system alive.
///
/// When dropped, flushes any pending log writes.
pub struct LoggingGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

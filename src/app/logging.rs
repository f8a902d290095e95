//! File logging. The terminal belongs to the UI, so diagnostics go to
//! `quaver.log` in the config directory.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

pub const LOG_FILE_NAME: &str = "quaver.log";
const LOG_ENV: &str = "QUAVER_LOG";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),

    #[error("Invalid filter in {var}: {reason}")]
    InvalidEnv { var: &'static str, reason: String },
}

/// Install the global subscriber. Keep the guard alive until exit or
/// buffered lines are lost.
pub fn init_logging(dir: &Path) -> Result<WorkerGuard, LoggingError> {
    let filter = create_env_filter("info")?;
    let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    Registry::default()
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .with(filter)
        .try_init()
        .map_err(|e| LoggingError::TracingInit(e.to_string()))?;

    Ok(guard)
}

/// `QUAVER_LOG`, then `RUST_LOG`, then `default_level`.
fn create_env_filter(default_level: &str) -> Result<EnvFilter, LoggingError> {
    for var in [LOG_ENV, "RUST_LOG"] {
        if let Ok(value) = std::env::var(var) {
            return EnvFilter::try_new(&value).map_err(|e| LoggingError::InvalidEnv {
                var,
                reason: e.to_string(),
            });
        }
    }
    EnvFilter::try_new(default_level).map_err(|e| LoggingError::InvalidEnv {
        var: LOG_ENV,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_parses() {
        if std::env::var(LOG_ENV).is_err() && std::env::var("RUST_LOG").is_err() {
            let filter = create_env_filter("info").unwrap();
            assert_eq!(filter.to_string(), "info");
        }
    }
}

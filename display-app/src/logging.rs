//! Logging bootstrap
//!
//! Configures the `tracing` subscriber for the three ways the binary runs:
//! silent on the appliance itself, compact stderr output during
//! development, and verbose diagnostics when debugging. The telemetry
//! layer, when a collector is configured, receives the same filtered
//! stream the local formatter prints.

use clap::ValueEnum;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use telemetry_sink::TelemetryLayer;

/// Logging mode for different environments
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LoggingMode {
    /// No local output
    Silent,
    /// Compact stderr output for development
    Development,
    /// Verbose diagnostics with source locations
    Debug,
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to initialize tracing subscriber: {0}")]
    TracingInit(String),
}

/// Initialize logging; call once, before anything that logs
///
/// # Environment Variables
///
/// - `ZONE_DISPLAY_LOG_LEVEL`: override the log level (error, warn, info,
///   debug, trace)
/// - `RUST_LOG`: standard filter, consulted after the above
pub fn init_logging(
    mode: LoggingMode,
    telemetry: Option<TelemetryLayer>,
) -> Result<(), LoggingError> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    match mode {
        LoggingMode::Silent => {
            // No local formatter; telemetry still sees everything if a
            // collector is configured.
            let subscriber = Registry::default()
                .with(create_env_filter("info"))
                .with(telemetry);
            subscriber
                .try_init()
                .map_err(|e| LoggingError::TracingInit(e.to_string()))?;
            Ok(())
        }
        LoggingMode::Development => {
            let subscriber = Registry::default()
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_thread_ids(false)
                        .with_file(false)
                        .with_line_number(false)
                        .compact(),
                )
                .with(create_env_filter("info"))
                .with(telemetry);
            subscriber
                .try_init()
                .map_err(|e| LoggingError::TracingInit(e.to_string()))?;
            Ok(())
        }
        LoggingMode::Debug => {
            let subscriber = Registry::default()
                .with(
                    fmt::layer()
                        .pretty()
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .with(create_env_filter("debug"))
                .with(telemetry);
            subscriber
                .try_init()
                .map_err(|e| LoggingError::TracingInit(e.to_string()))?;
            Ok(())
        }
    }
}

/// Build an env filter with fallback to the default level
fn create_env_filter(default_level: &str) -> EnvFilter {
    if let Ok(level) = std::env::var("ZONE_DISPLAY_LOG_LEVEL") {
        EnvFilter::new(level)
    } else if let Ok(rust_log) = std::env::var("RUST_LOG") {
        EnvFilter::new(rust_log)
    } else {
        EnvFilter::new(default_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parses_from_cli_name() {
        assert!(matches!(
            LoggingMode::from_str("development", true),
            Ok(LoggingMode::Development)
        ));
    }
}

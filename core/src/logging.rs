//! Structured logging setup.
//!
//! The library only emits `tracing` events; binaries and tests that want to
//! see them call `init_logging` once. `RUST_LOG` wins over the configured
//! level when it is set.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Compact,
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Directive applied to this crate when `RUST_LOG` is unset, e.g. `debug`.
    pub level: String,
    pub format: LogFormat,
    pub show_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            show_target: true,
        }
    }
}

impl LogConfig {
    /// Debug output for local work.
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            format: LogFormat::Pretty,
            show_target: true,
        }
    }

    /// JSON lines at info level.
    pub fn production() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Json,
            show_target: true,
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("resty_core={}", self.level)))
    }
}

/// Installs a global subscriber. Returns `false` if one was already set.
pub fn init_logging(config: &LogConfig) -> bool {
    let layer = match config.format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(config.show_target)
            .with_filter(config.filter())
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(config.show_target)
            .with_filter(config.filter())
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(config.show_target)
            .with_filter(config.filter())
            .boxed(),
    };

    tracing_subscriber::registry().with(layer).try_init().is_ok()
}

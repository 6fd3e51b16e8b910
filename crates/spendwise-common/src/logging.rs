//! Structured logging bootstrap

use crate::{Result, SpendError};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "spendwise_graphs=trace")
    pub level: String,
    /// Multi-line, coloured output instead of the compact single-line format
    pub pretty_format: bool,
    /// Optional file path for log output; stdout when unset
    pub file_path: Option<String>,
    /// Whether to emit span open/close events
    pub include_spans: bool,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            pretty_format: true,
            file_path: None,
            include_spans: false,
            include_targets: true,
        }
    }
}

impl LoggingConfig {
    /// Build the level filter. `RUST_LOG` takes precedence over the configured level.
    pub fn env_filter(&self) -> Result<EnvFilter> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        EnvFilter::try_new(&self.level).map_err(|err| {
            SpendError::config_with_source(format!("Invalid log level `{}`", self.level), err)
        })
    }
}

/// Initialize the global tracing subscriber with the given configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = config.env_filter()?;

    let span_events = if config.include_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    let outcome = match (&config.file_path, config.pretty_format) {
        (Some(path), pretty) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let layer = fmt::layer()
                .with_ansi(false)
                .with_span_events(span_events)
                .with_target(config.include_targets)
                .with_writer(Mutex::new(file));
            if pretty {
                registry.with(layer.pretty()).try_init()
            } else {
                registry.with(layer.compact()).try_init()
            }
        }
        (None, true) => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_span_events(span_events)
                    .with_target(config.include_targets),
            )
            .try_init(),
        (None, false) => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_span_events(span_events)
                    .with_target(config.include_targets),
            )
            .try_init(),
    };

    outcome.map_err(|err| SpendError::with_source("Failed to install tracing subscriber", err))
}

/// Initialize logging with default configuration
pub fn init_default_logging() -> Result<()> {
    init_logging(&LoggingConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(config.pretty_format);
        assert!(config.file_path.is_none());
        assert!(!config.include_spans);
        assert!(config.include_targets);
    }

    #[test]
    fn test_env_filter_accepts_directives() {
        let config = LoggingConfig {
            level: "warn,spendwise_graphs=debug".to_string(),
            ..LoggingConfig::default()
        };
        assert!(config.env_filter().is_ok());
    }
}

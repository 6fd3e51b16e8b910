//! Configuration loading utilities

use crate::Config;
use spendwise_common::{Result as SpendResult, SpendError};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "SPENDWISE_CONFIG_PATH";
/// Configuration files looked for in the working directory, in order.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["spendwise.yaml", "spendwise.yml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file {path}: {source}")]
    IoError {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {value:?} is not a boolean")]
    EnvParseError {
        /// Variable name.
        var: String,
        /// Raw value found.
        value: String,
    },
}

impl From<ConfigError> for SpendError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::IoError { .. } => SpendError::config_with_source("Configuration file unreadable", err),
            ConfigError::ValidationError(ref errors) => {
                match errors.errors().keys().min().map(|field| (*field).to_string()) {
                    Some(field) => SpendError::validation_field(err.to_string(), field),
                    None => SpendError::validation(err.to_string()),
                }
            }
            other => SpendError::config(other.to_string()),
        }
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&content)?;

        Self::apply_env_overrides(&mut config)?;
        config.validate_all()?;

        info!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Parse YAML without overrides or validation. Missing keys fall back to defaults.
    pub fn parse(content: &str) -> Result<Config, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Locate and load the configuration, falling back to defaults
    pub fn load() -> SpendResult<Config> {
        if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            return Ok(Self::load_config(config_path)?);
        }

        if let Some(path) = DEFAULT_CONFIG_FILES.iter().map(Path::new).find(|p| p.exists()) {
            return Ok(Self::load_config(path)?);
        }

        debug!("No configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate_all().map_err(ConfigError::ValidationError)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SpendResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides_from(config, |var| env::var(var).ok())
    }

    /// Apply overrides read through `lookup`, which maps a variable name to its value
    pub fn apply_overrides_from<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("SPENDWISE_DATASET") {
            config.data.dataset_path = path;
        }

        if let Some(dir) = lookup("SPENDWISE_OUTPUT_DIR") {
            config.output.directory = dir;
        }

        if let Some(level) = lookup("SPENDWISE_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(value) = lookup("SPENDWISE_CREATE_OUTPUT_DIR") {
            config.output.create_missing_dir = parse_bool(&value).ok_or_else(|| ConfigError::EnvParseError {
                var: "SPENDWISE_CREATE_OUTPUT_DIR".to_string(),
                value,
            })?;
        }

        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

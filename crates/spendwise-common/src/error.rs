//! Error types and utilities for SpendWise charts

use thiserror::Error;

/// Result type alias for SpendWise operations
pub type Result<T> = std::result::Result<T, SpendError>;

/// Main error type for SpendWise operations
#[derive(Error, Debug)]
pub enum SpendError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description
        message: String,
        /// Underlying cause, when there is one
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A transaction record that could not be turned into a typed row
    #[error("Dataset error: {message}{}", describe_location(*record, field.as_deref()))]
    Dataset {
        /// Human-readable description
        message: String,
        /// Zero-based record index
        record: Option<usize>,
        /// Offending field name
        field: Option<String>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Grouping and reduction errors
    #[error("Aggregation error: {message}")]
    Aggregation {
        /// Human-readable description
        message: String,
    },

    /// Graph generation and plotting errors
    #[error("Graph error: {message}")]
    Graph {
        /// Human-readable description
        message: String,
        /// Underlying cause, when there is one
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for configuration values
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable description
        message: String,
        /// Offending field name
        field: Option<String>,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        /// Human-readable description
        message: String,
        /// Underlying cause, when there is one
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

fn describe_location(record: Option<usize>, field: Option<&str>) -> String {
    match (record, field) {
        (Some(record), Some(field)) => format!(" (record {record}, field `{field}`)"),
        (Some(record), None) => format!(" (record {record})"),
        (None, Some(field)) => format!(" (field `{field}`)"),
        (None, None) => String::new(),
    }
}

impl SpendError {
    /// Create a new generic error with a custom message and source
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a dataset error that is not tied to a single record
    pub fn dataset(msg: impl Into<String>) -> Self {
        Self::Dataset {
            message: msg.into(),
            record: None,
            field: None,
        }
    }

    /// Create a dataset error pointing at one record
    pub fn dataset_record(msg: impl Into<String>, record: usize) -> Self {
        Self::Dataset {
            message: msg.into(),
            record: Some(record),
            field: None,
        }
    }

    /// Create a dataset error pointing at one field of one record
    pub fn dataset_field(msg: impl Into<String>, record: usize, field: impl Into<String>) -> Self {
        Self::Dataset {
            message: msg.into(),
            record: Some(record),
            field: Some(field.into()),
        }
    }

    /// Create a new aggregation error
    pub fn aggregation(msg: impl Into<String>) -> Self {
        Self::Aggregation {
            message: msg.into(),
        }
    }

    /// Create a new graph error
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new graph error with source
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }
}

/// Convert from serde_yaml::Error to SpendError
impl From<serde_yaml::Error> for SpendError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::config_with_source("YAML parsing error", err)
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to SpendError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for SpendError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::graph_with_source("Graph rendering failed", err)
    }
}

#[cfg(feature = "plotters")]
/// Convert from PNG encoding errors to SpendError
impl From<image::ImageError> for SpendError {
    fn from(err: image::ImageError) -> Self {
        Self::graph_with_source("PNG encoding failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_creation() {
        let error = SpendError::with_source("test message", io::Error::new(io::ErrorKind::Other, "disk"));
        assert!(error.to_string().contains("test message"));
        assert!(error.source().is_some());

        let config_error = SpendError::config("config issue");
        assert_eq!(config_error.to_string(), "Configuration error: config issue");

        let graph_error = SpendError::graph("no data");
        assert_eq!(graph_error.to_string(), "Graph error: no data");

        let validation_error = SpendError::validation_field("Invalid colour", "styling.palette");
        assert!(validation_error.to_string().contains("Validation error"));
        assert!(validation_error.to_string().contains("Invalid colour"));

        let aggregation_error = SpendError::aggregation("overflow");
        assert_eq!(aggregation_error.to_string(), "Aggregation error: overflow");
    }

    #[test]
    fn test_dataset_error_location() {
        let error = SpendError::dataset_field("expected a number", 3, "Amount");
        assert_eq!(
            error.to_string(),
            "Dataset error: expected a number (record 3, field `Amount`)"
        );

        let error = SpendError::dataset_record("expected an object", 0);
        assert_eq!(error.to_string(), "Dataset error: expected an object (record 0)");

        let error = SpendError::dataset("expected an array");
        assert_eq!(error.to_string(), "Dataset error: expected an array");
    }

    #[test]
    fn test_error_with_source() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let wrapped_error = SpendError::with_source("Failed to read file", io_error);

        assert!(wrapped_error.to_string().contains("Failed to read file"));
        assert!(wrapped_error.source().is_some());

        let graph_error = SpendError::graph_with_source(
            "Surface failed",
            io::Error::new(io::ErrorKind::Other, "backend"),
        );
        assert!(graph_error.source().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: SpendError = io_error.into();

        assert!(error.to_string().contains("I/O error"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_serde_error_conversion() {
        let serde_error = serde_json::from_str::<serde_json::Value>(r#"{"invalid": json}"#).unwrap_err();
        let error: SpendError = serde_error.into();

        assert!(error.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<Vec<u32>>("not: [a list").unwrap_err();
        let error: SpendError = yaml_error.into();

        assert!(matches!(error, SpendError::Config { .. }));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_error_chain_preservation() {
        let root_error = io::Error::new(io::ErrorKind::NotFound, "Root cause");
        let middle_error = SpendError::config_with_source("Middle layer", root_error);
        let top_error = SpendError::with_source("Top layer", middle_error);

        let mut current_error: &dyn std::error::Error = &top_error;
        let mut depth = 0;
        while let Some(source) = current_error.source() {
            current_error = source;
            depth += 1;
        }

        assert_eq!(depth, 2);
        assert_eq!(current_error.to_string(), "Root cause");
    }
}

//! Application-wide error types using thiserror.

use spendwise_common::SpendError;
use std::error::Error;
use std::path::PathBuf;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Configuration could not be located, parsed, or validated.
    #[error("Configuration error")]
    Config(#[source] SpendError),

    /// Logging could not be initialised.
    #[error("Failed to initialise logging")]
    Logging(#[source] SpendError),

    /// The transaction dataset could not be loaded.
    #[error("Failed to load dataset {}", path.display())]
    Dataset {
        /// Dataset location.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: SpendError,
    },

    /// A chart stage failed.
    #[error("Chart generation failed")]
    Generation(#[from] SpendError),
}

impl AppError {
    /// The error and every source below it, joined into one line
    pub fn chain(&self) -> String {
        let mut message = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}

/// Result type for the application.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_includes_sources() {
        let err = AppError::Dataset {
            path: PathBuf::from("dataset.json"),
            source: SpendError::dataset_field("value is null", 3, "Amount"),
        };
        let chain = err.chain();
        assert!(chain.starts_with("Failed to load dataset dataset.json: "));
        assert!(chain.contains("record 3"));
        assert!(chain.contains("Amount"));
    }

    #[test]
    fn test_spend_error_converts_to_generation() {
        let err: AppError = SpendError::graph("No data available for payment mode chart").into();
        assert!(matches!(err, AppError::Generation(_)));
        assert!(err.chain().contains("payment mode"));
    }
}

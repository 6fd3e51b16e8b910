//! # SpendWise
//!
//! Renders the spending charts for a personal transaction dataset.
//!
//! This is the binary crate: it wires configuration, logging, the dataset
//! loader, and the graph manager together and maps failures to an exit code.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;

pub use error::*;

use spendwise_common::init_default_logging;
use spendwise_config::Config;
use spendwise_graphs::{DatasetLoader, GenerationReport, GraphManager};
use tracing::{error, info};

/// Report a failure raised before the configured logging is installed.
///
/// Installs the default subscriber and logs through it. When no subscriber can
/// be installed the message goes to stderr instead. Returns whether it was logged.
pub fn report_startup_error(err: &AppError) -> bool {
    match init_default_logging() {
        Ok(()) => {
            error!("{}", err.chain());
            true
        }
        Err(logging) => {
            eprintln!("{}", err.chain());
            eprintln!("{logging}");
            false
        }
    }
}

/// Load the configured dataset and generate every enabled chart
pub fn run(config: &Config) -> AppResult<GenerationReport> {
    let dataset_path = config.data.dataset_path();
    let dataset = DatasetLoader::new()
        .load(dataset_path)
        .map_err(|source| AppError::Dataset {
            path: dataset_path.to_path_buf(),
            source,
        })?;

    let report = GraphManager::new(config).generate_all(&dataset)?;
    for graph in &report.generated {
        info!(graph = %graph.kind, "Available at {}", graph.kind.image_path());
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spendwise_common::SpendError;

    #[test]
    fn test_startup_error_falls_back_to_stderr() {
        let err = AppError::Config(SpendError::config("no such file"));
        report_startup_error(&err);
        // a global subscriber is now installed, so the second report cannot log
        assert!(!report_startup_error(&err));
    }
}

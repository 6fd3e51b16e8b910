//! Main entry point for SpendWise.

use spendwise::{report_startup_error, run, AppError, AppResult};
use spendwise_common::{init_logging, LoggingConfig};
use spendwise_config::ConfigLoader;
use tracing::{error, info};

fn main() -> AppResult<()> {
    let config = match ConfigLoader::load() {
        Ok(config) => config,
        Err(e) => {
            let err = AppError::Config(e);
            report_startup_error(&err);
            return Err(err);
        }
    };

    init_logging(&LoggingConfig::from(&config.logging)).map_err(AppError::Logging)?;

    info!("Starting SpendWise chart generation");

    match run(&config) {
        Ok(report) => {
            info!(
                charts = report.generated.len(),
                bytes = report.total_bytes(),
                "Finished"
            );
            Ok(())
        }
        Err(e) => {
            error!("{}", e.chain());
            Err(e)
        }
    }
}

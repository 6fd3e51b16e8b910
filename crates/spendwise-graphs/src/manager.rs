//! Graph manager: runs every enabled chart stage in a fixed order

use crate::aggregator::{category_totals, impulse_need_crosstab, monthly_spending, payment_mode_counts};
use crate::category_spending::CategorySpendingChart;
use crate::impulse_need::ImpulseNeedChart;
use crate::payment_mode::PaymentModeChart;
use crate::renderer::ChartRenderer;
use crate::spending_over_time::SpendingOverTimeChart;
use crate::style::StyleConfig;
use serde::Serialize;
use spendwise_common::{Dataset, Result, SpendError, Transaction};
use spendwise_config::{Config, EnabledGraphsConfig, OutputConfig};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span, instrument};

/// The four chart kinds, in generation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphKind {
    /// Monthly spending line chart
    Expense,
    /// Category totals bar chart
    Category,
    /// Payment mode pie chart
    PaymentMode,
    /// Impulse vs need stacked bar chart
    ImpulseNeed,
}

impl GraphKind {
    /// Every kind, in the order the manager generates them
    pub const ALL: [Self; 4] = [Self::Expense, Self::Category, Self::PaymentMode, Self::ImpulseNeed];

    /// Short identifier the chart was published under
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Category => "category",
            Self::PaymentMode => "paymentmode",
            Self::ImpulseNeed => "impulse",
        }
    }

    /// Fixed output file name
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Expense => "expense_graph.png",
            Self::Category => "category_graph.png",
            Self::PaymentMode => "payment_mode_graph.png",
            Self::ImpulseNeed => "impulse_need_graph.png",
        }
    }

    /// Public image path
    pub fn image_path(self) -> String {
        format!("/static/{}", self.file_name())
    }

    /// Chart title drawn above the image
    pub const fn title(self) -> &'static str {
        match self {
            Self::Expense => crate::spending_over_time::TITLE,
            Self::Category => crate::category_spending::TITLE,
            Self::PaymentMode => crate::payment_mode::TITLE,
            Self::ImpulseNeed => crate::impulse_need::TITLE,
        }
    }

    const fn is_enabled(self, enabled: &EnabledGraphsConfig) -> bool {
        match self {
            Self::Expense => enabled.expense,
            Self::Category => enabled.category,
            Self::PaymentMode => enabled.payment_mode,
            Self::ImpulseNeed => enabled.impulse_need,
        }
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// One written chart image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedGraph {
    /// Which chart was written
    pub kind: GraphKind,
    /// Where the image landed
    pub path: PathBuf,
    /// PNG size in bytes
    pub bytes: usize,
}

/// Outcome of a full generation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Charts written, in generation order
    pub generated: Vec<GeneratedGraph>,
    /// Charts disabled in configuration
    pub skipped: Vec<GraphKind>,
}

impl GenerationReport {
    /// Paths of every written image
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.generated.iter().map(|graph| graph.path.as_path())
    }

    /// Combined size of every written image
    pub fn total_bytes(&self) -> usize {
        self.generated.iter().map(|graph| graph.bytes).sum()
    }
}

/// Runs the aggregate, render, and save stage of every enabled chart.
///
/// Stages run strictly in [`GraphKind::ALL`] order and the first failure
/// aborts the rest. Existing images are overwritten.
#[derive(Debug, Clone)]
pub struct GraphManager {
    output: OutputConfig,
    enabled: EnabledGraphsConfig,
    style: StyleConfig,
}

impl GraphManager {
    /// Build a manager from the loaded configuration
    pub fn new(config: &Config) -> Self {
        Self {
            output: config.output.clone(),
            enabled: config.graphs.enabled,
            style: StyleConfig::from(config),
        }
    }

    /// Styling handed to every renderer
    pub const fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Directory the images are written into
    pub fn output_dir(&self) -> &Path {
        Path::new(&self.output.directory)
    }

    /// Generate every enabled chart from `dataset`
    #[instrument(skip_all, fields(records = dataset.len(), output_dir = %self.output_dir().display()))]
    pub fn generate_all(&self, dataset: &Dataset) -> Result<GenerationReport> {
        self.prepare_output_dir()?;

        let mut report = GenerationReport::default();
        for kind in GraphKind::ALL {
            if !kind.is_enabled(&self.enabled) {
                info!(graph = %kind, "Graph disabled in configuration, skipping");
                report.skipped.push(kind);
                continue;
            }

            let path = self.output.path_for(kind.file_name());
            let bytes = self.generate(kind, dataset, &path)?;
            report.generated.push(GeneratedGraph { kind, path, bytes });
        }

        info!(
            generated = report.generated.len(),
            skipped = report.skipped.len(),
            bytes = report.total_bytes(),
            "Graph generation complete"
        );
        Ok(report)
    }

    /// Aggregate, render, and write one chart. Returns the bytes written.
    pub fn generate(&self, kind: GraphKind, transactions: &[Transaction], path: &Path) -> Result<usize> {
        let span = info_span!("graph", graph = %kind);
        let _enter = span.enter();
        debug!("Aggregating data for {}", kind.title());

        let bytes = match kind {
            GraphKind::Expense => {
                let months = monthly_spending(transactions)?;
                SpendingOverTimeChart::new().render_to_file(&months, &self.style, path)?
            }
            GraphKind::Category => {
                let totals = category_totals(transactions)?;
                CategorySpendingChart::new().render_to_file(&totals, &self.style, path)?
            }
            GraphKind::PaymentMode => {
                let counts = payment_mode_counts(transactions)?;
                PaymentModeChart::new().render_to_file(&counts, &self.style, path)?
            }
            GraphKind::ImpulseNeed => {
                let table = impulse_need_crosstab(transactions)?;
                ImpulseNeedChart::new().render_to_file(&table, &self.style, path)?
            }
        };

        info!(bytes, path = %path.display(), "Wrote {}", kind.file_name());
        Ok(bytes)
    }

    fn prepare_output_dir(&self) -> Result<()> {
        let dir = self.output_dir();
        if dir.is_dir() {
            return Ok(());
        }

        if self.output.create_missing_dir {
            std::fs::create_dir_all(dir)?;
            info!("Created output directory {}", dir.display());
            Ok(())
        } else {
            Err(SpendError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("output directory {} does not exist", dir.display()),
            )))
        }
    }
}

//! # SpendWise Graphs
//!
//! Dataset loading, aggregation, and chart rendering.
//!
//! The pipeline is synchronous: a [`DatasetLoader`] reads the transaction
//! table once, then [`GraphManager`] aggregates, renders, and saves each of the
//! four charts in turn.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

pub mod aggregator;
pub mod category_spending;
pub mod impulse_need;
pub mod loader;
pub mod manager;
pub mod payment_mode;
pub mod renderer;
pub mod spending_over_time;
pub mod style;

pub use aggregator::{
    category_totals, impulse_need_crosstab, monthly_spending, payment_mode_counts, CategoryTotal,
    DataAggregator, ImpulseNeedRow, ImpulseNeedTable, MonthlyTotal, PaymentModeCount,
};
pub use category_spending::CategorySpendingChart;
pub use impulse_need::ImpulseNeedChart;
pub use loader::DatasetLoader;
pub use manager::{GeneratedGraph, GenerationReport, GraphKind, GraphManager};
pub use payment_mode::PaymentModeChart;
pub use renderer::ChartRenderer;
pub use spending_over_time::SpendingOverTimeChart;
pub use style::StyleConfig;

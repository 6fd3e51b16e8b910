//! Total spending over time line chart implementation

use crate::aggregator::MonthlyTotal;
use crate::renderer::{
    build_slot_chart, draw_gridlines, draw_slot_labels, BitMapArea, ChartRenderer, ValueAxis,
};
use crate::style::StyleConfig;
use plotters::prelude::*;
use spendwise_common::{Result, SpendError};

/// Chart title
pub const TITLE: &str = "Total Spending Over Time";

/// Line chart of monthly spending totals, one point per calendar month
#[derive(Debug, Default, Clone, Copy)]
pub struct SpendingOverTimeChart;

impl SpendingOverTimeChart {
    /// Create the monthly spending chart
    pub const fn new() -> Self {
        Self
    }
}

impl ChartRenderer for SpendingOverTimeChart {
    type Data = [MonthlyTotal];

    fn name(&self) -> &'static str {
        "spending over time"
    }

    fn dimensions(&self, style: &StyleConfig) -> (u32, u32) {
        style.wide_size
    }

    fn draw(&self, root: &BitMapArea<'_>, data: &[MonthlyTotal], style: &StyleConfig) -> Result<()> {
        if data.is_empty() {
            return Err(SpendError::graph("No data available for spending over time chart"));
        }

        root.fill(&style.background_color)?;

        let axis = ValueAxis::covering(data.iter().map(|month| month.total))?;
        let mut chart = build_slot_chart(
            root,
            TITLE,
            "Date",
            "Total Amount Spent",
            data.len(),
            &axis,
            style,
        )?;

        draw_gridlines(&mut chart, &axis, data.len(), style)?;

        let color = style.color(0);
        let points: Vec<(f64, f64)> = data
            .iter()
            .enumerate()
            .map(|(i, month)| (i as f64 + 0.5, month.total))
            .collect();

        chart.draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?;
        chart.draw_series(points.iter().map(|&point| Circle::new(point, 3, color.filled())))?;

        let labels: Vec<String> = data.iter().map(MonthlyTotal::label).collect();
        draw_slot_labels(root, &chart, &labels, &axis, style)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::monthly_spending;
    use spendwise_common::test_utils::fixtures;

    #[test]
    fn test_renders_png() {
        let months = monthly_spending(&fixtures::household_year()).unwrap();
        let png = SpendingOverTimeChart::new()
            .render_to_bytes(&months, &StyleConfig::default())
            .unwrap();
        assert!(png.starts_with(b"\x89PNG"));
    }

    #[test]
    fn test_single_month_renders() {
        let months = vec![MonthlyTotal { year: 2024, month: 5, total: 12.0 }];
        assert!(SpendingOverTimeChart::new()
            .render_to_bytes(&months, &StyleConfig::default())
            .is_ok());
    }

    #[test]
    fn test_render_empty_data_error() {
        let err = SpendingOverTimeChart::new()
            .render_to_bytes(&[], &StyleConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains("spending over time"));
    }

    #[test]
    fn test_dimensions_are_wide() {
        let style = StyleConfig::default();
        assert_eq!(SpendingOverTimeChart::new().dimensions(&style), (1000, 600));
    }
}

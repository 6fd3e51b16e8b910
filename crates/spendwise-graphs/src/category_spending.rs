//! Spending by category bar chart implementation

use crate::aggregator::CategoryTotal;
use crate::renderer::{
    build_slot_chart, draw_gridlines, draw_slot_labels, BitMapArea, ChartRenderer, ValueAxis,
};
use crate::style::StyleConfig;
use plotters::prelude::*;
use spendwise_common::{Result, SpendError};

/// Chart title
pub const TITLE: &str = "Spending by Category";

/// Fraction of each slot left empty on either side of a bar
const BAR_INSET: f64 = 0.1;

/// Vertical bar chart of total spending per category
#[derive(Debug, Default, Clone, Copy)]
pub struct CategorySpendingChart;

impl CategorySpendingChart {
    /// Create the category spending chart
    pub const fn new() -> Self {
        Self
    }
}

impl ChartRenderer for CategorySpendingChart {
    type Data = [CategoryTotal];

    fn name(&self) -> &'static str {
        "category spending"
    }

    fn dimensions(&self, style: &StyleConfig) -> (u32, u32) {
        style.wide_size
    }

    fn draw(&self, root: &BitMapArea<'_>, data: &[CategoryTotal], style: &StyleConfig) -> Result<()> {
        if data.is_empty() {
            return Err(SpendError::graph("No data available for category spending chart"));
        }

        root.fill(&style.background_color)?;

        let axis = ValueAxis::covering(data.iter().map(|category| category.total))?;
        let mut chart = build_slot_chart(
            root,
            TITLE,
            "Category",
            "Total Amount",
            data.len(),
            &axis,
            style,
        )?;

        draw_gridlines(&mut chart, &axis, data.len(), style)?;

        let color = style.color(0);
        chart.draw_series(data.iter().enumerate().map(|(i, category)| {
            let x = i as f64;
            Rectangle::new(
                [(x + BAR_INSET, 0.0), (x + 1.0 - BAR_INSET, category.total)],
                color.filled(),
            )
        }))?;

        let labels: Vec<String> = data.iter().map(|category| category.category.clone()).collect();
        draw_slot_labels(root, &chart, &labels, &axis, style)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::category_totals;
    use spendwise_common::test_utils::fixtures;

    #[test]
    fn test_renders_png() {
        let totals = category_totals(&fixtures::household_year()).unwrap();
        let png = CategorySpendingChart::new()
            .render_to_bytes(&totals, &StyleConfig::default())
            .unwrap();
        assert!(png.starts_with(b"\x89PNG"));
    }

    #[test]
    fn test_negative_total_renders() {
        let totals = vec![
            CategoryTotal { category: "Refunds".to_string(), total: -35.0 },
            CategoryTotal { category: "Travel".to_string(), total: 80.0 },
        ];
        assert!(CategorySpendingChart::new()
            .render_to_bytes(&totals, &StyleConfig::default())
            .is_ok());
    }

    #[test]
    fn test_totals_too_far_apart_error() {
        let totals = vec![
            CategoryTotal { category: "A".to_string(), total: -1e308 },
            CategoryTotal { category: "B".to_string(), total: 1e308 },
        ];
        let err = CategorySpendingChart::new()
            .render_to_bytes(&totals, &StyleConfig::default())
            .unwrap_err();
        assert!(matches!(err, SpendError::Graph { .. }));
    }

    #[test]
    fn test_solid_grid_renders() {
        let mut style = StyleConfig::default();
        style.dashed_grid = false;
        let totals = category_totals(&fixtures::three_records()).unwrap();
        assert!(CategorySpendingChart::new().render_to_bytes(&totals, &style).is_ok());
    }

    #[test]
    fn test_render_empty_data_error() {
        let err = CategorySpendingChart::new()
            .render_to_bytes(&[], &StyleConfig::default())
            .unwrap_err();
        assert!(matches!(err, SpendError::Graph { .. }));
    }
}

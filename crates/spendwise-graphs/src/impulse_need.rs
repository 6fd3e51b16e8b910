//! Impulse vs need stacked bar chart implementation

use crate::aggregator::{ImpulseNeedRow, ImpulseNeedTable};
use crate::renderer::{
    build_slot_chart, draw_gridlines, draw_slot_labels, BitMapArea, ChartRenderer, ValueAxis,
};
use crate::style::StyleConfig;
use plotters::prelude::*;
use spendwise_common::{Necessity, Result, SpendError};

/// Chart title
pub const TITLE: &str = "Impulse vs Need Purchases by Category";

const BAR_INSET: f64 = 0.1;

/// Stacked bars per category: impulse spending at the bottom, need spending on top
#[derive(Debug, Default, Clone, Copy)]
pub struct ImpulseNeedChart;

impl ImpulseNeedChart {
    /// Create the impulse vs need chart
    pub const fn new() -> Self {
        Self
    }
}

/// Bottom and top of each populated cell, impulse first.
///
/// Positive cells stack upward from zero and negative cells stack downward,
/// each on its own running base. Empty cells are skipped.
fn segments(row: &ImpulseNeedRow) -> Vec<(Necessity, (f64, f64))> {
    let (mut above, mut below) = (0.0_f64, 0.0_f64);
    [Necessity::Impulse, Necessity::Need]
        .into_iter()
        .filter_map(|necessity| {
            let value = row.value(necessity)?;
            let base = if value < 0.0 { &mut below } else { &mut above };
            let bottom = *base;
            *base += value;
            Some((necessity, (bottom, *base)))
        })
        .collect()
}

fn segment(row: &ImpulseNeedRow, necessity: Necessity) -> Option<(f64, f64)> {
    segments(row)
        .into_iter()
        .find(|(stacked, _)| *stacked == necessity)
        .map(|(_, bounds)| bounds)
}

impl ChartRenderer for ImpulseNeedChart {
    type Data = ImpulseNeedTable;

    fn name(&self) -> &'static str {
        "impulse vs need"
    }

    fn dimensions(&self, style: &StyleConfig) -> (u32, u32) {
        style.wide_size
    }

    fn draw(&self, root: &BitMapArea<'_>, data: &ImpulseNeedTable, style: &StyleConfig) -> Result<()> {
        if data.is_empty() || data.columns.is_empty() {
            return Err(SpendError::graph("No data available for impulse vs need chart"));
        }

        root.fill(&style.background_color)?;

        let slots = data.rows.len();
        let axis = ValueAxis::covering(
            data.rows
                .iter()
                .flat_map(segments)
                .flat_map(|(_, (bottom, top))| [bottom, top]),
        )?;
        let mut chart = build_slot_chart(
            root,
            TITLE,
            "Category",
            "Amount Spent",
            slots,
            &axis,
            style,
        )?;

        draw_gridlines(&mut chart, &axis, slots, style)?;

        for (column, &necessity) in data.columns.iter().enumerate() {
            let color = style.color(column);
            chart
                .draw_series(data.rows.iter().enumerate().filter_map(|(i, row)| {
                    let (bottom, top) = segment(row, necessity)?;
                    let x = i as f64;
                    Some(Rectangle::new(
                        [(x + BAR_INSET, bottom), (x + 1.0 - BAR_INSET, top)],
                        color.filled(),
                    ))
                }))?
                .label(necessity.label())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(style.background_color.mix(0.8))
            .border_style(style.grid_color)
            .label_font(style.axis_style())
            .draw()?;

        let labels: Vec<String> = data.rows.iter().map(|row| row.category.clone()).collect();
        draw_slot_labels(root, &chart, &labels, &axis, style)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::impulse_need_crosstab;
    use spendwise_common::test_utils::fixtures;

    #[test]
    fn test_renders_png() {
        let table = impulse_need_crosstab(&fixtures::three_records()).unwrap();
        let png = ImpulseNeedChart::new()
            .render_to_bytes(&table, &StyleConfig::default())
            .unwrap();
        assert!(png.starts_with(b"\x89PNG"));
    }

    #[test]
    fn test_segments_stack_impulse_below_need() {
        let row = ImpulseNeedRow {
            category: "Food".to_string(),
            impulse: Some(25.0),
            need: Some(100.0),
        };
        assert_eq!(segment(&row, Necessity::Impulse), Some((0.0, 25.0)));
        assert_eq!(segment(&row, Necessity::Need), Some((25.0, 125.0)));
    }

    #[test]
    fn test_empty_cell_is_skipped() {
        let row = ImpulseNeedRow {
            category: "Rent".to_string(),
            impulse: None,
            need: Some(120.0),
        };
        assert_eq!(segment(&row, Necessity::Impulse), None);
        assert_eq!(segment(&row, Necessity::Need), Some((0.0, 120.0)));
    }

    #[test]
    fn test_negative_cell_stacks_down_from_zero() {
        let row = ImpulseNeedRow {
            category: "Refunds".to_string(),
            impulse: Some(-30.0),
            need: Some(100.0),
        };
        assert_eq!(segment(&row, Necessity::Impulse), Some((0.0, -30.0)));
        assert_eq!(segment(&row, Necessity::Need), Some((0.0, 100.0)));
    }

    #[test]
    fn test_negative_cells_share_a_base() {
        let row = ImpulseNeedRow {
            category: "Refunds".to_string(),
            impulse: Some(-30.0),
            need: Some(-20.0),
        };
        assert_eq!(segment(&row, Necessity::Impulse), Some((0.0, -30.0)));
        assert_eq!(segment(&row, Necessity::Need), Some((-30.0, -50.0)));
    }

    #[test]
    fn test_mixed_sign_table_renders() {
        let table = ImpulseNeedTable {
            rows: vec![ImpulseNeedRow {
                category: "Refunds".to_string(),
                impulse: Some(-30.0),
                need: Some(100.0),
            }],
            columns: vec![Necessity::Impulse, Necessity::Need],
        };
        assert!(ImpulseNeedChart::new()
            .render_to_bytes(&table, &StyleConfig::default())
            .is_ok());
    }

    #[test]
    fn test_single_flag_table_renders() {
        let table = impulse_need_crosstab(&fixtures::minimal()[..1]).unwrap();
        assert_eq!(table.columns, vec![Necessity::Need]);
        assert!(ImpulseNeedChart::new()
            .render_to_bytes(&table, &StyleConfig::default())
            .is_ok());
    }

    #[test]
    fn test_render_empty_data_error() {
        let err = ImpulseNeedChart::new()
            .render_to_bytes(&ImpulseNeedTable::default(), &StyleConfig::default())
            .unwrap_err();
        assert!(matches!(err, SpendError::Graph { .. }));
        assert!(err.to_string().contains("impulse vs need"));
    }
}

//! Payment mode distribution pie chart implementation
//!
//! Wedges start at 12 o'clock and run counter-clockwise in the order of the
//! counts, each labelled with its share to one decimal place (plotters'
//! [`Pie`] formats percentages as `{:.1}%`).

use crate::aggregator::PaymentModeCount;
use crate::renderer::{BitMapArea, ChartRenderer};
use crate::style::StyleConfig;
use plotters::prelude::*;
use spendwise_common::{Result, SpendError};

/// Chart title
pub const TITLE: &str = "Payment Mode Distribution";

/// Plotters sweeps clockwise on screen from 3 o'clock, so -90 is 12 o'clock
const START_ANGLE: f64 = -90.0;
const RADIUS_RATIO: f64 = 0.35;
const LABEL_OFFSET_RATIO: f64 = 0.1;

/// Pie chart of transaction counts per payment mode
#[derive(Debug, Default, Clone, Copy)]
pub struct PaymentModeChart;

impl PaymentModeChart {
    /// Create the payment mode chart
    pub const fn new() -> Self {
        Self
    }
}

/// Wedge sizes, colours and names in drawing order
#[derive(Debug, Default, PartialEq)]
struct Wedges {
    sizes: Vec<f64>,
    colors: Vec<RGBColor>,
    labels: Vec<String>,
}

/// Lay out wedges so a clockwise sweep shows the counts counter-clockwise.
///
/// Each mode keeps the palette colour of its position in `data`.
fn wedges(data: &[PaymentModeCount], style: &StyleConfig) -> Wedges {
    let mut wedges = Wedges::default();
    for (index, mode) in data.iter().enumerate().rev() {
        wedges.sizes.push(mode.count as f64);
        wedges.colors.push(style.color(index));
        wedges.labels.push(mode.payment_mode.clone());
    }
    wedges
}

fn half_pixels(pixels: u32) -> i32 {
    i32::try_from(pixels / 2).unwrap_or(i32::MAX)
}

impl ChartRenderer for PaymentModeChart {
    type Data = [PaymentModeCount];

    fn name(&self) -> &'static str {
        "payment mode"
    }

    fn dimensions(&self, style: &StyleConfig) -> (u32, u32) {
        (style.square_size, style.square_size)
    }

    fn draw(&self, root: &BitMapArea<'_>, data: &[PaymentModeCount], style: &StyleConfig) -> Result<()> {
        let total: usize = data.iter().map(|mode| mode.count).sum();
        if total == 0 {
            return Err(SpendError::graph("No data available for payment mode chart"));
        }

        root.fill(&style.background_color)?;
        let area = root.titled(TITLE, style.title_style())?;

        let (width, height) = area.dim_in_pixel();
        let center = (half_pixels(width), half_pixels(height));
        let radius = f64::from(width.min(height)) * RADIUS_RATIO;
        let wedges = wedges(data, style);

        let mut pie = Pie::new(&center, &radius, &wedges.sizes, &wedges.colors, &wedges.labels);
        pie.start_angle(START_ANGLE);
        pie.label_style(style.axis_style());
        pie.label_offset(radius * LABEL_OFFSET_RATIO);
        pie.percentages(style.axis_style());
        area.draw(&pie)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::payment_mode_counts;
    use spendwise_common::test_utils::fixtures;

    fn count(mode: &str, count: usize) -> PaymentModeCount {
        PaymentModeCount { payment_mode: mode.to_string(), count }
    }

    #[test]
    fn test_renders_png() {
        let counts = payment_mode_counts(&fixtures::household_year()).unwrap();
        let png = PaymentModeChart::new()
            .render_to_bytes(&counts, &StyleConfig::default())
            .unwrap();
        assert!(png.starts_with(b"\x89PNG"));
    }

    #[test]
    fn test_single_mode_renders() {
        let data = vec![count("Cash", 4)];
        assert!(PaymentModeChart::new()
            .render_to_bytes(&data, &StyleConfig::default())
            .is_ok());
    }

    #[test]
    fn test_wedges_reverse_counts_and_keep_colours() {
        let style = StyleConfig::default();
        let data = vec![count("Card", 3), count("Cash", 2), count("UPI", 1)];
        let wedges = wedges(&data, &style);
        assert_eq!(wedges.sizes, vec![1.0, 2.0, 3.0]);
        assert_eq!(wedges.labels, vec!["UPI", "Cash", "Card"]);
        assert_eq!(wedges.colors, vec![style.color(2), style.color(1), style.color(0)]);
    }

    #[test]
    fn test_render_empty_data_error() {
        let err = PaymentModeChart::new()
            .render_to_bytes(&[], &StyleConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains("payment mode"));
    }

    #[test]
    fn test_dimensions_are_square() {
        let style = StyleConfig::default();
        assert_eq!(PaymentModeChart::new().dimensions(&style), (600, 600));
    }
}

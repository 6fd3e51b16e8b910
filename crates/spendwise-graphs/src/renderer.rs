//! Chart rendering trait and shared drawing helpers

use crate::style::StyleConfig;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use spendwise_common::{Result, SpendError};
use std::io::Cursor;
use std::ops::Range;
use std::path::Path;

/// Drawing area over an in-memory RGB bitmap
pub type BitMapArea<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Chart context over two `f64` axes
pub type F64Chart<'a, 'b> = ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

const DASH_COUNT: u32 = 120;
const MAX_INTERVALS: usize = 20;

/// Trait for rendering one chart kind from its aggregated data
pub trait ChartRenderer {
    /// Aggregated data drawn by this chart
    type Data: ?Sized;

    /// Chart name used in logs and errors
    fn name(&self) -> &'static str;

    /// Canvas size in pixels
    fn dimensions(&self, style: &StyleConfig) -> (u32, u32);

    /// Draw the chart onto `root`. Empty data is an error.
    fn draw(&self, root: &BitMapArea<'_>, data: &Self::Data, style: &StyleConfig) -> Result<()>;

    /// Render the chart to PNG bytes
    fn render_to_bytes(&self, data: &Self::Data, style: &StyleConfig) -> Result<Vec<u8>> {
        let (width, height) = self.dimensions(style);
        let png = with_bitmap_surface(width, height, |root| self.draw(root, data, style))?;
        tracing::debug!("Encoded {} chart as {} PNG bytes", self.name(), png.len());
        Ok(png)
    }

    /// Render the chart and write it to `path`, replacing any existing file.
    /// Returns the number of bytes written.
    fn render_to_file(&self, data: &Self::Data, style: &StyleConfig, path: &Path) -> Result<usize> {
        let png = self.render_to_bytes(data, style)?;
        std::fs::write(path, &png)?;
        tracing::info!("Successfully rendered {} chart to {}", self.name(), path.display());
        Ok(png.len())
    }
}

/// Run `draw` against a fresh bitmap surface and encode the result as PNG.
///
/// The surface is dropped before encoding, on success and on failure alike.
pub fn with_bitmap_surface<F>(width: u32, height: u32, draw: F) -> Result<Vec<u8>>
where
    F: FnOnce(&BitMapArea<'_>) -> Result<()>,
{
    let mut buffer = vec![0_u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw(&root)?;
        root.present()?;
    }
    encode_png(buffer, width, height)
}

/// Encode a packed RGB buffer as PNG
pub fn encode_png(buffer: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>> {
    let image = image::RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| SpendError::graph("Pixel buffer does not match the canvas size"))?;
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, image::ImageOutputFormat::Png)?;
    Ok(bytes.into_inner())
}

/// A value axis with evenly spaced ticks that always includes zero
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueAxis {
    /// Lowest tick
    pub min: f64,
    /// Highest tick
    pub max: f64,
    /// Distance between neighbouring ticks
    pub step: f64,
}

impl ValueAxis {
    /// Smallest tick-aligned axis covering zero and every value.
    ///
    /// Fails when the values span more than an `f64` can hold.
    pub fn covering(values: impl IntoIterator<Item = f64>) -> Result<Self> {
        let (low, high) = values
            .into_iter()
            .filter(|value| value.is_finite())
            .fold((0.0_f64, 0.0_f64), |(low, high), value| (low.min(value), high.max(value)));

        let span = high - low;
        if !span.is_finite() {
            return Err(SpendError::graph(format!(
                "Values from {low} to {high} are too far apart to plot"
            )));
        }

        let step = nice_step(if span > 0.0 { span } else { 1.0 } / 5.0);
        let min = (low / step).floor() * step;
        let mut max = (high / step).ceil() * step;
        if max <= min {
            max = min + step;
        }

        let axis = Self { min, max, step };
        if !(min.is_finite() && max.is_finite()) || (max - min) / step > MAX_INTERVALS as f64 {
            return Err(SpendError::graph(format!(
                "Cannot fit an axis around values from {low} to {high}"
            )));
        }
        Ok(axis)
    }

    /// Plotted value range
    pub fn range(&self) -> Range<f64> {
        self.min..self.max
    }

    /// Number of tick intervals
    pub fn intervals(&self) -> usize {
        ((self.max - self.min) / self.step).round().max(1.0) as usize
    }

    /// Tick positions from `min` to `max` inclusive
    pub fn ticks(&self) -> Vec<f64> {
        (0..=self.intervals())
            .map(|i| self.step.mul_add(i as f64, self.min))
            .collect()
    }
}

/// Round a raw step up to 1, 2, or 5 times a power of ten
pub fn nice_step(raw: f64) -> f64 {
    if !(raw.is_finite() && raw > 0.0) {
        return 1.0;
    }
    let magnitude = 10_f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Format a tick value without trailing zeros
pub fn format_tick(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        format!("{value:.0}")
    } else {
        let text = format!("{value:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Build a cartesian chart with `slots` category positions on x and `axis` on y.
///
/// Slot `i` spans `[i, i + 1)`; x tick labels are left to [`draw_slot_labels`].
pub fn build_slot_chart<'a, 'b>(
    root: &'a BitMapArea<'b>,
    title: &str,
    x_desc: &str,
    y_desc: &str,
    slots: usize,
    axis: &ValueAxis,
    style: &'a StyleConfig,
) -> Result<F64Chart<'a, 'b>> {
    let mut chart = ChartBuilder::on(root)
        .caption(title, style.title_style())
        .margin(style.margins.outer)
        .x_label_area_size(style.margins.x_label_area)
        .y_label_area_size(style.margins.y_label_area)
        .build_cartesian_2d(0.0..slots as f64, axis.range())?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(slots.max(1))
        .x_label_formatter(&|_| String::new())
        .y_labels(axis.intervals() + 1)
        .y_label_formatter(&|value| format_tick(*value))
        .label_style(style.axis_style())
        .axis_desc_style(style.axis_style())
        .axis_style(style.text_color)
        .x_desc(x_desc)
        .y_desc(y_desc)
        .draw()?;

    Ok(chart)
}

/// Horizontal gridlines at every tick of `axis`, dashed when the style asks for it
pub fn draw_gridlines(chart: &mut F64Chart<'_, '_>, axis: &ValueAxis, slots: usize, style: &StyleConfig) -> Result<()> {
    let width = slots as f64;
    let grid = style.grid_color;
    let dash = dash_length(chart.plotting_area().dim_in_pixel().0);

    for y in axis.ticks() {
        let line = [(0.0, y), (width, y)];
        if style.dashed_grid {
            chart.draw_series(DashedLineSeries::new(line, dash, dash, grid.into()))?;
        } else {
            chart.draw_series(LineSeries::new(line, grid))?;
        }
    }
    Ok(())
}

/// Pixel length of one dash (and of the gap after it) across `width` pixels
pub fn dash_length(width: u32) -> u32 {
    (width / (2 * DASH_COUNT)).max(1)
}

/// Draw one label under the centre of each slot.
///
/// Labels are turned vertical when any of them is wider than its slot.
pub fn draw_slot_labels(
    root: &BitMapArea<'_>,
    chart: &F64Chart<'_, '_>,
    labels: &[String],
    axis: &ValueAxis,
    style: &StyleConfig,
) -> Result<()> {
    let (left, _) = chart.backend_coord(&(0.0, axis.min));
    let (right, _) = chart.backend_coord(&(1.0, axis.min));
    let slot_width = f64::from((right - left).abs());
    let rotate = labels
        .iter()
        .any(|label| estimated_text_width(label, style.axis_font.size) > slot_width);

    let base = style.axis_style();
    let text_style = if rotate {
        base.transform(FontTransform::Rotate270)
            .pos(Pos::new(HPos::Right, VPos::Center))
    } else {
        base.pos(Pos::new(HPos::Center, VPos::Top))
    };

    for (index, label) in labels.iter().enumerate() {
        let (x, y) = chart.backend_coord(&(index as f64 + 0.5, axis.min));
        root.draw(&Text::new(label.clone(), (x, y + 8), text_style.clone()))?;
    }
    Ok(())
}

/// Rough pixel width of bold text, assuming an average glyph of 0.6 em
pub fn estimated_text_width(text: &str, font_size: u32) -> f64 {
    text.chars().count() as f64 * f64::from(font_size) * 0.6
}

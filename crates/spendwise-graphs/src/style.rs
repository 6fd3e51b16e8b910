//! Chart styling resolved from configuration

use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};
use spendwise_config::{Config, GraphsConfig, StylingConfig, DEFAULT_PALETTE};

/// Font family and size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    /// Font family name
    pub family: String,
    /// Size in points
    pub size: u32,
}

impl FontSpec {
    /// Bold text style in the given colour
    pub fn text_style(&self, color: RGBColor) -> TextStyle<'_> {
        FontDesc::new(
            FontFamily::from(self.family.as_str()),
            f64::from(self.size),
            FontStyle::Bold,
        )
        .color(&color)
    }
}

/// Margin and label area sizes in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarginConfig {
    /// Gap between the canvas edge and the chart
    pub outer: u32,
    /// Height reserved under the x axis
    pub x_label_area: u32,
    /// Width reserved left of the y axis
    pub y_label_area: u32,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            outer: 20,
            x_label_area: 70,
            y_label_area: 80,
        }
    }
}

/// Resolved styling passed to every render call.
///
/// Colours are parsed once here so renderers only deal with `RGBColor`.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    /// Series colours, cycled in order
    pub palette: Vec<RGBColor>,
    /// Canvas fill
    pub background_color: RGBColor,
    /// Titles, descriptions, and tick labels
    pub text_color: RGBColor,
    /// Horizontal gridlines
    pub grid_color: RGBColor,
    /// Dash the gridlines instead of drawing them solid
    pub dashed_grid: bool,
    /// Chart titles
    pub title_font: FontSpec,
    /// Axis text and legends
    pub axis_font: FontSpec,
    /// Chart margins and label areas
    pub margins: MarginConfig,
    /// Canvas size of the line and bar charts
    pub wide_size: (u32, u32),
    /// Canvas edge of the pie chart
    pub square_size: u32,
}

impl StyleConfig {
    /// Build from the styling and graph sections of the configuration
    pub fn new(styling: &StylingConfig, graphs: &GraphsConfig) -> Self {
        let mut palette: Vec<RGBColor> = styling
            .palette
            .iter()
            .filter_map(|color| parse_color(color))
            .collect();
        if palette.is_empty() {
            palette = DEFAULT_PALETTE.iter().filter_map(|color| parse_color(color)).collect();
        }

        Self {
            palette,
            background_color: parse_color(&styling.background_color).unwrap_or(WHITE),
            text_color: parse_color(&styling.text_color).unwrap_or(BLACK),
            grid_color: parse_color(&styling.grid_color).unwrap_or(RGBColor(211, 211, 211)),
            dashed_grid: styling.dashed_grid,
            title_font: FontSpec {
                family: styling.font_family.clone(),
                size: styling.title_font_size,
            },
            axis_font: FontSpec {
                family: styling.font_family.clone(),
                size: styling.axis_font_size,
            },
            margins: MarginConfig::default(),
            wide_size: (graphs.wide_width, graphs.wide_height),
            square_size: graphs.square_size,
        }
    }

    /// Palette colour for series `index`, cycling when the palette runs out
    pub fn color(&self, index: usize) -> RGBColor {
        if self.palette.is_empty() {
            return BLACK;
        }
        self.palette[index % self.palette.len()]
    }

    /// Text style for chart titles
    pub fn title_style(&self) -> TextStyle<'_> {
        self.title_font.text_style(self.text_color)
    }

    /// Text style for axis text
    pub fn axis_style(&self) -> TextStyle<'_> {
        self.axis_font.text_style(self.text_color)
    }
}

impl From<&Config> for StyleConfig {
    fn from(config: &Config) -> Self {
        Self::new(&config.styling, &config.graphs)
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Parse a `#RRGGBB` colour string
pub fn parse_color(color_str: &str) -> Option<RGBColor> {
    let hex = color_str.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(RGBColor(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

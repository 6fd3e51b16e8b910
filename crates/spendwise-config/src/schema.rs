//! Configuration schema definitions using serde with validation attributes.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

/// Main configuration structure for the chart renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Input dataset configuration.
    #[validate(nested)]
    pub data: DataConfig,
    /// Output directory configuration.
    #[validate(nested)]
    pub output: OutputConfig,
    /// Per-graph switches and canvas sizes.
    #[validate(nested)]
    pub graphs: GraphsConfig,
    /// Colours and fonts shared by every chart.
    #[validate(nested)]
    pub styling: StylingConfig,
    /// Logging configuration.
    #[validate(nested)]
    pub logging: LoggingConfig,
}

/// Input dataset configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DataConfig {
    /// Path to the JSON transaction dataset.
    #[validate(custom(function = "crate::validation::validate_file_path", message = "Dataset path is not a usable file path"))]
    pub dataset_path: String,
}

impl DataConfig {
    /// The dataset location as a path.
    pub fn dataset_path(&self) -> &Path {
        Path::new(&self.dataset_path)
    }
}

/// Output directory configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the chart images are written into.
    #[validate(custom(function = "crate::validation::validate_file_path", message = "Output directory is not a usable path"))]
    pub directory: String,
    /// Create the output directory when it does not exist instead of failing.
    pub create_missing_dir: bool,
}

impl OutputConfig {
    /// Full path of an image inside the output directory.
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        Path::new(&self.directory).join(file_name)
    }
}

/// Per-graph switches and canvas sizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GraphsConfig {
    /// Which graphs are generated.
    pub enabled: EnabledGraphsConfig,
    /// Width of the line and bar charts in pixels.
    #[validate(range(min = 200, max = 4000, message = "Width must be between 200 and 4000 pixels"))]
    pub wide_width: u32,
    /// Height of the line and bar charts in pixels.
    #[validate(range(min = 200, max = 4000, message = "Height must be between 200 and 4000 pixels"))]
    pub wide_height: u32,
    /// Edge length of the square pie chart in pixels.
    #[validate(range(min = 200, max = 4000, message = "Pie chart size must be between 200 and 4000 pixels"))]
    pub square_size: u32,
}

/// Enabled graphs configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnabledGraphsConfig {
    /// Total spending over time.
    pub expense: bool,
    /// Spending by category.
    pub category: bool,
    /// Payment mode distribution.
    pub payment_mode: bool,
    /// Impulse vs need purchases by category.
    pub impulse_need: bool,
}

/// Colours and fonts shared by every chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct StylingConfig {
    /// Series colours, cycled in order.
    #[validate(custom(function = "crate::validation::validate_palette", message = "Palette must list at least one #RRGGBB colour"))]
    pub palette: Vec<String>,
    /// Canvas background colour.
    #[validate(custom(function = "crate::validation::validate_hex_color", message = "Background color must be a #RRGGBB hex color"))]
    pub background_color: String,
    /// Colour of titles, axis descriptions, and tick labels.
    #[validate(custom(function = "crate::validation::validate_hex_color", message = "Text color must be a #RRGGBB hex color"))]
    pub text_color: String,
    /// Colour of the horizontal gridlines.
    #[validate(custom(function = "crate::validation::validate_hex_color", message = "Grid color must be a #RRGGBB hex color"))]
    pub grid_color: String,
    /// Draw gridlines dashed rather than solid.
    pub dashed_grid: bool,
    /// Font family for all text.
    #[validate(length(min = 1, message = "Font family cannot be empty"))]
    pub font_family: String,
    /// Title font size in points.
    #[validate(range(min = 8, max = 72, message = "Title font size must be between 8 and 72"))]
    pub title_font_size: u32,
    /// Axis text font size in points.
    #[validate(range(min = 6, max = 72, message = "Axis font size must be between 6 and 72"))]
    pub axis_font_size: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level filter (trace, debug, info, warn, error, or `target=level` directives).
    #[validate(custom(function = "crate::validation::validate_log_level", message = "Log level must be trace, debug, info, warn, error, or target=level directives"))]
    pub level: String,
    /// Optional log file path.
    pub file: Option<String>,
    /// Multi-line, coloured console output.
    pub pretty: bool,
    /// Log span open and close events.
    pub spans: bool,
    /// Prefix each line with the module that emitted it.
    pub targets: bool,
}

impl From<&LoggingConfig> for spendwise_common::LoggingConfig {
    fn from(config: &LoggingConfig) -> Self {
        Self {
            level: config.level.clone(),
            pretty_format: config.pretty,
            file_path: config.file.clone(),
            include_spans: config.spans,
            include_targets: config.targets,
        }
    }
}

impl Config {
    /// Comprehensive validation of the entire configuration
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()
    }
}

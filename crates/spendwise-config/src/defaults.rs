//! Default values. They reproduce the fixed paths and styling the charts
//! were first published with.

use crate::schema::*;

/// Default dataset location, relative to the working directory.
pub const DEFAULT_DATASET_PATH: &str = "dataset.json";
/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "static";
/// Three blue shades used for every series.
pub const DEFAULT_PALETTE: [&str; 3] = ["#4A90E2", "#8AB8E2", "#A1C6E5"];

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            output: OutputConfig::default(),
            graphs: GraphsConfig::default(),
            styling: StylingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dataset_path: DEFAULT_DATASET_PATH.to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: DEFAULT_OUTPUT_DIR.to_string(),
            create_missing_dir: false,
        }
    }
}

impl Default for GraphsConfig {
    fn default() -> Self {
        Self {
            enabled: EnabledGraphsConfig::default(),
            wide_width: 1000,
            wide_height: 600,
            square_size: 600,
        }
    }
}

impl Default for EnabledGraphsConfig {
    fn default() -> Self {
        Self {
            expense: true,
            category: true,
            payment_mode: true,
            impulse_need: true,
        }
    }
}

impl Default for StylingConfig {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.iter().map(|c| (*c).to_string()).collect(),
            background_color: "#FFFFFF".to_string(),
            text_color: "#000000".to_string(),
            grid_color: "#D3D3D3".to_string(),
            dashed_grid: true,
            font_family: "sans-serif".to_string(),
            title_font_size: 16,
            axis_font_size: 12,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            pretty: true,
            spans: false,
            targets: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_defaults_match_published_layout() {
        let config = Config::default();
        assert_eq!(config.data.dataset_path, "dataset.json");
        assert_eq!(
            config.output.path_for("expense_graph.png"),
            std::path::Path::new("static").join("expense_graph.png")
        );
        assert!(!config.output.create_missing_dir);
        assert_eq!(config.styling.palette, vec!["#4A90E2", "#8AB8E2", "#A1C6E5"]);
        assert_eq!((config.graphs.wide_width, config.graphs.wide_height), (1000, 600));
        assert_eq!(config.graphs.square_size, 600);
    }
}

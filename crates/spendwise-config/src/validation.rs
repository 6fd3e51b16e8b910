//! Validation utilities and regex patterns

use regex::Regex;
use std::sync::LazyLock;
use validator::ValidationError;

/// Regex pattern for validating hex color codes (e.g., #FFFFFF, #4a90e2)
pub static HEX_COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("Invalid hex color regex pattern")
});

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Validate a `#RRGGBB` colour
pub fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    if HEX_COLOR_REGEX.is_match(color) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_hex_color"))
    }
}

/// Validate a series palette: non-empty, every entry a `#RRGGBB` colour
pub fn validate_palette(palette: &[String]) -> Result<(), ValidationError> {
    if palette.is_empty() {
        return Err(ValidationError::new("empty_palette"));
    }
    if palette.iter().all(|color| HEX_COLOR_REGEX.is_match(color)) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_palette_color"))
    }
}

/// Validate a level filter: comma-separated levels or `target=level` directives
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    if level.trim().is_empty() {
        return Err(ValidationError::new("empty_log_level"));
    }

    let valid = level.split(',').map(str::trim).all(|directive| {
        let level = directive
            .rsplit_once('=')
            .map_or(directive, |(target, level)| if target.is_empty() { "" } else { level });
        LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str())
    });

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_log_level"))
    }
}

/// Validate file path (basic check for valid path characters)
pub fn validate_file_path(path: &str) -> Result<(), ValidationError> {
    if path.trim().is_empty() {
        return Err(ValidationError::new("empty_file_path"));
    }

    // Colon is allowed for Windows drive letters (C:\)
    let invalid_chars = ['<', '>', '"', '|', '?', '*', '\0'];
    if path.chars().any(|c| invalid_chars.contains(&c)) {
        return Err(ValidationError::new("invalid_file_path_characters"));
    }

    Ok(())
}

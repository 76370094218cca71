//! Runtime validation of a loaded configuration.

use crate::loader::ConfigError;
use crate::schema::*;
use sinadef_common::Result;

/// Smallest accepted image side, in pixels.
pub const MIN_DIMENSION: u32 = 100;
/// Largest accepted image side, in pixels.
pub const MAX_DIMENSION: u32 = 8000;
/// Most calendar years one chart may overlay.
pub const MAX_YEARS: u32 = 100;

/// Whether `value` is a `#RRGGBB` colour.
pub fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

fn ensure(condition: bool, message: impl FnOnce() -> String) -> std::result::Result<(), ConfigError> {
    if condition {
        Ok(())
    } else {
        Err(ConfigError::Invalid(message()))
    }
}

impl InputConfig {
    fn validate(&self) -> std::result::Result<(), ConfigError> {
        ensure(self.delimiter.len() == 1, || {
            format!(
                "input.delimiter must be a single byte, got {:?}",
                self.delimiter
            )
        })?;
        ensure(!self.date_column.trim().is_empty(), || {
            "input.date_column cannot be empty".to_string()
        })?;
        ensure(!self.region_column.trim().is_empty(), || {
            "input.region_column cannot be empty".to_string()
        })
    }
}

impl PipelineConfig {
    fn validate(&self) -> std::result::Result<(), ConfigError> {
        ensure(self.window_size >= 1, || {
            "pipeline.window_size must be at least 1".to_string()
        })?;
        ensure((1..=MAX_YEARS).contains(&self.years), || {
            format!(
                "pipeline.years must be between 1 and {MAX_YEARS}, got {}",
                self.years
            )
        })?;
        ensure(self.lookahead_months <= 11, || {
            format!(
                "pipeline.lookahead_months must be at most 11, got {}",
                self.lookahead_months
            )
        })
    }
}

impl LabelsConfig {
    fn validate(&self) -> std::result::Result<(), ConfigError> {
        ensure(self.month_abbreviations.len() == 12, || {
            format!(
                "labels.month_abbreviations needs 12 entries, got {}",
                self.month_abbreviations.len()
            )
        })
    }
}

impl OutputConfig {
    fn validate(&self) -> std::result::Result<(), ConfigError> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            ensure((MIN_DIMENSION..=MAX_DIMENSION).contains(&value), || {
                format!(
                    "output.{name} must be between {MIN_DIMENSION} and {MAX_DIMENSION}, got {value}"
                )
            })?;
        }
        ensure(!self.extension.trim().is_empty(), || {
            "output.extension cannot be empty".to_string()
        })
    }
}

impl StylingConfig {
    fn validate(&self) -> std::result::Result<(), ConfigError> {
        ensure(!self.palette.is_empty(), || {
            "styling.palette needs at least one colour".to_string()
        })?;
        let named = [
            ("background_color", &self.background_color),
            ("grid_color", &self.grid_color),
            ("label_color", &self.label_color),
        ];
        for (name, color) in named {
            ensure(is_hex_color(color), || {
                format!("styling.{name} must be a #RRGGBB colour, got {color:?}")
            })?;
        }
        for color in &self.palette {
            ensure(is_hex_color(color), || {
                format!("styling.palette entry must be a #RRGGBB colour, got {color:?}")
            })?;
        }
        Ok(())
    }
}

impl Config {
    /// Validates every section, reporting the first problem found.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.input.validate()?;
        self.pipeline.validate()?;
        self.labels.validate()?;
        self.output.validate()?;
        self.styling.validate()?;
        if let Some(empty) = self.regions.iter().position(|r| r.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "regions[{empty}] cannot be empty"
            )));
        }
        Ok(())
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration.
    pub fn validate(config: &Config) -> Result<()> {
        config.validate().map_err(Into::into)
    }
}

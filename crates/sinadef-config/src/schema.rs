//! Configuration schema definitions using serde.
//!
//! Every section carries `#[serde(default)]`, so a file only needs the keys
//! it changes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source file configuration.
    pub input: InputConfig,
    /// Engine parameters.
    pub pipeline: PipelineConfig,
    /// Departments charted after the nationwide total.
    pub regions: Vec<String>,
    /// Month tables, titles and captions.
    pub labels: LabelsConfig,
    /// Where and how charts are written.
    pub output: OutputConfig,
    /// Chart colours and fonts.
    pub styling: StylingConfig,
    /// Logging configuration.
    pub logging: LogConfig,
}

/// Source file configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Path to the delimited export.
    pub path: PathBuf,
    /// Field delimiter.
    pub delimiter: String,
    /// Header of the date column.
    pub date_column: String,
    /// Header of the region column.
    pub region_column: String,
}

/// Engine parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Records dropped from the end after sorting.
    pub tail_trim: usize,
    /// Rolling mean window, in available daily entries.
    pub window_size: usize,
    /// Calendar years overlaid on each chart.
    pub years: u32,
    /// Months past the current one kept on the current year's axis.
    pub lookahead_months: u32,
    /// Fixed "today" for reproducible runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_date: Option<NaiveDate>,
}

/// Month tables, titles and captions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelsConfig {
    /// Three-letter month abbreviations, January first.
    pub month_abbreviations: Vec<String>,
    /// Title of the nationwide chart.
    pub nationwide_name: String,
    /// Text preceding the run date in the subtitle.
    pub title_prefix: String,
    /// `strftime` pattern for the run date in the subtitle.
    pub date_format: String,
    /// Caption handed to the publisher with the nationwide chart.
    pub caption: String,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving the chart images.
    pub directory: PathBuf,
    /// Image file extension.
    pub extension: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Whether charts are rendered at all.
    pub render: bool,
}

/// Chart colours and fonts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StylingConfig {
    /// Figure and plot background.
    pub background_color: String,
    /// Grid lines and frame.
    pub grid_color: String,
    /// Tick labels.
    pub label_color: String,
    /// Font family for all text.
    pub font_family: String,
    /// Tick label size in points.
    pub font_size: u32,
    /// Title size in points.
    pub title_font_size: u32,
    /// One colour per overlaid year, oldest first; cycled if short.
    pub palette: Vec<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Level filter, e.g. `info` or `sinadef_series=debug`.
    pub level: String,
    /// Emit JSON lines instead of text.
    pub json_format: bool,
    /// Append logs to this file instead of stderr.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl LogConfig {
    /// The logging setup for [`sinadef_common::init_logging`].
    pub fn to_logging_config(&self) -> sinadef_common::LoggingConfig {
        sinadef_common::LoggingConfig {
            level: self.level.clone(),
            json_format: self.json_format,
            file_path: self.file.clone(),
            ..sinadef_common::LoggingConfig::default()
        }
    }
}

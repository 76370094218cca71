//! Command-line arguments.

use chrono::NaiveDate;
use clap::Parser;
use sinadef_config::Config;
use std::path::PathBuf;

/// Smoothed year-over-year overlays of SINADEF daily deaths.
#[derive(Debug, Clone, Parser)]
#[command(name = "sinadef", version, about)]
pub struct Cli {
    /// YAML configuration file (defaults to `SINADEF_CONFIG_PATH`, then `sinadef.yaml`).
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Delimited SINADEF export to read.
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Date treated as today, as YYYY-MM-DD.
    #[arg(long, value_name = "DATE")]
    pub today: Option<NaiveDate>,

    /// Department to chart; repeat for several. Replaces the configured list.
    #[arg(short, long = "region", value_name = "NAME")]
    pub regions: Vec<String>,

    /// Only build the nationwide chart.
    #[arg(long, conflicts_with = "regions")]
    pub nationwide_only: bool,

    /// Build charts without writing images.
    #[arg(long)]
    pub no_render: bool,

    /// Write every built chart as JSON to this file.
    #[arg(long, value_name = "PATH")]
    pub export_json: Option<PathBuf>,

    /// Directory for rendered images.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `sinadef_series=trace`.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    /// Applies the command-line overrides on top of a loaded configuration.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(input) = &self.input {
            config.input.path.clone_from(input);
        }
        if let Some(today) = self.today {
            config.pipeline.current_date = Some(today);
        }
        if self.nationwide_only {
            config.regions.clear();
        } else if !self.regions.is_empty() {
            config.regions.clone_from(&self.regions);
        }
        if self.no_render {
            config.output.render = false;
        }
        if let Some(directory) = &self.output_dir {
            config.output.directory.clone_from(directory);
        }
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
    }
}

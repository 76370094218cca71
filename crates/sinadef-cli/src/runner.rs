//! Run orchestration: configuration, loading, charting, rendering and export.

use crate::args::Cli;
use crate::error::{CliError, CliResult};
use chrono::NaiveDate;
use sinadef_common::{init_logging, SinadefError};
use sinadef_config::{Config, ConfigLoader, ConfigValidator};
use sinadef_series::{
    export_json, load_records, render_chart, BitMapRenderer, ChartOutcome, ChartPipeline,
    ChartSpec, LoaderOptions, Publication,
};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// What a completed run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Charts attempted, nationwide included.
    pub charts_attempted: usize,
    /// Charts built successfully.
    pub charts_built: usize,
    /// Images written.
    pub rendered: Vec<PathBuf>,
    /// Built charts whose image could not be written.
    pub render_failures: usize,
    /// JSON export file, if one was requested.
    pub exported: Option<PathBuf>,
    /// Nationwide image and caption, once that image exists.
    pub publication: Option<Publication>,
}

/// Loads configuration, applies the command-line overrides and validates.
pub fn load_config(cli: &Cli) -> CliResult<Config> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
    .map_err(CliError::Config)?;

    cli.apply_to(&mut config);
    ConfigValidator::validate(&config).map_err(CliError::Config)?;
    Ok(config)
}

/// The configuration file [`load_config`] reads, if any.
pub fn config_source<F>(cli: &Cli, lookup: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    cli.config.clone().or_else(|| ConfigLoader::discover(lookup))
}

/// Runs the binary: configuration, logging, then [`execute`] with the local date.
pub fn run(cli: &Cli) -> CliResult<RunSummary> {
    let config = load_config(cli)?;
    init_logging(&config.logging.to_logging_config())
        .map_err(|e| CliError::Logging(e.to_string()))?;

    // The subscriber only exists once the configuration is known.
    match config_source(cli, |var| std::env::var(var).ok()) {
        Some(path) => info!(path = %path.display(), "Configuration loaded"),
        None => info!("No configuration file found, using defaults"),
    }
    debug!(?config, "Effective configuration");

    let today = chrono::Local::now().date_naive();
    execute(&config, today, cli.export_json.as_deref())
}

/// Builds, renders and exports every chart for an already loaded configuration.
///
/// `today` is the clock value; `pipeline.current_date` takes precedence over it.
pub fn execute(config: &Config, today: NaiveDate, export_path: Option<&Path>) -> CliResult<RunSummary> {
    let pipeline = ChartPipeline::from_config(config, today).map_err(CliError::Config)?;
    let settings = pipeline.settings();
    info!(
        today = %settings.today,
        window = settings.window_size,
        years = settings.years,
        regions = config.regions.len(),
        "Starting run"
    );

    let options =
        LoaderOptions::from_config(&config.input, settings.tail_trim).map_err(CliError::Config)?;
    let records = load_records(&config.input.path, &options).map_err(CliError::Input)?;

    let outcomes = pipeline.run(&records, &config.regions);
    let charts: Vec<&ChartSpec> = outcomes.iter().filter_map(ChartOutcome::chart).collect();
    info!(
        built = charts.len(),
        failed = outcomes.len() - charts.len(),
        "Charts built"
    );
    if charts.is_empty() {
        return Err(CliError::AllChartsFailed {
            attempted: outcomes.len(),
        });
    }

    let mut summary = RunSummary {
        charts_attempted: outcomes.len(),
        charts_built: charts.len(),
        ..RunSummary::default()
    };

    if config.output.render {
        let renderer = BitMapRenderer::from_config(&config.output, &config.styling)
            .map_err(CliError::Config)?;
        let mut last_error: Option<SinadefError> = None;
        for chart in &charts {
            match render_chart(&renderer, chart, &config.output.directory) {
                Ok(path) => summary.rendered.push(path),
                Err(err) => {
                    error!(scope = %chart.scope, error = %err, "Chart could not be rendered");
                    summary.render_failures += 1;
                    last_error = Some(err);
                }
            }
        }
        if let Some(err) = last_error.filter(|_| summary.rendered.is_empty()) {
            return Err(CliError::Output(err));
        }
    } else {
        info!("Rendering disabled");
    }

    if let Some(path) = export_path {
        export_json(path, charts.iter().copied()).map_err(CliError::Output)?;
        summary.exported = Some(path.to_path_buf());
    }

    summary.publication = pipeline
        .publication(&outcomes, &config.output.directory)
        .filter(|publication| summary.rendered.contains(&publication.image_path));

    info!(
        rendered = summary.rendered.len(),
        render_failures = summary.render_failures,
        "Run complete"
    );
    Ok(summary)
}

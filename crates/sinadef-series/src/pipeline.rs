//! Per-chart orchestration of the engine stages.

use crate::axis::{derive_axes, AxisSpec};
use crate::counter::count_daily;
use crate::filter::{filter_region, known_regions};
use crate::segmenter::{segment_bounds, SegmentBounds, YearSegment};
use crate::smoother::smooth;
use crate::traits::ChartRenderer;
use serde::Serialize;
use sinadef_common::{ChartScope, Record, Result, SinadefError, SmoothedSeries};
use sinadef_config::{Config, EngineSettings, LabelsConfig};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// File stem of the nationwide chart.
pub const NATIONWIDE_FILE_STEM: &str = "peru";

/// A chart ready to be rendered or exported.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    /// What the chart covers.
    pub scope: ChartScope,
    /// First title line, upper-cased.
    pub title: String,
    /// Second title line with the run date.
    pub subtitle: String,
    /// Image file name inside the output directory.
    pub file_name: String,
    /// The full smoothed series the segments point into.
    pub smoothed: SmoothedSeries,
    /// Where each overlaid year sits in `smoothed`, oldest first.
    pub bounds: Vec<SegmentBounds>,
    /// Axis layout.
    pub axis: AxisSpec,
}

impl ChartSpec {
    /// The overlaid year segments, oldest first.
    pub fn segments(&self) -> Vec<YearSegment<'_>> {
        self.bounds
            .iter()
            .map(|bounds| bounds.view(&self.smoothed))
            .collect()
    }
}

/// Result of building one chart.
#[derive(Debug)]
pub struct ChartOutcome {
    /// The chart attempted.
    pub scope: ChartScope,
    /// The chart, or why it could not be built.
    pub result: Result<ChartSpec>,
}

impl ChartOutcome {
    /// The chart if it was built.
    pub fn chart(&self) -> Option<&ChartSpec> {
        self.result.as_ref().ok()
    }
}

/// What a publisher needs to post the nationwide chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Publication {
    /// Rendered image.
    pub image_path: PathBuf,
    /// Accompanying text.
    pub caption: String,
}

/// Runs filter, count, smooth, segment and axis derivation for each chart.
#[derive(Debug, Clone)]
pub struct ChartPipeline {
    settings: EngineSettings,
    labels: LabelsConfig,
    extension: String,
    subtitle: String,
}

impl ChartPipeline {
    /// Creates a pipeline; fails if the subtitle date format is invalid.
    pub fn new(
        settings: EngineSettings,
        labels: LabelsConfig,
        extension: impl Into<String>,
    ) -> Result<Self> {
        let mut run_date = String::new();
        write!(run_date, "{}", settings.today.format(&labels.date_format)).map_err(|_| {
            SinadefError::config(format!(
                "Invalid subtitle date format {:?}",
                labels.date_format
            ))
        })?;
        let subtitle = format!("{} {run_date}", labels.title_prefix);

        Ok(Self {
            settings,
            labels,
            extension: extension.into(),
            subtitle,
        })
    }

    /// Creates a pipeline from the loaded configuration and the clock's date.
    pub fn from_config(config: &Config, today: chrono::NaiveDate) -> Result<Self> {
        Self::new(
            config.engine_settings(today),
            config.labels.clone(),
            config.output.extension.clone(),
        )
    }

    /// The settings this pipeline runs with.
    pub const fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Subtitle shared by every chart of the run.
    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    /// Nationwide first, then each region in the given order.
    pub fn scopes(regions: &[String]) -> Vec<ChartScope> {
        std::iter::once(ChartScope::Nationwide)
            .chain(regions.iter().cloned().map(ChartScope::Region))
            .collect()
    }

    /// Title line for a scope.
    pub fn title_for(&self, scope: &ChartScope) -> String {
        match scope {
            ChartScope::Nationwide => self.labels.nationwide_name.to_uppercase(),
            ChartScope::Region(name) => name.to_uppercase(),
        }
    }

    /// Image file name for a scope.
    pub fn file_name_for(&self, scope: &ChartScope) -> String {
        let stem = match scope {
            ChartScope::Nationwide => NATIONWIDE_FILE_STEM.to_string(),
            ChartScope::Region(name) => name.replace(['/', '\\'], "_"),
        };
        format!("{stem}.{}", self.extension)
    }

    /// Builds one chart from the loaded records.
    pub fn build_chart(&self, records: &[Record], scope: &ChartScope) -> Result<ChartSpec> {
        let filtered = filter_region(records, scope.region());
        debug!(%scope, records = filtered.len(), "Filtered records");

        let daily = count_daily(filtered.iter().copied());
        let smoothed = smooth(&daily, self.settings.window_size)?;
        let bounds = segment_bounds(
            &smoothed,
            self.settings.today,
            self.settings.years,
            self.settings.lookahead_months,
        );

        let axis = {
            let segments: Vec<YearSegment<'_>> =
                bounds.iter().map(|b| b.view(&smoothed)).collect();
            derive_axes(&segments, &self.labels.month_abbreviations)
        };

        Ok(ChartSpec {
            scope: scope.clone(),
            title: self.title_for(scope),
            subtitle: self.subtitle.clone(),
            file_name: self.file_name_for(scope),
            smoothed,
            bounds,
            axis,
        })
    }

    /// Builds the nationwide chart and one chart per region.
    ///
    /// Regions are independent: one failing does not stop the rest. A region
    /// absent from the data is reported with a warning and then fails like any
    /// other empty series.
    pub fn run(&self, records: &[Record], regions: &[String]) -> Vec<ChartOutcome> {
        let known = known_regions(records);
        for region in regions {
            if !known.contains(region.as_str()) {
                let unknown = SinadefError::UnknownRegion {
                    region: region.clone(),
                };
                warn!(%region, "{unknown}");
            }
        }

        Self::scopes(regions)
            .into_iter()
            .map(|scope| {
                let result = self.build_chart(records, &scope);
                if let Err(err) = &result {
                    error!(%scope, error = %err, "Chart could not be built");
                }
                ChartOutcome { scope, result }
            })
            .collect()
    }

    /// The nationwide chart's image and caption, if it was built.
    pub fn publication(&self, outcomes: &[ChartOutcome], directory: &Path) -> Option<Publication> {
        outcomes
            .iter()
            .filter(|outcome| outcome.scope == ChartScope::Nationwide)
            .find_map(ChartOutcome::chart)
            .map(|chart| Publication {
                image_path: directory.join(&chart.file_name),
                caption: self.labels.caption.clone(),
            })
    }
}

/// Renders `chart` into `directory`, creating it if needed.
pub fn render_chart<R>(renderer: &R, chart: &ChartSpec, directory: &Path) -> Result<PathBuf>
where
    R: ChartRenderer + ?Sized,
{
    std::fs::create_dir_all(directory)?;
    let path = directory.join(&chart.file_name);
    renderer.render_to_file(chart, &path)?;
    info!(
        scope = %chart.scope,
        renderer = renderer.name(),
        path = %path.display(),
        "Chart written"
    );
    Ok(path)
}

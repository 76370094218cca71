//! JSON export of built charts for external renderers.

use crate::axis::AxisSpec;
use crate::pipeline::ChartSpec;
use crate::segmenter::YearSegment;
use serde::Serialize;
use sinadef_common::{ChartScope, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Serialized shape of one chart.
#[derive(Debug, Serialize)]
pub struct ChartExport<'a> {
    /// What the chart covers.
    pub scope: &'a ChartScope,
    /// First title line.
    pub title: &'a str,
    /// Second title line.
    pub subtitle: &'a str,
    /// Image file name a renderer would use.
    pub file_name: &'a str,
    /// Overlaid year segments, oldest first.
    pub segments: Vec<YearSegment<'a>>,
    /// Axis layout.
    pub axis: &'a AxisSpec,
}

impl<'a> From<&'a ChartSpec> for ChartExport<'a> {
    fn from(chart: &'a ChartSpec) -> Self {
        Self {
            scope: &chart.scope,
            title: &chart.title,
            subtitle: &chart.subtitle,
            file_name: &chart.file_name,
            segments: chart.segments(),
            axis: &chart.axis,
        }
    }
}

/// Writes `charts` as a pretty-printed JSON array.
pub fn write_json<'a, W, I>(writer: W, charts: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a ChartSpec>,
{
    let exports: Vec<ChartExport<'a>> = charts.into_iter().map(ChartExport::from).collect();
    serde_json::to_writer_pretty(writer, &exports)?;
    Ok(())
}

/// Writes `charts` to the JSON file at `path`.
pub fn export_json<'a, I>(path: &Path, charts: I) -> Result<()>
where
    I: IntoIterator<Item = &'a ChartSpec>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    write_json(&mut writer, charts)?;
    writer.flush()?;
    info!(path = %path.display(), "Chart data exported");
    Ok(())
}

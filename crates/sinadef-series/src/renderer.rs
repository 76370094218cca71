//! Bitmap chart rendering with plotters.

use crate::pipeline::ChartSpec;
use crate::traits::ChartRenderer;
use chrono::NaiveDate;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use sinadef_common::{Result, SinadefError};
use sinadef_config::{OutputConfig, StylingConfig};
use std::path::Path;

/// Pixels between the plot frame and tick labels.
const LABEL_GAP: i32 = 6;

/// Resolved colours and fonts for drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartStyle {
    /// Figure and plot background.
    pub background: RGBColor,
    /// Grid lines and frame.
    pub grid: RGBColor,
    /// Tick labels and titles.
    pub label: RGBColor,
    /// Font family for all text.
    pub font_family: String,
    /// Tick label size.
    pub font_size: u32,
    /// Title size.
    pub title_font_size: u32,
    /// One colour per overlaid year, cycled.
    pub palette: Vec<RGBColor>,
}

impl ChartStyle {
    /// Resolves the `styling` section, rejecting malformed colours.
    pub fn from_config(styling: &StylingConfig) -> Result<Self> {
        let palette = styling
            .palette
            .iter()
            .map(String::as_str)
            .map(parse_color)
            .collect::<Result<Vec<_>>>()?;
        if palette.is_empty() {
            return Err(SinadefError::config("Chart palette needs at least one colour"));
        }
        Ok(Self {
            background: parse_color(&styling.background_color)?,
            grid: parse_color(&styling.grid_color)?,
            label: parse_color(&styling.label_color)?,
            font_family: styling.font_family.clone(),
            font_size: styling.font_size,
            title_font_size: styling.title_font_size,
            palette,
        })
    }

    /// Colour of the `index`-th overlaid year.
    pub fn series_color(&self, index: usize) -> RGBColor {
        self.palette[index % self.palette.len()]
    }
}

/// Parses a `#RRGGBB` colour.
pub fn parse_color(color_str: &str) -> Result<RGBColor> {
    let invalid = || SinadefError::config(format!("Invalid colour {color_str:?}, expected #RRGGBB"));
    let hex = color_str.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
    };
    Ok(RGBColor(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Renders charts into bitmap files (JPEG, PNG, BMP by extension).
#[derive(Debug, Clone)]
pub struct BitMapRenderer {
    style: ChartStyle,
    width: u32,
    height: u32,
}

impl BitMapRenderer {
    /// Creates a renderer drawing `width` × `height` images.
    pub const fn new(style: ChartStyle, width: u32, height: u32) -> Self {
        Self {
            style,
            width,
            height,
        }
    }

    /// Creates a renderer from the `output` and `styling` sections.
    pub fn from_config(output: &OutputConfig, styling: &StylingConfig) -> Result<Self> {
        Ok(Self::new(
            ChartStyle::from_config(styling)?,
            output.width,
            output.height,
        ))
    }
}

/// Horizontal position of `date`, in days after `origin`.
#[allow(clippy::cast_precision_loss)]
pub fn day_offset(origin: NaiveDate, date: NaiveDate) -> f64 {
    (date - origin).num_days() as f64
}

impl ChartRenderer for BitMapRenderer {
    fn render_to_file(&self, chart: &ChartSpec, path: &Path) -> Result<()> {
        let (origin, last_day) = chart
            .axis
            .time_range()
            .ok_or_else(|| SinadefError::render("Chart has no time axis ticks"))?;
        let x_max = day_offset(origin, last_day) + 1.0;
        let count = &chart.axis.count_axis;
        let style = &self.style;

        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&style.background)?;

        let title_style = (style.font_family.as_str(), style.title_font_size)
            .into_font()
            .color(&style.label);
        let subtitle_style = (style.font_family.as_str(), style.font_size + 2)
            .into_font()
            .color(&style.label);
        let plot_area = root
            .titled(&chart.title, title_style)?
            .titled(&chart.subtitle, subtitle_style)?;

        let mut ctx = ChartBuilder::on(&plot_area)
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(60)
            .build_cartesian_2d(0.0..x_max, count.lower..count.upper)?;

        let grid = style.grid.stroke_width(1);
        ctx.draw_series(count.ticks.iter().map(|tick| {
            #[allow(clippy::cast_precision_loss)]
            let y = tick.value as f64;
            PathElement::new(vec![(0.0, y), (x_max, y)], grid)
        }))?;
        ctx.draw_series(chart.axis.time_ticks.iter().map(|tick| {
            let x = day_offset(origin, tick.date);
            PathElement::new(vec![(x, count.lower), (x, count.upper)], grid)
        }))?;
        ctx.plotting_area().draw(&Rectangle::new(
            [(0.0, count.lower), (x_max, count.upper)],
            grid,
        ))?;

        for (index, segment) in chart.segments().iter().enumerate() {
            if segment.points.is_empty() {
                continue;
            }
            let color = style.series_color(index);
            ctx.draw_series(LineSeries::new(
                segment
                    .points
                    .iter()
                    .map(|point| (day_offset(origin, point.date), point.value)),
                color.stroke_width(2),
            ))?;
        }

        let label_font = (style.font_family.as_str(), style.font_size)
            .into_font()
            .color(&style.label);
        let x_label_style = label_font
            .transform(FontTransform::Rotate270)
            .pos(Pos::new(HPos::Right, VPos::Center));
        for tick in &chart.axis.time_ticks {
            let (px, py) = ctx.backend_coord(&(day_offset(origin, tick.date), count.lower));
            root.draw(&Text::new(
                tick.label.clone(),
                (px, py + LABEL_GAP),
                x_label_style.clone(),
            ))?;
        }

        let y_label_style = label_font.pos(Pos::new(HPos::Right, VPos::Center));
        for tick in &count.ticks {
            #[allow(clippy::cast_precision_loss)]
            let (px, py) = ctx.backend_coord(&(0.0, tick.value as f64));
            root.draw(&Text::new(
                tick.label.clone(),
                (px - LABEL_GAP, py),
                y_label_style.clone(),
            ))?;
        }

        root.present()?;
        tracing::debug!(path = %path.display(), "Rendered chart");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "bitmap"
    }
}

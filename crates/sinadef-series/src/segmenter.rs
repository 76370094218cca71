//! Splitting the smoothed series into calendar-year segments for overlay.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use sinadef_common::{month_end, year_start, SmoothedPoint, SmoothedSeries};
use tracing::debug;

/// One calendar year of the smoothed series, borrowed from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearSegment<'a> {
    /// Calendar year.
    pub year: i32,
    /// Last month shown for this year: 12, or the lookahead cap for the current year.
    pub last_month: u32,
    /// Points dated inside the year, up to the end of `last_month`.
    pub points: &'a [SmoothedPoint],
}

impl YearSegment<'_> {
    /// Largest value in the segment, if any.
    pub fn max_value(&self) -> Option<f64> {
        self.points.iter().map(|p| p.value).reduce(f64::max)
    }
}

/// Position of a [`YearSegment`] inside its series, storable without a borrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SegmentBounds {
    /// Calendar year.
    pub year: i32,
    /// Last month shown for this year.
    pub last_month: u32,
    /// Index of the first point.
    pub start: usize,
    /// One past the index of the last point.
    pub end: usize,
}

impl SegmentBounds {
    /// The segment these bounds describe within `series`.
    pub fn view<'a>(&self, series: &'a SmoothedSeries) -> YearSegment<'a> {
        YearSegment {
            year: self.year,
            last_month: self.last_month,
            points: series.points().get(self.start..self.end).unwrap_or_default(),
        }
    }

    /// Number of points in the segment.
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the segment has no points.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Month the current year's segment stops at: `min(month + lookahead, 12)`.
pub fn lookahead_cap(today: NaiveDate, lookahead_months: u32) -> u32 {
    today.month().saturating_add(lookahead_months).min(12)
}

/// The years overlaid, oldest first: `today.year - (years - 1) ..= today.year`.
pub fn overlay_years(today: NaiveDate, years: u32) -> impl Iterator<Item = i32> {
    let current = today.year();
    let back = i32::try_from(years.saturating_sub(1)).unwrap_or(i32::MAX);
    current.saturating_sub(back)..=current
}

/// Locates each overlaid year inside `series`.
///
/// Prior years span January through December; the current year ends with the
/// lookahead cap. Years without points yield empty bounds.
pub fn segment_bounds(
    series: &SmoothedSeries,
    today: NaiveDate,
    years: u32,
    lookahead_months: u32,
) -> Vec<SegmentBounds> {
    let points = series.points();
    let cap = lookahead_cap(today, lookahead_months);

    let bounds: Vec<SegmentBounds> = overlay_years(today, years)
        .filter_map(|year| {
            let last_month = if year == today.year() { cap } else { 12 };
            let first_day = year_start(year)?;
            let last_day = month_end(year, last_month)?;

            let start = points.partition_point(|p| p.date < first_day);
            let end = points.partition_point(|p| p.date <= last_day);
            Some(SegmentBounds {
                year,
                last_month,
                start,
                end: end.max(start),
            })
        })
        .collect();

    debug!(
        years = bounds.len(),
        points = ?bounds.iter().map(SegmentBounds::len).collect::<Vec<_>>(),
        lookahead_cap = cap,
        "Segmented smoothed series by year"
    );
    bounds
}

/// Borrowed year segments of `series`, oldest year first.
pub fn segment_years(
    series: &SmoothedSeries,
    today: NaiveDate,
    years: u32,
    lookahead_months: u32,
) -> Vec<YearSegment<'_>> {
    segment_bounds(series, today, years, lookahead_months)
        .iter()
        .map(|bounds| bounds.view(series))
        .collect()
}

//! Axis and scale derivation, independent of any rendering backend.

use crate::segmenter::YearSegment;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use sinadef_common::{group_thousands, month_end, month_label};
use tracing::debug;

/// Maximum value up to which the fixed fine scale is used.
pub const FINE_SCALE_LIMIT: f64 = 100.0;
/// Upper bound of the fine scale.
pub const FINE_SCALE_UPPER: f64 = 100.0;
/// Tick interval of the fine scale.
pub const FINE_STEP: u64 = 10;
/// Tick interval of the coarse scale.
pub const COARSE_STEP: u64 = 100;
/// Headroom factor applied to the maximum on the coarse scale.
pub const COARSE_HEADROOM: f64 = 1.2;

/// A labelled month boundary on the time axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeTick {
    /// First day of the month.
    pub date: NaiveDate,
    /// `<abbreviation>/<yy>`, e.g. `ENE/21`.
    pub label: String,
}

/// A labelled value on the count axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountTick {
    /// Tick value.
    pub value: u64,
    /// Thousands-grouped label.
    pub label: String,
}

/// Bounds and ticks of the count axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountAxis {
    /// Always zero.
    pub lower: f64,
    /// Top of the axis.
    pub upper: f64,
    /// Distance between ticks.
    pub step: u64,
    /// Ticks from zero up to the upper bound.
    pub ticks: Vec<CountTick>,
}

/// Everything a renderer needs to lay out both axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    /// One tick per displayed month, oldest first.
    pub time_ticks: Vec<TimeTick>,
    /// Count axis scale.
    pub count_axis: CountAxis,
}

impl AxisSpec {
    /// First and last day covered by the time axis.
    pub fn time_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.time_ticks.first()?.date;
        let last = self.time_ticks.last()?.date;
        Some((first, month_end(last.year(), last.month())?))
    }
}

/// Month ticks for every segment: all twelve months for past years, up to the
/// cap for the current one.
pub fn time_ticks(segments: &[YearSegment<'_>], month_abbreviations: &[String]) -> Vec<TimeTick> {
    segments
        .iter()
        .flat_map(|segment| {
            (1..=segment.last_month).filter_map(move |month| {
                NaiveDate::from_ymd_opt(segment.year, month, 1).map(|date| TimeTick {
                    date,
                    label: month_label(month_abbreviations, month, segment.year),
                })
            })
        })
        .collect()
}

/// Count axis for a maximum plotted value.
///
/// Up to [`FINE_SCALE_LIMIT`] the axis is fixed at 0..100 in steps of 10;
/// above it the top is `1.2 × max` with ticks every 100.
pub fn count_axis(max_value: f64) -> CountAxis {
    let (upper, step) = if max_value > FINE_SCALE_LIMIT {
        (max_value * COARSE_HEADROOM, COARSE_STEP)
    } else {
        (FINE_SCALE_UPPER, FINE_STEP)
    };

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let top = upper.floor() as u64;
    let ticks = (0..=top)
        .step_by(usize::try_from(step).unwrap_or(usize::MAX))
        .map(|value| CountTick {
            value,
            label: group_thousands(value),
        })
        .collect();

    CountAxis {
        lower: 0.0,
        upper,
        step,
        ticks,
    }
}

/// Largest value across all segments, zero when they are all empty.
pub fn segments_max(segments: &[YearSegment<'_>]) -> f64 {
    segments
        .iter()
        .filter_map(YearSegment::max_value)
        .fold(0.0, f64::max)
}

/// Derives both axes from the segments.
pub fn derive_axes(segments: &[YearSegment<'_>], month_abbreviations: &[String]) -> AxisSpec {
    let max_value = segments_max(segments);
    let spec = AxisSpec {
        time_ticks: time_ticks(segments, month_abbreviations),
        count_axis: count_axis(max_value),
    };
    debug!(
        time_ticks = spec.time_ticks.len(),
        max_value,
        upper = spec.count_axis.upper,
        step = spec.count_axis.step,
        "Derived axes"
    );
    spec
}

#[cfg(test)]
mod tests {
    use super::*;
    use sinadef_common::test_utils::{assert_approx_eq, date};
    use sinadef_common::SmoothedPoint;

    fn abbreviations() -> Vec<String> {
        ["ENE", "FEB", "MAR", "ABR", "MAY", "JUN", "JUL", "AGO", "SET", "OCT", "NOV", "DIC"]
            .iter()
            .map(|s| (*s).to_string())
            .collect()
    }

    #[test]
    fn test_time_ticks_respect_cap() {
        let segments = [
            YearSegment { year: 2019, last_month: 12, points: &[] },
            YearSegment { year: 2020, last_month: 12, points: &[] },
            YearSegment { year: 2021, last_month: 5, points: &[] },
        ];
        let ticks = time_ticks(&segments, &abbreviations());

        assert_eq!(ticks.len(), 12 + 12 + 5);
        assert_eq!(ticks[0].label, "ENE/19");
        assert_eq!(ticks[0].date, date(2019, 1, 1));
        assert_eq!(ticks[8].label, "SET/19");
        assert_eq!(ticks[23].label, "DIC/20");
        assert_eq!(ticks.last().unwrap().label, "MAY/21");
        assert_eq!(ticks.last().unwrap().date, date(2021, 5, 1));
    }

    #[test]
    fn test_fine_scale_at_and_below_limit() {
        for max in [0.0, 42.5, 100.0] {
            let axis = count_axis(max);
            assert_approx_eq(axis.upper, 100.0, 0.0);
            assert_eq!(axis.step, 10);
            assert_eq!(axis.ticks.len(), 11);
            assert_eq!(axis.ticks.last().unwrap().value, 100);
        }
    }

    #[test]
    fn test_coarse_scale_above_limit() {
        let axis = count_axis(1_234.0);
        assert_approx_eq(axis.upper, 1_480.8, 1e-9);
        assert_eq!(axis.step, 100);
        assert_eq!(axis.ticks.len(), 15);
        assert_eq!(axis.ticks[10].label, "1,000");
        assert_eq!(axis.ticks.last().unwrap().value, 1_400);
        assert_approx_eq(axis.lower, 0.0, 0.0);
    }

    #[test]
    fn test_just_above_limit_switches_scale() {
        let axis = count_axis(100.5);
        assert_approx_eq(axis.upper, 120.6, 1e-9);
        assert_eq!(axis.step, 100);
        let values: Vec<u64> = axis.ticks.iter().map(|t| t.value).collect();
        assert_eq!(values, vec![0, 100]);
    }

    #[test]
    fn test_max_taken_across_segments() {
        let old = [SmoothedPoint { date: date(2020, 4, 1), value: 250.0 }];
        let new = [SmoothedPoint { date: date(2021, 2, 1), value: 90.0 }];
        let segments = [
            YearSegment { year: 2020, last_month: 12, points: &old },
            YearSegment { year: 2021, last_month: 4, points: &new },
        ];
        assert_approx_eq(segments_max(&segments), 250.0, 0.0);

        let axis = derive_axes(&segments, &abbreviations());
        assert_approx_eq(axis.count_axis.upper, 300.0, 1e-9);
        assert_eq!(axis.time_ticks.len(), 16);
    }

    #[test]
    fn test_empty_segments_use_fine_scale() {
        let segments = [YearSegment { year: 2021, last_month: 3, points: &[] }];
        let axis = derive_axes(&segments, &abbreviations());
        assert_eq!(axis.count_axis.step, 10);
        assert_eq!(axis.time_range(), Some((date(2021, 1, 1), date(2021, 3, 31))));
    }
}

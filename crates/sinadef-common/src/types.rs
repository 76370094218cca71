//! Domain types for records and the series derived from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, SinadefError};

/// One death record from the SINADEF export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Date of death.
    pub date: NaiveDate,
    /// Department of residence, when the row carries one.
    pub region: Option<String>,
}

impl Record {
    /// Creates a record with a region.
    pub fn new(date: NaiveDate, region: impl Into<String>) -> Self {
        Self {
            date,
            region: Some(region.into()),
        }
    }
}

/// Number of records sharing one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    /// The date.
    pub date: NaiveDate,
    /// Records observed on that date.
    pub count: u32,
}

/// Smoothed value attached to a date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothedPoint {
    /// The date closing the averaging window.
    pub date: NaiveDate,
    /// Mean of the counts inside the window.
    pub value: f64,
}

/// Anything carrying a date, so series invariants can be checked generically.
pub trait Dated {
    /// The date of this entry.
    fn date(&self) -> NaiveDate;
}

impl Dated for DailyCount {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for SmoothedPoint {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

fn ensure_strictly_increasing<T: Dated>(points: &[T]) -> Result<()> {
    match points.windows(2).find(|w| w[0].date() >= w[1].date()) {
        Some(w) => Err(SinadefError::malformed(format!(
            "Series dates must be strictly increasing ({} is followed by {})",
            w[0].date(),
            w[1].date()
        ))),
        None => Ok(()),
    }
}

/// Per-date counts, strictly increasing by date, one entry per date present.
///
/// Dates without records are absent rather than zero-filled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailySeries(Vec<DailyCount>);

impl DailySeries {
    /// Builds a series, rejecting duplicate or out-of-order dates.
    pub fn new(points: Vec<DailyCount>) -> Result<Self> {
        ensure_strictly_increasing(&points)?;
        Ok(Self(points))
    }

    /// The entries in date order.
    pub fn points(&self) -> &[DailyCount] {
        &self.0
    }

    /// Number of dates present.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no dates are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Counts in date order.
    pub fn counts(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().map(|p| p.count)
    }
}

impl From<BTreeMap<NaiveDate, u32>> for DailySeries {
    fn from(counts: BTreeMap<NaiveDate, u32>) -> Self {
        Self(
            counts
                .into_iter()
                .map(|(date, count)| DailyCount { date, count })
                .collect(),
        )
    }
}

/// Rolling-mean values, strictly increasing by date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SmoothedSeries(Vec<SmoothedPoint>);

impl SmoothedSeries {
    /// Builds a series, rejecting duplicate or out-of-order dates.
    pub fn new(points: Vec<SmoothedPoint>) -> Result<Self> {
        ensure_strictly_increasing(&points)?;
        Ok(Self(points))
    }

    /// The entries in date order.
    pub fn points(&self) -> &[SmoothedPoint] {
        &self.0
    }

    /// Number of smoothed entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the series has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Which slice of the dataset a chart covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum ChartScope {
    /// Every record, regardless of region.
    Nationwide,
    /// Records whose region equals the given name exactly.
    Region(String),
}

impl ChartScope {
    /// The region to filter on, if any.
    pub fn region(&self) -> Option<&str> {
        match self {
            Self::Nationwide => None,
            Self::Region(name) => Some(name),
        }
    }
}

impl fmt::Display for ChartScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nationwide => write!(f, "nationwide"),
            Self::Region(name) => write!(f, "{name}"),
        }
    }
}

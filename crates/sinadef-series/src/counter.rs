//! Collapsing records into one count per date.

use chrono::NaiveDate;
use sinadef_common::{DailySeries, Record};
use std::collections::BTreeMap;
use tracing::debug;

/// Counts records per date, ascending by date.
///
/// Dates without records are absent from the result rather than zero-filled,
/// so consecutive entries are consecutive *available* dates, not calendar days.
pub fn count_daily<'a, I>(records: I) -> DailySeries
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut counts: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    let mut total = 0_usize;
    for record in records {
        *counts.entry(record.date).or_default() += 1;
        total += 1;
    }
    debug!(records = total, dates = counts.len(), "Counted daily records");
    DailySeries::from(counts)
}

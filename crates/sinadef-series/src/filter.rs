//! Region filtering.

use sinadef_common::Record;
use std::collections::BTreeSet;

/// Records whose region equals `region` exactly, or every record when `region` is `None`.
///
/// No match is not an error: the result is simply empty.
pub fn filter_region<'a>(records: &'a [Record], region: Option<&str>) -> Vec<&'a Record> {
    match region {
        None => records.iter().collect(),
        Some(wanted) => records
            .iter()
            .filter(|record| record.region.as_deref() == Some(wanted))
            .collect(),
    }
}

/// Distinct region values present in `records`.
pub fn known_regions(records: &[Record]) -> BTreeSet<&str> {
    records
        .iter()
        .filter_map(|record| record.region.as_deref())
        .collect()
}

//! Test utilities and shared test helpers.
//!
//! Fixtures for records, daily series, delimited exports and configuration
//! files, shared by the unit and integration tests of every workspace crate.

use chrono::NaiveDate;
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Shorthand for a calendar date; panics on an invalid date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Create a temporary file holding `content`.
#[cfg(any(test, feature = "tempfile"))]
pub fn create_temp_file(content: &str) -> tempfile::NamedTempFile {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temporary file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temporary file");
    file
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(any(test, feature = "tempfile"))]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Record and series fixtures.
pub mod record_fixtures {
    use super::date;
    use crate::{DailyCount, DailySeries, Record};
    use chrono::{Duration, NaiveDate};

    /// Records for consecutive days starting at `start`, `counts[i]` records on day `i`.
    pub fn records_for_counts(start: NaiveDate, counts: &[u32], region: &str) -> Vec<Record> {
        counts
            .iter()
            .zip(0_i64..)
            .flat_map(|(&count, offset)| {
                let day = start + Duration::days(offset);
                (0..count).map(move |_| Record::new(day, region))
            })
            .collect()
    }

    /// A daily series over consecutive days starting at `start`.
    pub fn daily_series(start: NaiveDate, counts: &[u32]) -> DailySeries {
        let points = counts
            .iter()
            .zip(0_i64..)
            .map(|(&count, offset)| DailyCount {
                date: start + Duration::days(offset),
                count,
            })
            .collect();
        DailySeries::new(points).expect("consecutive fixture dates")
    }

    /// The ten-day example series `[10,12,9,11,13,10,14,15,13,16]` from 2021-01-01.
    pub fn ten_day_counts() -> DailySeries {
        daily_series(date(2021, 1, 1), &[10, 12, 9, 11, 13, 10, 14, 15, 13, 16])
    }

    /// A constant count for every day from `start` to `end` inclusive.
    pub fn constant_daily_series(start: NaiveDate, end: NaiveDate, count: u32) -> DailySeries {
        let days = usize::try_from((end - start).num_days() + 1).unwrap_or(0);
        daily_series(start, &vec![count; days])
    }
}

/// Delimited export fixtures shaped like the SINADEF open-data file.
pub mod csv_fixtures {
    /// Header line of the fixture export.
    pub const HEADER: &str = "N|SEXO|EDAD|FECHA|DEPARTAMENTO DOMICILIO|PROVINCIA DOMICILIO";

    /// A small unsorted export; the three most recent rows are provisional.
    pub fn sample_export() -> String {
        [
            HEADER,
            "1|MASCULINO|71|2021-01-02|LIMA|LIMA",
            "2|FEMENINO|80|2021-01-01|CUSCO|CUSCO",
            "3|MASCULINO|65|2021-01-01|LIMA|LIMA",
            "4|FEMENINO|59|2021-01-03|ICA|PISCO",
            "5|MASCULINO|92|2021-01-02|LIMA|LIMA",
            "6|FEMENINO|77|2021-01-04|LIMA|LIMA",
            "7|MASCULINO|88|2021-01-05|CUSCO|CUSCO",
            "8|FEMENINO|45|2021-01-05|LIMA|LIMA",
        ]
        .join("\n")
            + "\n"
    }

    /// Builds an export from `(date, region)` rows.
    pub fn export_from_rows(rows: &[(&str, &str)]) -> String {
        let mut out = String::from(HEADER);
        out.push('\n');
        for (i, (date, region)) in rows.iter().enumerate() {
            out.push_str(&format!("{}|FEMENINO|70|{date}|{region}|{region}\n", i + 1));
        }
        out
    }
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// A minimal configuration file overriding only a few values.
    pub fn minimal_config_yaml() -> &'static str {
        r#"
input:
  path: "fallecidos_sinadef_test.csv"

pipeline:
  window_size: 5
  current_date: "2021-03-15"

regions:
  - LIMA
  - CUSCO
"#
    }

    /// A configuration file that fails validation (window of zero days).
    pub fn invalid_config_yaml() -> &'static str {
        r#"
pipeline:
  window_size: 0
"#
    }
}

/// Property-based testing utilities using proptest.
#[cfg(any(test, feature = "proptest"))]
pub mod property_testing {
    use proptest::prelude::*;

    /// Strategy for daily counts of a plausible size.
    pub fn counts_strategy(max_len: usize) -> impl Strategy<Value = Vec<u32>> {
        prop::collection::vec(0_u32..5_000, 0..max_len)
    }

    /// Strategy for smoothing window sizes.
    pub fn window_strategy() -> impl Strategy<Value = usize> {
        1_usize..30
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_multiple_calls() {
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_records_for_counts() {
        let records = record_fixtures::records_for_counts(date(2021, 1, 30), &[2, 0, 1], "LIMA");
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].date, date(2021, 1, 30));
        assert_eq!(records[2].date, date(2021, 2, 1));
        assert_eq!(records[2].region.as_deref(), Some("LIMA"));
    }

    #[test]
    fn test_constant_daily_series_length() {
        let series =
            record_fixtures::constant_daily_series(date(2020, 1, 1), date(2020, 12, 31), 4);
        assert_eq!(series.len(), 366);
    }

    #[test]
    fn test_export_from_rows() {
        let csv = csv_fixtures::export_from_rows(&[("2021-01-01", "ICA")]);
        assert!(csv.starts_with(csv_fixtures::HEADER));
        assert!(csv.contains("|2021-01-01|ICA|"));
    }

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0001, 0.001);
    }

    #[test]
    #[should_panic]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq(1.0, 1.1, 0.05);
    }
}

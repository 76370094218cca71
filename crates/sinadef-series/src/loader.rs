//! Record loading from the delimited SINADEF export.
//!
//! Rows are parsed into [`Record`]s, sorted by date, and the most recent
//! `tail_trim` records are dropped because the latest days are still being
//! reported.

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use sinadef_common::{Record, Result, SinadefError};
use sinadef_config::InputConfig;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Date-only layouts accepted in the date column.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];

/// Timestamp layouts accepted in the date column; the time is discarded.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// How to read the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Header of the date column.
    pub date_column: String,
    /// Header of the region column.
    pub region_column: String,
    /// Records removed from the end after sorting.
    pub tail_trim: usize,
}

impl LoaderOptions {
    /// Options from the `input` section and the run's tail trim.
    pub fn from_config(input: &InputConfig, tail_trim: usize) -> Result<Self> {
        let delimiter = match input.delimiter.as_bytes() {
            [byte] => *byte,
            _ => {
                return Err(SinadefError::config(format!(
                    "Delimiter must be a single byte, got {:?}",
                    input.delimiter
                )))
            }
        };
        Ok(Self {
            delimiter,
            date_column: input.date_column.clone(),
            region_column: input.region_column.clone(),
            tail_trim,
        })
    }
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            delimiter: b'|',
            date_column: "FECHA".to_string(),
            region_column: "DEPARTAMENTO DOMICILIO".to_string(),
            tail_trim: 3,
        }
    }
}

/// Loads, sorts and tail-trims the records of the file at `path`.
pub fn load_records(path: impl AsRef<Path>, options: &LoaderOptions) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    info!(path = %path.display(), "Loading records");
    read_records(file, options)
}

/// Like [`load_records`], reading from any source.
pub fn read_records<R: Read>(source: R, options: &LoaderOptions) -> Result<Vec<Record>> {
    let records = parse_records(source, options)?;
    let loaded = records.len();
    let records = trim_tail(sort_by_date(records), options.tail_trim)?;
    debug!(
        loaded,
        kept = records.len(),
        tail_trim = options.tail_trim,
        "Records sorted and trimmed"
    );
    Ok(records)
}

/// Parses every row without sorting or trimming.
pub fn parse_records<R: Read>(source: R, options: &LoaderOptions) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let header_map = build_header_map(&headers);

    let date_idx = *header_map
        .get(normalize_header_name(&options.date_column).as_str())
        .ok_or_else(|| {
            SinadefError::malformed(format!("Missing date column `{}`", options.date_column))
        })?;

    let region_idx = header_map
        .get(normalize_header_name(&options.region_column).as_str())
        .copied();
    if region_idx.is_none() {
        warn!(
            column = %options.region_column,
            "Region column not found; only the nationwide chart can have data"
        );
    }

    let mut records = Vec::new();
    let mut row = StringRecord::new();
    while reader.read_record(&mut row)? {
        let line = row
            .position()
            .and_then(|pos| usize::try_from(pos.line()).ok())
            .unwrap_or_default();

        let raw_date = row.get(date_idx).unwrap_or_default();
        let date = parse_date(raw_date).ok_or_else(|| {
            SinadefError::malformed_at(format!("Unparsable date {raw_date:?}"), line)
        })?;

        let region = region_idx
            .and_then(|idx| row.get(idx))
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        records.push(Record { date, region });
    }

    Ok(records)
}

/// Stable sort by date; rows sharing a date keep their file order.
pub fn sort_by_date(mut records: Vec<Record>) -> Vec<Record> {
    records.sort_by_key(|record| record.date);
    records
}

/// Drops the last `tail_trim` records regardless of their dates.
pub fn trim_tail(mut records: Vec<Record>, tail_trim: usize) -> Result<Vec<Record>> {
    if records.len() <= tail_trim {
        return Err(SinadefError::EmptyDataset {
            records: records.len(),
            tail_trim,
        });
    }
    records.truncate(records.len() - tail_trim);
    Ok(records)
}

/// Parses one date cell in any of the accepted layouts.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|timestamp| timestamp.date())
        })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        // First occurrence wins on duplicate headers.
        map.entry(normalize_header_name(name)).or_insert(idx);
    }
    map
}

fn normalize_header_name(name: &str) -> String {
    name.trim().trim_start_matches('\u{feff}').to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sinadef_common::test_utils::{create_temp_file, csv_fixtures, date};

    fn options(tail_trim: usize) -> LoaderOptions {
        LoaderOptions {
            tail_trim,
            ..LoaderOptions::default()
        }
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2021-03-15"), Some(date(2021, 3, 15)));
        assert_eq!(parse_date("15/03/2021"), Some(date(2021, 3, 15)));
        assert_eq!(parse_date("2021/03/15"), Some(date(2021, 3, 15)));
        assert_eq!(parse_date("2021-03-15 23:59:00"), Some(date(2021, 3, 15)));
        assert_eq!(parse_date("2021-03-15T08:00:00"), Some(date(2021, 3, 15)));
        assert_eq!(parse_date("  2021-03-15 "), Some(date(2021, 3, 15)));
        assert_eq!(parse_date("SIN REGISTRO"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_sorts_then_trims_fixed_count() {
        let records = read_records(csv_fixtures::sample_export().as_bytes(), &options(3)).unwrap();

        assert_eq!(records.len(), 5);
        let dates: Vec<_> = records.iter().map(|r| r.date).collect();
        assert!(dates.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(records.last().unwrap().date, date(2021, 1, 3));
        assert_eq!(records[0].region.as_deref(), Some("CUSCO"));
    }

    #[test]
    fn test_stable_order_within_a_date() {
        let records = read_records(csv_fixtures::sample_export().as_bytes(), &options(0)).unwrap();
        let jan_first: Vec<_> = records
            .iter()
            .filter(|r| r.date == date(2021, 1, 1))
            .map(|r| r.region.as_deref().unwrap())
            .collect();
        assert_eq!(jan_first, vec!["CUSCO", "LIMA"]);
    }

    #[test]
    fn test_trim_leaving_nothing_is_empty_dataset() {
        let csv = csv_fixtures::export_from_rows(&[
            ("2021-01-01", "LIMA"),
            ("2021-01-02", "LIMA"),
            ("2021-01-03", "LIMA"),
        ]);
        let err = read_records(csv.as_bytes(), &options(3)).unwrap_err();
        assert!(matches!(
            err,
            SinadefError::EmptyDataset {
                records: 3,
                tail_trim: 3
            }
        ));

        let err = read_records(csv.as_bytes(), &options(5)).unwrap_err();
        assert!(matches!(err, SinadefError::EmptyDataset { .. }));
    }

    #[test]
    fn test_missing_date_column() {
        let csv = "N|DEPARTAMENTO DOMICILIO\n1|LIMA\n";
        let err = read_records(csv.as_bytes(), &options(0)).unwrap_err();
        assert!(matches!(err, SinadefError::MalformedInput { .. }));
        assert!(err.to_string().contains("FECHA"));
    }

    #[test]
    fn test_unparsable_date_reports_line() {
        let csv = csv_fixtures::export_from_rows(&[
            ("2021-01-01", "LIMA"),
            ("ayer", "LIMA"),
        ]);
        let err = read_records(csv.as_bytes(), &options(0)).unwrap_err();
        assert!(matches!(
            err,
            SinadefError::MalformedInput { line: Some(3), .. }
        ));
    }

    #[test]
    fn test_missing_region_column_yields_regionless_records() {
        let csv = "FECHA|SEXO\n2021-01-01|F\n2021-01-02|M\n";
        let records = read_records(csv.as_bytes(), &options(0)).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.region.is_none()));
    }

    #[test]
    fn test_bom_and_case_in_headers() {
        let csv = "\u{feff}fecha|Departamento Domicilio\n2021-01-01|ICA\n";
        let records = read_records(csv.as_bytes(), &options(0)).unwrap();
        assert_eq!(records[0].region.as_deref(), Some("ICA"));
    }

    #[test]
    fn test_empty_region_cell_is_none() {
        let csv = "FECHA|DEPARTAMENTO DOMICILIO\n2021-01-01|\n";
        let records = read_records(csv.as_bytes(), &options(0)).unwrap();
        assert_eq!(records[0].region, None);
    }

    #[test]
    fn test_custom_delimiter() {
        let csv = "FECHA;DEPARTAMENTO DOMICILIO\n2021-01-01;PIURA\n";
        let opts = LoaderOptions {
            delimiter: b';',
            ..options(0)
        };
        let records = read_records(csv.as_bytes(), &opts).unwrap();
        assert_eq!(records[0].region.as_deref(), Some("PIURA"));
    }

    #[test]
    fn test_load_from_file() {
        let file = create_temp_file(&csv_fixtures::sample_export());
        let records = load_records(file.path(), &options(3)).unwrap();
        assert_eq!(records.len(), 5);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_records("/nonexistent/fallecidos_sinadef.csv", &options(3)).unwrap_err();
        assert!(matches!(err, SinadefError::Io(_)));
    }

    #[test]
    fn test_options_from_config() {
        let input = InputConfig::default();
        let opts = LoaderOptions::from_config(&input, 4).unwrap();
        assert_eq!(opts.delimiter, b'|');
        assert_eq!(opts.tail_trim, 4);

        let input = InputConfig {
            delimiter: "||".to_string(),
            ..InputConfig::default()
        };
        assert!(LoaderOptions::from_config(&input, 3).is_err());
    }
}

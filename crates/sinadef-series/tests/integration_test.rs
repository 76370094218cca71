//! Integration tests for sinadef-series crate.

use chrono::{Datelike, Duration, NaiveDate};
use proptest::prelude::*;
use sinadef_common::test_utils::{
    assert_approx_eq, create_temp_file, csv_fixtures, date, init_test_logging, record_fixtures,
};
use sinadef_common::{ChartScope, SinadefError};
use sinadef_config::{Config, EngineSettings, LabelsConfig};
use sinadef_series::{
    count_daily, derive_axes, filter_region, load_records, lookahead_cap, read_records,
    segment_years, smooth, ChartPipeline, LoaderOptions,
};

fn daily_rows(start: NaiveDate, days: i64, region: &str) -> Vec<(String, String)> {
    (0..days)
        .map(|offset| {
            (
                (start + Duration::days(offset)).format("%Y-%m-%d").to_string(),
                region.to_string(),
            )
        })
        .collect()
}

fn export(rows: &[(String, String)]) -> String {
    let borrowed: Vec<(&str, &str)> = rows
        .iter()
        .map(|(d, r)| (d.as_str(), r.as_str()))
        .collect();
    csv_fixtures::export_from_rows(&borrowed)
}

#[test]
fn test_file_to_axes() {
    init_test_logging();

    let mut rows = daily_rows(date(2019, 1, 1), 830, "LIMA");
    rows.extend(daily_rows(date(2019, 1, 1), 830, "LIMA"));
    rows.extend(daily_rows(date(2020, 6, 1), 30, "CUSCO"));
    let file = create_temp_file(&export(&rows));

    let records = load_records(file.path(), &LoaderOptions::default()).unwrap();
    assert_eq!(records.len(), rows.len() - 3);

    let lima = filter_region(&records, Some("LIMA"));
    let daily = count_daily(lima.iter().copied());
    // The tail trim removed three LIMA records from the last two days.
    assert_eq!(daily.points().last().unwrap().count, 1);

    let smoothed = smooth(&daily, 7).unwrap();
    assert_eq!(smoothed.len(), daily.len() - 6);

    let today = date(2021, 3, 15);
    let segments = segment_years(&smoothed, today, 3, 2);
    assert_eq!(
        segments.iter().map(|s| s.year).collect::<Vec<_>>(),
        vec![2019, 2020, 2021]
    );
    let current = &segments[2];
    assert_eq!(current.last_month, 5);
    assert!(current.points.iter().all(|p| p.date.month() <= 5));

    let axes = derive_axes(&segments, &LabelsConfig::default().month_abbreviations);
    assert_eq!(axes.time_ticks.len(), 29);
    assert_eq!(axes.count_axis.upper, 100.0);
    assert_eq!(axes.count_axis.step, 10);
}

#[test]
fn test_ten_day_example_end_to_end() {
    let records = record_fixtures::records_for_counts(
        date(2021, 1, 1),
        &[10, 12, 9, 11, 13, 10, 14, 15, 13, 16],
        "ICA",
    );
    let daily = count_daily(&records);
    let smoothed = smooth(&daily, 7).unwrap();

    assert_eq!(smoothed.len(), 4);
    assert_approx_eq(smoothed.points()[0].value, 11.29, 0.005);
}

#[test]
fn test_unmatched_region_reaches_insufficient_data() {
    let records = read_records(csv_fixtures::sample_export().as_bytes(), &LoaderOptions::default())
        .unwrap();
    let filtered = filter_region(&records, Some("PASCO"));
    assert!(filtered.is_empty());

    let daily = count_daily(filtered.iter().copied());
    assert!(daily.is_empty());
    assert!(matches!(
        smooth(&daily, 7),
        Err(SinadefError::InsufficientData { available: 0, window: 7 })
    ));
}

#[test]
fn test_pipeline_from_config() {
    let mut config = Config::default();
    config.pipeline.current_date = Some(date(2021, 3, 15));
    config.output.extension = "png".to_string();

    let rows = daily_rows(date(2020, 1, 1), 500, "AREQUIPA");
    let records = read_records(export(&rows).as_bytes(), &LoaderOptions::default()).unwrap();

    let pipeline = ChartPipeline::from_config(&config, date(2030, 1, 1)).unwrap();
    assert_eq!(pipeline.settings().today, date(2021, 3, 15));

    let outcomes = pipeline.run(&records, &["AREQUIPA".to_string(), "TACNA".to_string()]);
    assert_eq!(outcomes.len(), 3);
    let arequipa = outcomes[1].chart().unwrap();
    assert_eq!(arequipa.scope, ChartScope::Region("AREQUIPA".to_string()));
    assert_eq!(arequipa.file_name, "AREQUIPA.png");
    assert_eq!(arequipa.title, "AREQUIPA");
    assert!(outcomes[2].result.is_err());
}

#[test]
fn test_coarse_scale_from_large_counts() {
    let records = record_fixtures::records_for_counts(date(2021, 1, 1), &[250; 60], "LIMA");
    let settings = EngineSettings {
        tail_trim: 0,
        window_size: 7,
        years: 1,
        lookahead_months: 2,
        today: date(2021, 2, 15),
    };
    let chart = ChartPipeline::new(settings, LabelsConfig::default(), "jpg")
        .unwrap()
        .build_chart(&records, &ChartScope::Nationwide)
        .unwrap();

    assert_approx_eq(chart.axis.count_axis.upper, 300.0, 1e-9);
    assert_eq!(chart.axis.count_axis.step, 100);
    assert_eq!(chart.axis.count_axis.ticks.last().unwrap().label, "300");
}

proptest! {
    #[test]
    fn prop_engine_is_deterministic_and_contained(
        counts in prop::collection::vec(0_u32..50, 7..500),
        today_offset in 0_i64..900,
        years in 1_u32..4,
    ) {
        let start = date(2019, 6, 1);
        let records = record_fixtures::records_for_counts(start, &counts, "LIMA");
        let today = start + Duration::days(today_offset);
        let cap = lookahead_cap(today, 2);

        let run = || {
            let daily = count_daily(&records);
            smooth(&daily, 7)
        };
        let (first, second) = (run(), run());
        match (first, second) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(&a, &b);
                for segment in segment_years(&a, today, years, 2) {
                    for point in segment.points {
                        prop_assert_eq!(point.date.year(), segment.year);
                        if segment.year == today.year() {
                            prop_assert!(point.date.month() <= cap);
                        }
                    }
                }
            }
            (Err(_), Err(_)) => {}
            _ => prop_assert!(false, "runs disagree"),
        }
    }
}

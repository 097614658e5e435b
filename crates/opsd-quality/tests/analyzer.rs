//! End-to-end quality analysis over a small synthetic table: one gap,
//! one duplicate timestamp, one empty column, one negative price.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use opsd_ingest::load_time_frame;
use opsd_model::{MissingValuesStrategy, PipelineConfig, QualityReport, tag_columns};
use opsd_quality::{build_quality_report, write_quality_report};
use tempfile::TempDir;

const SCENARIO_CSV: &str = "\
utc_timestamp,DE_price_day_ahead,DK_price_day_ahead,FR_price_day_ahead,XX_flow\n\
2015-01-01 00:00:00,10.0,,5.0,100.0\n\
2015-01-01 02:00:00,-5.0,,6.0,200.0\n\
2015-01-01 02:00:00,30.0,,7.0,300.0\n";

fn write_csv(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("input.csv");
    fs::write(&path, contents).unwrap();
    path
}

fn test_config() -> PipelineConfig {
    PipelineConfig {
        focus_countries: vec!["DE".to_string(), "DK".to_string(), "FR".to_string()],
        expected_interval_minutes: 60,
        missing_values_strategy: MissingValuesStrategy {
            threshold_drop: 0.5,
        },
        data_sources: BTreeMap::new(),
    }
}

fn scenario_report() -> QualityReport {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, SCENARIO_CSV);
    let frame = load_time_frame(&path).unwrap();
    let config = test_config();
    let tags = tag_columns(
        &frame.column_names(),
        &frame.time_column,
        &config.focus_countries,
    );
    build_quality_report(&frame, &tags, &config).unwrap()
}

#[test]
fn overview_covers_period_and_shape() {
    let report = scenario_report();
    assert_eq!(report.overview.rows, 3);
    assert_eq!(report.overview.columns, 5);
    assert_eq!(
        report.overview.period_start.as_deref(),
        Some("2015-01-01 00:00:00")
    );
    assert_eq!(
        report.overview.period_end.as_deref(),
        Some("2015-01-01 02:00:00")
    );
    assert_eq!(report.overview.duration_days, 0);
    assert!(report.overview.memory_mb >= 0.0);
}

#[test]
fn missing_values_census_counts_empty_column() {
    let report = scenario_report();
    let global = &report.missing_values.global;
    assert_eq!(global.total_cells, 15);
    assert_eq!(global.missing_cells, 3);
    assert!((global.missing_percentage - 20.0).abs() < 1e-9);

    let categories = &report.missing_values.column_categories;
    assert_eq!(categories.complete, 4);
    assert_eq!(categories.partial, 0);
    assert_eq!(categories.mostly_missing, 0);
    assert_eq!(categories.empty, 1);

    let top = &report.missing_values.top_missing_columns;
    assert_eq!(top.len(), 1);
    let worst = top.get("DK_price_day_ahead").expect("empty column listed");
    assert_eq!(worst.count, 3);
    assert!((worst.percentage - 100.0).abs() < 1e-9);
}

#[test]
fn temporal_analysis_flags_gap_and_duplicate() {
    let report = scenario_report();
    let temporal = &report.temporal_analysis;
    assert_eq!(temporal.expected_frequency, "1 hour");
    assert_eq!(temporal.gaps_count, 1);
    assert_eq!(temporal.max_gap.as_deref(), Some("0 days 02:00:00"));
    assert_eq!(temporal.duplicate_timestamps, 1);
}

#[test]
fn price_analysis_covers_focus_countries() {
    let report = scenario_report();
    let value = serde_json::to_value(&report).unwrap();
    let analysis = &value["price_analysis"];

    let de = &analysis["DE"]["DE_price_day_ahead"];
    assert_eq!(de["count"], 3);
    assert_eq!(de["missing"], 0);
    assert_eq!(de["min"], -5.0);
    assert_eq!(de["max"], 30.0);
    assert_eq!(de["mean"], 11.67);
    assert_eq!(de["median"], 10.0);
    assert_eq!(de["std"], 17.56);
    assert_eq!(de["negative_count"], 1);
    assert_eq!(de["negative_pct"], 33.33);
    assert_eq!(de["most_negative"], -5.0);
    assert_eq!(de["outliers_high_count"], 0);
    assert_eq!(de["outliers_low_count"], 0);

    // The fully missing column carries a marker instead of statistics.
    assert_eq!(analysis["DK"]["DK_price_day_ahead"], serde_json::json!({ "no_data": true }));

    let fr = &analysis["FR"]["FR_price_day_ahead"];
    assert_eq!(fr["mean"], 6.0);
    assert_eq!(fr["std"], 1.0);
    assert_eq!(fr["negative_count"], 0);
    // No negative values, so no most_negative key at all.
    assert!(fr.get("most_negative").is_none());
}

#[test]
fn recommendations_follow_findings() {
    let report = scenario_report();
    insta::assert_snapshot!(report.recommendations.join("\n"), @r"
    Drop 1 entirely empty columns (100% missing)
    Investigate and document the 1 detected time gaps
    Focus on the priority countries (DE, DK, FR) to reduce dimensionality
    Use forward fill for price and generation time series
    ");
}

#[test]
fn report_file_is_pretty_json_with_trailing_newline() {
    let report = scenario_report();
    let dir = TempDir::new().unwrap();
    let path = write_quality_report(&report, dir.path()).unwrap();
    assert_eq!(path.file_name().unwrap(), "data_quality_report.json");

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.ends_with('\n'));
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["overview"]["rows"], 3);

    // Focus-country sections appear in configuration order.
    let de_at = raw.find("\"DE\"").unwrap();
    let dk_at = raw.find("\"DK\"").unwrap();
    let fr_at = raw.find("\"FR\"").unwrap();
    assert!(de_at < dk_at);
    assert!(dk_at < fr_at);
}

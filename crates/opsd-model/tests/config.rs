use opsd_model::{DEFAULT_INTERVAL_MINUTES, PipelineError, load_pipeline_config};
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("pipeline.toml");
    std::fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn loads_full_config() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(
        &dir,
        r#"
focus_countries = ["DE", "DK", "FR"]
expected_interval_minutes = 60

[missing_values_strategy]
threshold_drop = 0.5

[data_sources.opsd_timeseries]
url = "https://data.open-power-system-data.org/time_series/latest/time_series_60min_singleindex.csv"
destination = "data/raw/opsd_timeseries"
filename = "time_series_60min_singleindex.csv"
"#,
    );

    let config = load_pipeline_config(&path).expect("load config");
    assert_eq!(config.focus_countries, vec!["DE", "DK", "FR"]);
    assert_eq!(config.expected_interval_minutes, 60);
    assert_eq!(config.expected_interval_seconds(), 3600);
    assert!((config.threshold_drop() - 0.5).abs() < 1e-12);

    let source = config
        .data_sources
        .get("opsd_timeseries")
        .expect("opsd source");
    assert_eq!(
        source.local_path(),
        std::path::Path::new("data/raw/opsd_timeseries/time_series_60min_singleindex.csv")
    );
}

#[test]
fn interval_defaults_to_sixty_minutes() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(
        &dir,
        r#"
focus_countries = ["DE"]

[missing_values_strategy]
threshold_drop = 0.25
"#,
    );

    let config = load_pipeline_config(&path).expect("load config");
    assert_eq!(config.expected_interval_minutes, DEFAULT_INTERVAL_MINUTES);
    assert!(config.data_sources.is_empty());
}

#[test]
fn missing_file_is_config_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("absent.toml");

    let err = load_pipeline_config(&path).expect_err("load should fail");
    assert!(matches!(err, PipelineError::Config { .. }));
    assert!(err.to_string().contains("not found"));
}

#[test]
fn malformed_toml_is_syntax_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(&dir, "focus_countries = [\"DE\"\n");

    let err = load_pipeline_config(&path).expect_err("load should fail");
    assert!(matches!(err, PipelineError::ConfigSyntax { .. }));
}

#[test]
fn missing_strategy_is_syntax_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(&dir, "focus_countries = [\"DE\"]\n");

    let err = load_pipeline_config(&path).expect_err("load should fail");
    assert!(matches!(err, PipelineError::ConfigSyntax { .. }));
}

#[test]
fn threshold_outside_unit_interval_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(
        &dir,
        r#"
focus_countries = ["DE"]

[missing_values_strategy]
threshold_drop = 1.5
"#,
    );

    let err = load_pipeline_config(&path).expect_err("load should fail");
    assert!(matches!(err, PipelineError::Config { .. }));
    assert!(err.to_string().contains("threshold_drop"));
}

#[test]
fn empty_focus_list_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(
        &dir,
        r#"
focus_countries = []

[missing_values_strategy]
threshold_drop = 0.5
"#,
    );

    let err = load_pipeline_config(&path).expect_err("load should fail");
    assert!(matches!(err, PipelineError::Config { .. }));
    assert!(err.to_string().contains("focus_countries"));
}

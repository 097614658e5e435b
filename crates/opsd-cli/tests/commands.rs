//! Source and input resolution tests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use opsd_cli::commands::{resolve_input, resolve_source};
use opsd_model::{DataSource, MissingValuesStrategy, PipelineConfig};

fn config_with_sources(names: &[&str]) -> PipelineConfig {
    let mut data_sources = BTreeMap::new();
    for name in names {
        data_sources.insert(
            (*name).to_string(),
            DataSource {
                url: format!("https://example.org/{name}.csv"),
                destination: PathBuf::from("data/raw").join(name),
                filename: format!("{name}.csv"),
            },
        );
    }
    PipelineConfig {
        focus_countries: vec!["DE".to_string()],
        expected_interval_minutes: 60,
        missing_values_strategy: MissingValuesStrategy {
            threshold_drop: 0.5,
        },
        data_sources,
    }
}

#[test]
fn test_resolve_source_by_name() {
    let config = config_with_sources(&["backup", "opsd"]);
    let (name, source) = resolve_source(&config, Some("opsd")).expect("resolve");
    assert_eq!(name, "opsd");
    assert_eq!(source.filename, "opsd.csv");
}

#[test]
fn test_resolve_source_unknown_name_lists_available() {
    let config = config_with_sources(&["opsd"]);
    let error = resolve_source(&config, Some("nope")).unwrap_err();
    let message = error.to_string();
    assert!(message.contains("\"nope\""), "message was: {message}");
    assert!(message.contains("opsd"), "message was: {message}");
}

#[test]
fn test_resolve_source_defaults_to_sole_entry() {
    let config = config_with_sources(&["opsd"]);
    let (name, _) = resolve_source(&config, None).expect("resolve");
    assert_eq!(name, "opsd");
}

#[test]
fn test_resolve_source_ambiguous_without_name() {
    let config = config_with_sources(&["backup", "opsd"]);
    let error = resolve_source(&config, None).unwrap_err();
    assert!(error.to_string().contains("--source"));
}

#[test]
fn test_resolve_source_empty_config() {
    let config = config_with_sources(&[]);
    assert!(resolve_source(&config, None).is_err());
}

#[test]
fn test_resolve_input_prefers_explicit_path() {
    let config = config_with_sources(&["opsd"]);
    let input = resolve_input(&config, Some(Path::new("elsewhere.csv"))).expect("resolve");
    assert_eq!(input, PathBuf::from("elsewhere.csv"));
}

#[test]
fn test_resolve_input_defaults_to_download_path() {
    let config = config_with_sources(&["opsd"]);
    let input = resolve_input(&config, None).expect("resolve");
    assert_eq!(input, PathBuf::from("data/raw/opsd/opsd.csv"));
}

#[test]
fn test_resolve_input_requires_path_when_ambiguous() {
    let config = config_with_sources(&["backup", "opsd"]);
    assert!(resolve_input(&config, None).is_err());
}

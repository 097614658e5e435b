//! Pipeline configuration: loaded once at startup, passed by value to
//! every component that needs it. No global state.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

/// Expected sampling interval of the hourly series, in minutes.
pub const DEFAULT_INTERVAL_MINUTES: i64 = 60;

fn default_interval_minutes() -> i64 {
    DEFAULT_INTERVAL_MINUTES
}

/// Static pipeline configuration, deserialized from a TOML document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Country codes driving column selection and per-country reporting.
    /// Order is preserved: selection and report sections follow it.
    pub focus_countries: Vec<String>,

    /// Expected spacing between consecutive timestamps.
    #[serde(default = "default_interval_minutes")]
    pub expected_interval_minutes: i64,

    pub missing_values_strategy: MissingValuesStrategy,

    /// Named download sources. Empty when the pipeline only runs on
    /// already-downloaded files.
    #[serde(default)]
    pub data_sources: BTreeMap<String, DataSource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissingValuesStrategy {
    /// Fraction in [0, 1]; columns whose missing fraction is at or above
    /// it are dropped. A fraction, not a percentage: multiply by 100 for
    /// display only.
    pub threshold_drop: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSource {
    pub url: String,
    pub destination: PathBuf,
    pub filename: String,
}

impl DataSource {
    /// Path the source downloads to: `destination/filename`.
    pub fn local_path(&self) -> PathBuf {
        self.destination.join(&self.filename)
    }
}

impl PipelineConfig {
    /// Expected interval as a whole number of seconds, for gap detection.
    pub fn expected_interval_seconds(&self) -> i64 {
        self.expected_interval_minutes * 60
    }

    pub fn threshold_drop(&self) -> f64 {
        self.missing_values_strategy.threshold_drop
    }
}

/// Loads and validates the pipeline configuration.
///
/// A missing file, a TOML syntax error, an absent required key, or a
/// semantically invalid value are all fatal at startup.
pub fn load_pipeline_config(path: &Path) -> Result<PipelineConfig> {
    if !path.exists() {
        return Err(PipelineError::config(path, "configuration file not found"));
    }
    let raw = fs::read_to_string(path).map_err(|source| PipelineError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config: PipelineConfig =
        toml::from_str(&raw).map_err(|source| PipelineError::ConfigSyntax {
            path: path.display().to_string(),
            source,
        })?;
    validate(&config, path)?;
    Ok(config)
}

fn validate(config: &PipelineConfig, path: &Path) -> Result<()> {
    if config.focus_countries.is_empty() {
        return Err(PipelineError::config(path, "focus_countries must not be empty"));
    }
    if config
        .focus_countries
        .iter()
        .any(|code| code.trim().is_empty())
    {
        return Err(PipelineError::config(path, "focus_countries contains an empty code"));
    }
    let threshold = config.missing_values_strategy.threshold_drop;
    if !(0.0..=1.0).contains(&threshold) {
        return Err(PipelineError::config(
            path,
            format!("missing_values_strategy.threshold_drop must be in [0, 1], got {threshold}"),
        ));
    }
    if config.expected_interval_minutes <= 0 {
        return Err(PipelineError::config(
            path,
            format!(
                "expected_interval_minutes must be positive, got {}",
                config.expected_interval_minutes
            ),
        ));
    }
    for (name, source) in &config.data_sources {
        if source.url.trim().is_empty() {
            return Err(PipelineError::config(path, format!("data_sources.{name}.url is empty")));
        }
        if source.filename.trim().is_empty() {
            return Err(PipelineError::config(
                path,
                format!("data_sources.{name}.filename is empty"),
            ));
        }
    }
    Ok(())
}

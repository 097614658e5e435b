//! First-look exploration of a loaded table: shape, period, dtype
//! histogram, per-country column census, and a short text report.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use opsd_ingest::TimeFrame;
use opsd_model::{ColumnRole, ColumnTag};
use tracing::info;

use crate::profile::{self, ColumnMissing};
use crate::temporal::format_duration;

pub const EXPLORATION_REPORT_FILENAME: &str = "initial_exploration.txt";

/// Price columns previewed per focus country.
const PRICE_PREVIEW_LIMIT: usize = 2;

/// Worst-missing columns listed in the summary.
const TOP_MISSING_PREVIEW: usize = 10;

const PERIOD_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Quick statistics for one price column, full precision.
#[derive(Debug, Clone)]
pub struct PricePreview {
    pub column: String,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub negative_count: usize,
    pub negative_pct: f64,
}

/// Column census for one focus country, with previews of its first
/// price columns.
#[derive(Debug, Clone)]
pub struct CountryColumns {
    pub country: String,
    pub total: usize,
    pub price: usize,
    pub generation: usize,
    pub load: usize,
    pub price_previews: Vec<PricePreview>,
}

/// Everything the explore step reports, computed in one pass over the
/// table.
#[derive(Debug, Clone)]
pub struct ExplorationSummary {
    pub input_path: PathBuf,
    pub file_size_mb: f64,
    pub rows: usize,
    pub columns: usize,
    pub memory_mb: f64,
    pub time_column: String,
    pub period_start: Option<String>,
    pub period_end: Option<String>,
    pub duration: Option<String>,
    pub dtype_counts: BTreeMap<String, usize>,
    pub column_names: Vec<String>,
    pub countries: Vec<CountryColumns>,
    pub top_missing: Vec<ColumnMissing>,
}

pub fn build_exploration_summary(
    frame: &TimeFrame,
    tags: &[ColumnTag],
    focus_countries: &[String],
    input_path: &Path,
) -> Result<ExplorationSummary> {
    let metadata = std::fs::metadata(input_path)
        .with_context(|| format!("failed to stat {}", input_path.display()))?;
    let file_size_mb = metadata.len() as f64 / (1024.0 * 1024.0);

    let (rows, columns) = profile::shape(frame);
    info!(rows, columns, "exploring table");

    let stamps = frame.timestamps()?;
    let first = stamps.iter().flatten().min().copied();
    let last = stamps.iter().flatten().max().copied();
    let duration = match (first, last) {
        (Some(start), Some(end)) => Some(format_duration((end - start).num_seconds())),
        _ => None,
    };

    let census = profile::missing_census(frame)?;
    let countries = focus_countries
        .iter()
        .map(|country| country_columns(frame, tags, country))
        .collect::<Result<Vec<_>>>()?;

    Ok(ExplorationSummary {
        input_path: input_path.to_path_buf(),
        file_size_mb,
        rows,
        columns,
        memory_mb: frame.memory_mb(),
        time_column: frame.time_column.clone(),
        period_start: first.map(|s| s.format(PERIOD_FORMAT).to_string()),
        period_end: last.map(|s| s.format(PERIOD_FORMAT).to_string()),
        duration,
        dtype_counts: profile::dtype_histogram(frame),
        column_names: frame.column_names(),
        countries,
        top_missing: profile::top_missing(&census, TOP_MISSING_PREVIEW),
    })
}

fn country_columns(frame: &TimeFrame, tags: &[ColumnTag], country: &str) -> Result<CountryColumns> {
    let matching: Vec<&ColumnTag> = tags
        .iter()
        .filter(|tag| tag.matches_country(country))
        .collect();
    let price = matching
        .iter()
        .filter(|tag| tag.role == ColumnRole::Price)
        .count();
    let generation = matching
        .iter()
        .filter(|tag| matches!(tag.role, ColumnRole::Generation(_)))
        .count();
    let load = matching
        .iter()
        .filter(|tag| tag.role == ColumnRole::Load)
        .count();

    let mut price_previews = Vec::new();
    for tag in matching
        .iter()
        .filter(|tag| tag.role == ColumnRole::Price)
        .take(PRICE_PREVIEW_LIMIT)
    {
        // Columns with no data at all are left out of the preview.
        if let Some(description) = profile::describe_column(frame, &tag.name)? {
            price_previews.push(PricePreview {
                column: tag.name.clone(),
                min: description.min,
                max: description.max,
                median: description.median,
                negative_count: description.negative_count,
                negative_pct: description.negative_pct,
            });
        }
    }

    Ok(CountryColumns {
        country: country.to_string(),
        total: matching.len(),
        price,
        generation,
        load,
        price_previews,
    })
}

/// Writes the plain-text exploration report under `report_dir` and
/// returns the file path.
pub fn write_exploration_report(
    summary: &ExplorationSummary,
    report_dir: &Path,
) -> Result<PathBuf> {
    let rule = "=".repeat(80);
    let mut text = String::new();
    writeln!(text, "{rule}")?;
    writeln!(text, "INITIAL EXPLORATION REPORT - OPSD TIME SERIES")?;
    writeln!(text, "{rule}")?;
    writeln!(text)?;
    writeln!(text, "File: {}", summary.input_path.display())?;
    writeln!(text, "Size: {:.2} MB", summary.file_size_mb)?;
    writeln!(text, "Rows: {}", summary.rows)?;
    writeln!(text, "Columns: {}", summary.columns)?;
    match (&summary.period_start, &summary.period_end) {
        (Some(start), Some(end)) => writeln!(text, "Period: {start} to {end}")?,
        _ => writeln!(text, "Period: unavailable")?,
    }
    writeln!(text)?;
    writeln!(text, "Full column list:")?;
    writeln!(text, "{}", "-".repeat(80))?;
    for (index, name) in summary.column_names.iter().enumerate() {
        writeln!(text, "{:4}. {name}", index + 1)?;
    }

    std::fs::create_dir_all(report_dir)?;
    let output_path = report_dir.join(EXPLORATION_REPORT_FILENAME);
    std::fs::write(&output_path, text)?;
    info!(path = %output_path.display(), "exploration report written");
    Ok(output_path)
}

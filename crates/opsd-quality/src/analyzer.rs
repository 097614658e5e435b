//! Assembles the data-quality report from the profiling and temporal
//! checks and writes it to disk as JSON.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::NaiveDateTime;
use opsd_ingest::TimeFrame;
use opsd_model::{
    ColumnCategories, ColumnRole, ColumnTag, GlobalMissing, MissingValues, OrderedMap, Overview,
    PipelineConfig, PriceColumnReport, PriceColumnStats, QualityReport, TemporalAnalysis,
    TopMissingColumn, round2,
};
use tracing::{debug, info, warn};

use crate::profile::{self, ColumnDescription};
use crate::temporal::{check_temporal, expected_frequency_label, format_duration};

pub const QUALITY_REPORT_FILENAME: &str = "data_quality_report.json";

/// Columns listed in the worst-missing section of the report.
const TOP_MISSING_LIMIT: usize = 20;

const PERIOD_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Runs every quality check over the table and collects the results
/// into one report. Values are rounded here, at the report boundary;
/// the profiling layer stays full precision.
pub fn build_quality_report(
    frame: &TimeFrame,
    tags: &[ColumnTag],
    config: &PipelineConfig,
) -> Result<QualityReport> {
    let (rows, columns) = profile::shape(frame);
    info!(rows, columns, "building quality report");

    let stamps = frame.timestamps()?;
    let overview = build_overview(frame, rows, columns, &stamps);

    let census = profile::missing_census(frame)?;
    let categories = profile::categorize(&census);
    let missing_values = build_missing_values(rows, columns, &census, categories);

    let check = check_temporal(&stamps, config.expected_interval_seconds());
    if check.gaps_count > 0 {
        warn!(gaps = check.gaps_count, "time gaps detected");
        for stamp in &check.gap_preview {
            debug!(after = %stamp.format(PERIOD_FORMAT), "gap follows this timestamp");
        }
    }
    let temporal_analysis = TemporalAnalysis {
        expected_frequency: expected_frequency_label(config.expected_interval_minutes),
        gaps_count: check.gaps_count,
        max_gap: check.max_gap_seconds.map(format_duration),
        duplicate_timestamps: check.duplicate_timestamps,
    };

    let price_analysis = build_price_analysis(frame, tags, &config.focus_countries)?;
    let recommendations =
        build_recommendations(&categories, check.gaps_count, &config.focus_countries);

    Ok(QualityReport {
        overview,
        missing_values,
        temporal_analysis,
        price_analysis,
        recommendations,
    })
}

fn build_overview(
    frame: &TimeFrame,
    rows: usize,
    columns: usize,
    stamps: &[Option<NaiveDateTime>],
) -> Overview {
    let first = stamps.iter().flatten().min().copied();
    let last = stamps.iter().flatten().max().copied();
    let duration_days = match (first, last) {
        (Some(start), Some(end)) => (end - start).num_days(),
        _ => 0,
    };
    Overview {
        rows,
        columns,
        period_start: first.map(|s| s.format(PERIOD_FORMAT).to_string()),
        period_end: last.map(|s| s.format(PERIOD_FORMAT).to_string()),
        duration_days,
        memory_mb: round2(frame.memory_mb()),
    }
}

fn build_missing_values(
    rows: usize,
    columns: usize,
    census: &[profile::ColumnMissing],
    categories: ColumnCategories,
) -> MissingValues {
    let total_cells = rows * columns;
    let missing_cells: usize = census.iter().map(|column| column.count).sum();
    let missing_percentage = if total_cells == 0 {
        0.0
    } else {
        round2(missing_cells as f64 / total_cells as f64 * 100.0)
    };

    let mut top_missing_columns = OrderedMap::new();
    for column in profile::top_missing(census, TOP_MISSING_LIMIT) {
        top_missing_columns.insert(
            column.name,
            TopMissingColumn {
                count: column.count,
                percentage: round2(column.percentage),
            },
        );
    }

    MissingValues {
        global: GlobalMissing {
            total_cells,
            missing_cells,
            missing_percentage,
        },
        column_categories: categories,
        top_missing_columns,
    }
}

/// One entry per focus country that has at least one price column,
/// countries in configuration order and columns in table order.
fn build_price_analysis(
    frame: &TimeFrame,
    tags: &[ColumnTag],
    focus_countries: &[String],
) -> Result<OrderedMap<OrderedMap<PriceColumnReport>>> {
    let mut analysis = OrderedMap::new();
    for country in focus_countries {
        let price_tags: Vec<&ColumnTag> = tags
            .iter()
            .filter(|tag| tag.role == ColumnRole::Price && tag.matches_country(country))
            .collect();
        if price_tags.is_empty() {
            warn!(country = %country, "no price columns found for focus country");
            continue;
        }
        let mut per_column = OrderedMap::new();
        for tag in price_tags {
            let report = match profile::describe_column(frame, &tag.name)? {
                Some(description) => PriceColumnReport::Stats(price_stats(&description)),
                None => PriceColumnReport::no_data(),
            };
            per_column.insert(tag.name.clone(), report);
        }
        analysis.insert(country.clone(), per_column);
    }
    Ok(analysis)
}

fn price_stats(description: &ColumnDescription) -> PriceColumnStats {
    PriceColumnStats {
        count: description.count,
        missing: description.missing,
        missing_pct: round2(description.missing_pct),
        min: round2(description.min),
        max: round2(description.max),
        mean: round2(description.mean),
        median: round2(description.median),
        std: description.std.map(round2),
        negative_count: description.negative_count,
        negative_pct: round2(description.negative_pct),
        most_negative: description.most_negative.map(round2),
        outliers_high_count: description.outliers_high,
        outliers_low_count: description.outliers_low,
    }
}

/// Fixed-order cleaning advice derived from the findings. The last two
/// entries are unconditional.
fn build_recommendations(
    categories: &ColumnCategories,
    gaps_count: usize,
    focus_countries: &[String],
) -> Vec<String> {
    let mut recommendations = Vec::new();
    if categories.empty > 0 {
        recommendations.push(format!(
            "Drop {} entirely empty columns (100% missing)",
            categories.empty
        ));
    }
    if categories.mostly_missing > 0 {
        recommendations.push(format!(
            "Evaluate dropping {} columns with at least 50% missing values",
            categories.mostly_missing
        ));
    }
    if gaps_count > 0 {
        recommendations.push(format!(
            "Investigate and document the {gaps_count} detected time gaps"
        ));
    }
    recommendations.push(format!(
        "Focus on the priority countries ({}) to reduce dimensionality",
        focus_countries.join(", ")
    ));
    recommendations.push("Use forward fill for price and generation time series".to_string());
    recommendations
}

/// Writes the report as pretty JSON under `report_dir` and returns the
/// file path.
pub fn write_quality_report(report: &QualityReport, report_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(report_dir)?;
    let output_path = report_dir.join(QUALITY_REPORT_FILENAME);
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(&output_path, format!("{json}\n"))?;
    info!(path = %output_path.display(), "quality report written");
    Ok(output_path)
}

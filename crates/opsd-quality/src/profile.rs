//! Table profiling: shape, dtype histogram, missing-value census, and
//! per-column descriptions.

use std::collections::BTreeMap;

use anyhow::Result;

use opsd_ingest::TimeFrame;
use opsd_model::ColumnCategories;

use crate::stats;

/// Missing-value figures for one column. The percentage is full
/// precision; report assembly rounds it.
#[derive(Debug, Clone)]
pub struct ColumnMissing {
    pub name: String,
    pub count: usize,
    pub percentage: f64,
}

/// Full description of a numeric column over its non-missing values.
#[derive(Debug, Clone)]
pub struct ColumnDescription {
    pub count: usize,
    pub missing: usize,
    /// Missing percentage over all rows.
    pub missing_pct: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std: Option<f64>,
    pub negative_count: usize,
    /// Negative percentage over non-missing values.
    pub negative_pct: f64,
    pub most_negative: Option<f64>,
    pub outliers_high: usize,
    pub outliers_low: usize,
}

pub fn shape(frame: &TimeFrame) -> (usize, usize) {
    (frame.height(), frame.width())
}

/// Column count per dtype name, e.g. `{"datetime[ms]": 1, "f64": 40}`.
pub fn dtype_histogram(frame: &TimeFrame) -> BTreeMap<String, usize> {
    let mut histogram = BTreeMap::new();
    for column in frame.data.get_columns() {
        *histogram.entry(column.dtype().to_string()).or_insert(0) += 1;
    }
    histogram
}

/// Missing count and percentage for every column, in table order.
/// An empty table reports zero percent everywhere.
pub fn missing_census(frame: &TimeFrame) -> Result<Vec<ColumnMissing>> {
    let rows = frame.height();
    let mut census = Vec::with_capacity(frame.width());
    for name in frame.column_names() {
        let count = frame.missing_count(&name)?;
        let percentage = if rows == 0 {
            0.0
        } else {
            count as f64 / rows as f64 * 100.0
        };
        census.push(ColumnMissing {
            name,
            count,
            percentage,
        });
    }
    Ok(census)
}

/// Buckets every column into exactly one completeness category.
pub fn categorize(census: &[ColumnMissing]) -> ColumnCategories {
    let mut categories = ColumnCategories::default();
    for column in census {
        if column.percentage == 0.0 {
            categories.complete += 1;
        } else if column.percentage < 50.0 {
            categories.partial += 1;
        } else if column.percentage < 100.0 {
            categories.mostly_missing += 1;
        } else {
            categories.empty += 1;
        }
    }
    categories
}

/// The worst `limit` columns by missing percentage, worst first; only
/// columns with at least one missing value qualify. Ties keep table
/// order.
pub fn top_missing(census: &[ColumnMissing], limit: usize) -> Vec<ColumnMissing> {
    let mut with_missing: Vec<ColumnMissing> = census
        .iter()
        .filter(|column| column.count > 0)
        .cloned()
        .collect();
    with_missing.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    with_missing.truncate(limit);
    with_missing
}

/// Describes one column over its non-missing values. Returns None when
/// the column has no non-missing values; that is a degenerate result,
/// not an error.
pub fn describe_column(frame: &TimeFrame, name: &str) -> Result<Option<ColumnDescription>> {
    let values = frame.numeric_values(name)?;
    if values.is_empty() {
        return Ok(None);
    }
    let missing = frame.missing_count(name)?;
    let rows = frame.height();
    let missing_pct = if rows == 0 {
        0.0
    } else {
        missing as f64 / rows as f64 * 100.0
    };

    let negatives: Vec<f64> = values.iter().copied().filter(|v| *v < 0.0).collect();
    let negative_pct = negatives.len() as f64 / values.len() as f64 * 100.0;
    let (outliers_high, outliers_low) = stats::outlier_counts(&values);

    Ok(Some(ColumnDescription {
        count: values.len(),
        missing,
        missing_pct,
        min: stats::min_value(&values).unwrap_or_default(),
        max: stats::max_value(&values).unwrap_or_default(),
        mean: stats::mean(&values).unwrap_or_default(),
        median: stats::median(&values).unwrap_or_default(),
        std: stats::sample_std(&values),
        negative_count: negatives.len(),
        negative_pct,
        most_negative: stats::min_value(&negatives),
        outliers_high,
        outliers_low,
    }))
}

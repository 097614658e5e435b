//! CSV loading into a [`TimeFrame`].
//!
//! The first file row is the header and the first column holds the
//! timestamps. Malformed input is fatal for the whole load; no row is
//! ever skipped or coerced silently.

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use csv::ReaderBuilder;
use polars::prelude::{Column, DataFrame, DataType, NamedFrom, Series, TimeUnit};
use tracing::{debug, info};

use opsd_model::{PipelineError, Result};

use crate::frame::TimeFrame;
use crate::value_utils::parse_f64;

/// Datetime layouts tried in order after RFC 3339.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parses one timestamp cell. Offsets and `Z` designators are dropped:
/// the wall-clock reading stays as written and the result is naive.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    // Offsets without a colon ("+0100") are not RFC 3339 but do occur.
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(dt.naive_local());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn csv_error(path: &Path, source: csv::Error) -> PipelineError {
    let message = source.to_string();
    match source.into_kind() {
        csv::ErrorKind::Io(io) => PipelineError::Io {
            path: path.display().to_string(),
            source: io,
        },
        _ => PipelineError::Parse {
            path: path.display().to_string(),
            message,
        },
    }
}

/// Loads a comma-delimited file into a [`TimeFrame`].
///
/// The first column becomes a naive millisecond datetime column; every
/// other column becomes Float64 when all its non-missing cells parse as
/// f64 (a fully missing column counts as Float64), otherwise String.
/// Empty cells are missing. Header and data cells are trimmed and
/// BOM-stripped.
pub fn load_time_frame(path: &Path) -> Result<TimeFrame> {
    if !path.exists() {
        return Err(PipelineError::MissingInput {
            path: path.display().to_string(),
        });
    }
    debug!(path = %path.display(), "loading csv");

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|source| csv_error(path, source))?;

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| csv_error(path, source))?;
        raw_rows.push(record.iter().map(normalize_cell).collect());
    }
    let Some((header, data)) = raw_rows.split_first() else {
        return Err(PipelineError::Parse {
            path: path.display().to_string(),
            message: "file has no header row".to_string(),
        });
    };

    let time_column = header
        .first()
        .cloned()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| PipelineError::Parse {
            path: path.display().to_string(),
            message: "header has no timestamp column".to_string(),
        })?;

    let mut columns: Vec<Column> = Vec::with_capacity(header.len());
    columns.push(build_timestamp_column(path, &time_column, data)?);
    for (col_idx, name) in header.iter().enumerate().skip(1) {
        columns.push(build_value_column(name, col_idx, data));
    }

    let frame = DataFrame::new(columns).map_err(|source| PipelineError::Parse {
        path: path.display().to_string(),
        message: source.to_string(),
    })?;
    info!(
        path = %path.display(),
        rows = frame.height(),
        columns = frame.width(),
        "csv loaded"
    );
    Ok(TimeFrame::new(frame, time_column))
}

/// Parses the first cell of every data row. Rows are numbered from 1
/// counting the header, so the first data row is row 2.
fn build_timestamp_column(path: &Path, name: &str, data: &[Vec<String>]) -> Result<Column> {
    let mut stamps: Vec<Option<i64>> = Vec::with_capacity(data.len());
    for (idx, row) in data.iter().enumerate() {
        let cell = row.first().map(String::as_str).unwrap_or("");
        if cell.is_empty() {
            stamps.push(None);
            continue;
        }
        let Some(dt) = parse_timestamp(cell) else {
            return Err(PipelineError::parse_row(
                path,
                idx + 2,
                format!("invalid timestamp {cell:?}"),
            ));
        };
        stamps.push(Some(dt.and_utc().timestamp_millis()));
    }
    let series = Series::new(name.into(), stamps)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
        .map_err(|source| PipelineError::Parse {
            path: path.display().to_string(),
            message: source.to_string(),
        })?;
    Ok(series.into())
}

fn build_value_column(name: &str, col_idx: usize, data: &[Vec<String>]) -> Column {
    let mut non_missing = 0usize;
    let mut numeric = 0usize;
    for row in data {
        let cell = row.get(col_idx).map(String::as_str).unwrap_or("");
        if cell.is_empty() {
            continue;
        }
        non_missing += 1;
        if parse_f64(cell).is_some() {
            numeric += 1;
        }
    }
    // A fully missing column types as Float64, all null.
    if numeric == non_missing {
        let values: Vec<Option<f64>> = data
            .iter()
            .map(|row| parse_f64(row.get(col_idx).map(String::as_str).unwrap_or("")))
            .collect();
        Series::new(name.into(), values).into()
    } else {
        let values: Vec<Option<String>> = data
            .iter()
            .map(|row| row.get(col_idx).filter(|cell| !cell.is_empty()).cloned())
            .collect();
        Series::new(name.into(), values).into()
    }
}

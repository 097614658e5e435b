//! Calendar features derived from the timestamp column.

use anyhow::{Context, Result, bail};
use chrono::{Datelike, Timelike};
use opsd_ingest::TimeFrame;
use polars::prelude::{NamedFrom, Series};
use tracing::info;

/// Canonical name of the timestamp column in cleaned output.
pub const TIMESTAMP_COLUMN: &str = "timestamp";

/// Feature columns appended by [`derive_time_features`], in output
/// order.
pub const FEATURE_COLUMNS: [&str; 7] = [
    "year",
    "month",
    "day",
    "hour",
    "dayofweek",
    "quarter",
    "is_weekend",
];

/// Renames the timestamp column to [`TIMESTAMP_COLUMN`] when it is not
/// already called that.
pub fn standardize_timestamp_column(frame: &mut TimeFrame) -> Result<()> {
    if frame.time_column == TIMESTAMP_COLUMN {
        return Ok(());
    }
    let previous = frame.time_column.clone();
    frame
        .data
        .rename(&previous, TIMESTAMP_COLUMN.into())
        .with_context(|| format!("failed to rename {previous} to {TIMESTAMP_COLUMN}"))?;
    frame.time_column = TIMESTAMP_COLUMN.to_string();
    Ok(())
}

/// Appends the seven calendar columns, all Int32, derived per row from
/// the timestamp. Rows with a missing timestamp get missing features.
/// Existing columns are never overwritten; a name collision is an
/// error.
pub fn derive_time_features(frame: &mut TimeFrame) -> Result<()> {
    let existing = frame.column_names();
    for name in FEATURE_COLUMNS {
        if existing.iter().any(|column| column == name) {
            bail!("feature column {name} already exists in the table");
        }
    }

    let stamps = frame.timestamps()?;
    let mut year: Vec<Option<i32>> = Vec::with_capacity(stamps.len());
    let mut month: Vec<Option<i32>> = Vec::with_capacity(stamps.len());
    let mut day: Vec<Option<i32>> = Vec::with_capacity(stamps.len());
    let mut hour: Vec<Option<i32>> = Vec::with_capacity(stamps.len());
    let mut dayofweek: Vec<Option<i32>> = Vec::with_capacity(stamps.len());
    let mut quarter: Vec<Option<i32>> = Vec::with_capacity(stamps.len());
    let mut is_weekend: Vec<Option<i32>> = Vec::with_capacity(stamps.len());

    for stamp in &stamps {
        match stamp {
            Some(datetime) => {
                let month_number = datetime.month() as i32;
                let weekday = datetime.weekday().num_days_from_monday() as i32;
                year.push(Some(datetime.year()));
                month.push(Some(month_number));
                day.push(Some(datetime.day() as i32));
                hour.push(Some(datetime.hour() as i32));
                dayofweek.push(Some(weekday));
                quarter.push(Some((month_number - 1) / 3 + 1));
                is_weekend.push(Some(i32::from(weekday >= 5)));
            }
            None => {
                year.push(None);
                month.push(None);
                day.push(None);
                hour.push(None);
                dayofweek.push(None);
                quarter.push(None);
                is_weekend.push(None);
            }
        }
    }

    let columns = [year, month, day, hour, dayofweek, quarter, is_weekend];
    for (name, values) in FEATURE_COLUMNS.iter().zip(columns) {
        frame
            .data
            .with_column(Series::new((*name).into(), values))
            .with_context(|| format!("failed to append feature column {name}"))?;
    }
    info!(features = FEATURE_COLUMNS.len(), "derived calendar features");
    Ok(())
}

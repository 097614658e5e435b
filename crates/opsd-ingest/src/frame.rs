//! In-memory table passed between pipeline stages.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use polars::prelude::{AnyValue, DataFrame};

use crate::value_utils::any_to_f64;

/// A loaded table together with the name of its timestamp column.
///
/// The timestamp column is a naive millisecond datetime column; every
/// other column is Float64 or String as inferred at load time. Stages
/// consume a TimeFrame and produce a new one.
#[derive(Debug, Clone)]
pub struct TimeFrame {
    pub data: DataFrame,
    pub time_column: String,
}

impl TimeFrame {
    pub fn new(data: DataFrame, time_column: impl Into<String>) -> Self {
        Self {
            data,
            time_column: time_column.into(),
        }
    }

    pub fn height(&self) -> usize {
        self.data.height()
    }

    pub fn width(&self) -> usize {
        self.data.width()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Estimated in-memory size in megabytes.
    pub fn memory_mb(&self) -> f64 {
        self.data.estimated_size() as f64 / (1024.0 * 1024.0)
    }

    /// Missing cells in one column.
    pub fn missing_count(&self, name: &str) -> Result<usize> {
        let column = self
            .data
            .column(name)
            .with_context(|| format!("column {name} not found"))?;
        Ok(column.null_count())
    }

    /// Missing fraction in [0, 1] for one column; 0 for an empty table.
    pub fn missing_fraction(&self, name: &str) -> Result<f64> {
        let missing = self.missing_count(name)?;
        if self.height() == 0 {
            return Ok(0.0);
        }
        Ok(missing as f64 / self.height() as f64)
    }

    /// Non-missing values of a column converted to f64, in row order.
    /// Values that cannot convert (text cells) are skipped like nulls.
    pub fn numeric_values(&self, name: &str) -> Result<Vec<f64>> {
        let column = self
            .data
            .column(name)
            .with_context(|| format!("column {name} not found"))?;
        let mut values = Vec::with_capacity(self.height() - column.null_count());
        for idx in 0..self.height() {
            let value = column.get(idx).unwrap_or(AnyValue::Null);
            if let Some(v) = any_to_f64(value) {
                values.push(v);
            }
        }
        Ok(values)
    }

    /// Full-length view of a column as optional f64 values, in row order.
    pub fn numeric_values_opt(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let column = self
            .data
            .column(name)
            .with_context(|| format!("column {name} not found"))?;
        let mut values = Vec::with_capacity(self.height());
        for idx in 0..self.height() {
            let value = column.get(idx).unwrap_or(AnyValue::Null);
            values.push(any_to_f64(value));
        }
        Ok(values)
    }

    /// Timestamp column values in row order, None for missing cells.
    pub fn timestamps(&self) -> Result<Vec<Option<NaiveDateTime>>> {
        let column = self
            .data
            .column(&self.time_column)
            .with_context(|| format!("timestamp column {} not found", self.time_column))?;
        let values = column
            .datetime()
            .with_context(|| format!("column {} is not a datetime column", self.time_column))?
            .as_datetime_iter()
            .collect();
        Ok(values)
    }
}

//! Missing-value imputation for time-series columns.

use anyhow::{Context, Result};
use opsd_ingest::TimeFrame;
use opsd_model::ColumnTag;
use polars::prelude::FillNullStrategy;
use tracing::{debug, warn};

/// Aggregate fill counts over all imputed columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillReport {
    pub forward_filled: usize,
    pub backward_filled: usize,
    /// Missing values left after both passes, from fully missing
    /// columns.
    pub residual_missing: usize,
    pub columns_filled: usize,
}

/// Forward-fills then backward-fills every column tagged as a time
/// series, each independently.
///
/// Fills run in the table's current row order; rows are not re-sorted
/// by timestamp first, so the propagated value is the previous row's,
/// not the previous instant's. A fully missing column is left as is
/// and only counted under `residual_missing`.
///
/// `tags` must describe the columns of `frame`.
pub fn fill_time_series(frame: &mut TimeFrame, tags: &[ColumnTag]) -> Result<FillReport> {
    let mut report = FillReport::default();
    for tag in tags.iter().filter(|tag| tag.is_time_series()) {
        let column = frame
            .data
            .column(&tag.name)
            .with_context(|| format!("tagged column {} not in table", tag.name))?;
        let before = column.null_count();
        if before == 0 {
            continue;
        }
        if before == frame.height() {
            warn!(column = tag.name.as_str(), "column is fully missing, left as is");
            report.residual_missing += before;
            continue;
        }

        let series = column.as_materialized_series();
        let filled = series
            .fill_null(FillNullStrategy::Forward(None))
            .with_context(|| format!("failed to forward fill {}", tag.name))?;
        let after_forward = filled.null_count();
        let filled = if after_forward > 0 {
            filled
                .fill_null(FillNullStrategy::Backward(None))
                .with_context(|| format!("failed to backward fill {}", tag.name))?
        } else {
            filled
        };
        let residual = filled.null_count();

        debug!(
            column = tag.name.as_str(),
            forward = before - after_forward,
            backward = after_forward - residual,
            "filled missing values"
        );
        report.forward_filled += before - after_forward;
        report.backward_filled += after_forward - residual;
        report.residual_missing += residual;
        report.columns_filled += 1;

        frame
            .data
            .replace(&tag.name, filled)
            .with_context(|| format!("failed to replace {}", tag.name))?;
    }
    Ok(report)
}

//! Focus-country column selection and missing-threshold pruning.

use anyhow::{Context, Result};
use opsd_ingest::TimeFrame;
use opsd_model::{ColumnRole, ColumnTag};
use tracing::{debug, info};

/// A column removed by [`prune_missing`], with the missing fraction
/// that triggered the drop.
#[derive(Debug, Clone)]
pub struct DroppedColumn {
    pub name: String,
    pub missing_fraction: f64,
}

/// Keeps the timestamp column plus every column whose tag matched a
/// focus country, preserving the original column order.
pub fn select_focus_columns(frame: &TimeFrame, tags: &[ColumnTag]) -> Result<TimeFrame> {
    let keep: Vec<String> = tags
        .iter()
        .filter(|tag| tag.role == ColumnRole::Timestamp || tag.matches_focus())
        .map(|tag| tag.name.clone())
        .collect();
    let data = frame
        .data
        .select(keep)
        .context("failed to select focus-country columns")?;
    info!(
        before = frame.width(),
        after = data.width(),
        "selected focus-country columns"
    );
    Ok(TimeFrame::new(data, frame.time_column.clone()))
}

/// Drops every non-timestamp column whose missing fraction is at or
/// above `threshold`. The timestamp column is never dropped, whatever
/// its missing fraction.
pub fn prune_missing(frame: &TimeFrame, threshold: f64) -> Result<(TimeFrame, Vec<DroppedColumn>)> {
    let mut keep = Vec::new();
    let mut dropped = Vec::new();
    for name in frame.column_names() {
        if name == frame.time_column {
            keep.push(name);
            continue;
        }
        let fraction = frame.missing_fraction(&name)?;
        if fraction >= threshold {
            debug!(column = name.as_str(), fraction, "dropping mostly missing column");
            dropped.push(DroppedColumn {
                name,
                missing_fraction: fraction,
            });
        } else {
            keep.push(name);
        }
    }
    let data = frame
        .data
        .select(keep)
        .context("failed to drop mostly missing columns")?;
    if !dropped.is_empty() {
        info!(dropped = dropped.len(), "pruned mostly missing columns");
    }
    Ok((TimeFrame::new(data, frame.time_column.clone()), dropped))
}

//! The clean stage end to end: selection, pruning, imputation,
//! calendar features, output files.

use std::path::Path;

use anyhow::Result;
use opsd_ingest::TimeFrame;
use opsd_model::{PipelineConfig, tag_columns};
use tracing::info;

use crate::features::{derive_time_features, standardize_timestamp_column};
use crate::impute::{FillReport, fill_time_series};
use crate::select::{DroppedColumn, prune_missing, select_focus_columns};
use crate::writer::{WrittenOutputs, write_cleaned};

/// What the clean stage did, for logging and the console summary.
#[derive(Debug, Clone)]
pub struct CleanSummary {
    pub initial_columns: usize,
    pub selected_columns: usize,
    pub dropped: Vec<DroppedColumn>,
    pub fill: FillReport,
    pub rows: usize,
    pub final_columns: usize,
    pub outputs: WrittenOutputs,
}

/// Runs the full cleaning pass over a loaded table and writes the
/// output files under `output_dir`.
pub fn run_clean(
    frame: &TimeFrame,
    config: &PipelineConfig,
    output_dir: &Path,
) -> Result<CleanSummary> {
    let initial_columns = frame.width();
    let tags = tag_columns(
        &frame.column_names(),
        &frame.time_column,
        &config.focus_countries,
    );

    let selected = select_focus_columns(frame, &tags)?;
    let selected_columns = selected.width();
    let (mut working, dropped) = prune_missing(&selected, config.threshold_drop())?;

    // Tags are recomputed for the surviving columns.
    let tags = tag_columns(
        &working.column_names(),
        &working.time_column,
        &config.focus_countries,
    );
    let fill = fill_time_series(&mut working, &tags)?;

    standardize_timestamp_column(&mut working)?;
    derive_time_features(&mut working)?;

    let outputs = write_cleaned(&working, output_dir)?;
    info!(
        rows = working.height(),
        columns = working.width(),
        "clean stage finished"
    );

    Ok(CleanSummary {
        initial_columns,
        selected_columns,
        dropped,
        fill,
        rows: working.height(),
        final_columns: working.width(),
        outputs,
    })
}

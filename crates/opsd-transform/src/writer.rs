//! CSV output for the cleaned table and its preview sample.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use opsd_ingest::TimeFrame;
use polars::prelude::{CsvWriter, DataFrame, IdxCa, IdxSize, NamedFrom, SerWriter, Series};
use rand::seq::index::sample;
use tracing::info;

pub const CLEAN_FILENAME: &str = "opsd_clean_focus_countries.csv";
pub const SAMPLE_FILENAME: &str = "opsd_sample_1000.csv";

/// Upper bound on rows in the preview sample file.
pub const SAMPLE_ROWS: usize = 1000;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct WrittenOutputs {
    pub clean_path: PathBuf,
    pub sample_path: PathBuf,
    pub sample_rows: usize,
}

/// Writes the cleaned table and a random row sample under
/// `output_dir`, creating it as needed. Timestamps are serialized as
/// `%Y-%m-%d %H:%M:%S` text; missing values become empty fields.
///
/// The sample is drawn without replacement and unseeded, so its
/// contents differ between runs.
pub fn write_cleaned(frame: &TimeFrame, output_dir: &Path) -> Result<WrittenOutputs> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    let mut data = frame.data.clone();
    let formatted: Vec<Option<String>> = frame
        .timestamps()?
        .iter()
        .map(|stamp| stamp.map(|dt| dt.format(TIMESTAMP_FORMAT).to_string()))
        .collect();
    data.replace(
        &frame.time_column,
        Series::new(frame.time_column.as_str().into(), formatted),
    )
    .context("failed to serialize timestamp column")?;

    let clean_path = output_dir.join(CLEAN_FILENAME);
    write_csv(&mut data, &clean_path)?;
    info!(
        rows = data.height(),
        columns = data.width(),
        path = %clean_path.display(),
        "cleaned table written"
    );

    let sample_rows = data.height().min(SAMPLE_ROWS);
    let mut sampled = sample_frame(&data, sample_rows)?;
    let sample_path = output_dir.join(SAMPLE_FILENAME);
    write_csv(&mut sampled, &sample_path)?;
    info!(rows = sample_rows, path = %sample_path.display(), "sample written");

    Ok(WrittenOutputs {
        clean_path,
        sample_path,
        sample_rows,
    })
}

fn write_csv(data: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .finish(data)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn sample_frame(data: &DataFrame, rows: usize) -> Result<DataFrame> {
    let mut rng = rand::thread_rng();
    let indices: Vec<IdxSize> = sample(&mut rng, data.height(), rows)
        .into_iter()
        .map(|index| index as IdxSize)
        .collect();
    let indices = IdxCa::from_vec("sample".into(), indices);
    data.take(&indices).context("failed to sample cleaned table")
}

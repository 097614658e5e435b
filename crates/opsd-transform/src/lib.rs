pub mod features;
pub mod impute;
pub mod pipeline;
pub mod select;
pub mod writer;

pub use features::{
    FEATURE_COLUMNS, TIMESTAMP_COLUMN, derive_time_features, standardize_timestamp_column,
};
pub use impute::{FillReport, fill_time_series};
pub use pipeline::{CleanSummary, run_clean};
pub use select::{DroppedColumn, prune_missing, select_focus_columns};
pub use writer::{CLEAN_FILENAME, SAMPLE_FILENAME, SAMPLE_ROWS, WrittenOutputs, write_cleaned};

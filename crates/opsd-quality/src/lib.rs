pub mod analyzer;
pub mod explore;
pub mod profile;
pub mod stats;
pub mod temporal;

pub use analyzer::{QUALITY_REPORT_FILENAME, build_quality_report, write_quality_report};
pub use explore::{
    CountryColumns, EXPLORATION_REPORT_FILENAME, ExplorationSummary, PricePreview,
    build_exploration_summary, write_exploration_report,
};
pub use profile::{
    ColumnDescription, ColumnMissing, categorize, describe_column, dtype_histogram,
    missing_census, shape, top_missing,
};
pub use stats::{max_value, mean, median, min_value, outlier_counts, sample_std};
pub use temporal::{
    GAP_PREVIEW_LIMIT, TemporalCheck, check_temporal, expected_frequency_label, format_duration,
};

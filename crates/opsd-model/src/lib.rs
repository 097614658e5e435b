pub mod config;
pub mod error;
pub mod report;
pub mod tags;

pub use config::{
    DEFAULT_INTERVAL_MINUTES, DataSource, MissingValuesStrategy, PipelineConfig,
    load_pipeline_config,
};
pub use error::{PipelineError, Result};
pub use report::{
    ColumnCategories, GlobalMissing, MissingValues, OrderedMap, Overview, PriceColumnReport,
    PriceColumnStats, QualityReport, TemporalAnalysis, TopMissingColumn, round2,
};
pub use tags::{ColumnRole, ColumnTag, GenerationSource, tag_columns};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_serializes_in_document_order() {
        let report = QualityReport {
            overview: Overview {
                rows: 2,
                columns: 3,
                period_start: Some("2015-01-01 00:00:00".to_string()),
                period_end: Some("2015-01-01 01:00:00".to_string()),
                duration_days: 0,
                memory_mb: 0.01,
            },
            missing_values: MissingValues {
                global: GlobalMissing {
                    total_cells: 6,
                    missing_cells: 1,
                    missing_percentage: 16.67,
                },
                column_categories: ColumnCategories {
                    complete: 2,
                    partial: 1,
                    mostly_missing: 0,
                    empty: 0,
                },
                top_missing_columns: OrderedMap::new(),
            },
            temporal_analysis: TemporalAnalysis {
                expected_frequency: "1 hour".to_string(),
                gaps_count: 0,
                max_gap: None,
                duplicate_timestamps: 0,
            },
            price_analysis: OrderedMap::new(),
            recommendations: vec![],
        };
        let json = serde_json::to_string(&report).expect("serialize report");
        let overview_at = json.find("overview").expect("overview key");
        let missing_at = json.find("missing_values").expect("missing key");
        let temporal_at = json.find("temporal_analysis").expect("temporal key");
        let price_at = json.find("price_analysis").expect("price key");
        assert!(overview_at < missing_at);
        assert!(missing_at < temporal_at);
        assert!(temporal_at < price_at);
    }

    #[test]
    fn tag_roundtrip_covers_roles() {
        let tags = tag_columns(
            &[
                "utc_timestamp".to_string(),
                "DE_price_day_ahead".to_string(),
                "DE_load_actual".to_string(),
                "DE_solar_generation_actual".to_string(),
                "interpolated_values".to_string(),
            ],
            "utc_timestamp",
            &["DE".to_string()],
        );
        assert_eq!(tags[0].role, ColumnRole::Timestamp);
        assert_eq!(tags[1].role, ColumnRole::Price);
        assert_eq!(tags[2].role, ColumnRole::Load);
        assert_eq!(tags[3].role, ColumnRole::Generation(GenerationSource::Solar));
        assert_eq!(tags[4].role, ColumnRole::Other);
        assert!(tags[1].is_time_series());
        assert!(!tags[4].is_time_series());
    }
}

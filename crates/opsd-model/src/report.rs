//! Quality-report structure serialized once per analysis run.
//!
//! Field order mirrors the emitted JSON. Statistics are computed at full
//! precision and rounded to two decimals only when the report is built;
//! display formatting rounds to one decimal separately.

use serde::Serialize;
use serde::ser::SerializeMap;

/// Rounds to two decimals for report storage.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Map that serializes entries in insertion order.
///
/// Used for report sections whose key order carries meaning: top missing
/// columns descend by percentage, price analysis follows the focus list.
#[derive(Debug, Clone)]
pub struct OrderedMap<V>(Vec<(String, V)>);

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        self.0.push((key.into(), value));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QualityReport {
    pub overview: Overview,
    pub missing_values: MissingValues,
    pub temporal_analysis: TemporalAnalysis,
    /// Focus country -> price column -> statistics, in focus-list order.
    /// Countries with no price column are absent.
    pub price_analysis: OrderedMap<OrderedMap<PriceColumnReport>>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub rows: usize,
    pub columns: usize,
    pub period_start: Option<String>,
    pub period_end: Option<String>,
    pub duration_days: i64,
    pub memory_mb: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MissingValues {
    pub global: GlobalMissing,
    pub column_categories: ColumnCategories,
    /// The 20 worst columns by missing percentage, worst first (only
    /// columns with at least one missing value).
    pub top_missing_columns: OrderedMap<TopMissingColumn>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GlobalMissing {
    pub total_cells: usize,
    pub missing_cells: usize,
    pub missing_percentage: f64,
}

/// Column counts per completeness bucket. The four buckets partition the
/// column set: complete = 0% missing, partial < 50%, mostly_missing in
/// [50%, 100%), empty = 100%.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ColumnCategories {
    pub complete: usize,
    pub partial: usize,
    pub mostly_missing: usize,
    pub empty: usize,
}

impl ColumnCategories {
    pub fn total(&self) -> usize {
        self.complete + self.partial + self.mostly_missing + self.empty
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TopMissingColumn {
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemporalAnalysis {
    /// Human-readable expected spacing, e.g. "1 hour".
    pub expected_frequency: String,
    pub gaps_count: usize,
    /// Largest observed gap; absent when no gap was detected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_gap: Option<String>,
    pub duplicate_timestamps: usize,
}

/// Per-column price statistics, or the degenerate marker for a column
/// with no non-missing values.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PriceColumnReport {
    NoData { no_data: bool },
    Stats(PriceColumnStats),
}

impl PriceColumnReport {
    pub fn no_data() -> Self {
        Self::NoData { no_data: true }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceColumnStats {
    /// Non-missing observation count.
    pub count: usize,
    pub missing: usize,
    /// Missing percentage over all rows.
    pub missing_pct: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (ddof = 1); null with fewer than two
    /// observations.
    pub std: Option<f64>,
    pub negative_count: usize,
    /// Negative percentage over non-missing values, not over all rows.
    pub negative_pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_negative: Option<f64>,
    pub outliers_high_count: usize,
    pub outliers_low_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(35.0 / 3.0), 11.67);
        assert_eq!(round2(-3.14159), -3.14);
        assert_eq!(round2(42.0), 42.0);
    }

    #[test]
    fn test_no_data_report_serializes_marker() {
        let json = serde_json::to_string(&PriceColumnReport::no_data()).unwrap();
        assert_eq!(json, r#"{"no_data":true}"#);
    }

    #[test]
    fn test_max_gap_omitted_when_absent() {
        let analysis = TemporalAnalysis {
            expected_frequency: "1 hour".to_string(),
            gaps_count: 0,
            max_gap: None,
            duplicate_timestamps: 0,
        };
        let json = serde_json::to_string(&analysis).unwrap();
        assert!(!json.contains("max_gap"));
    }

    #[test]
    fn test_ordered_map_keeps_insertion_order() {
        let mut map = OrderedMap::new();
        map.insert("zz_first", 1);
        map.insert("aa_second", 2);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"zz_first":1,"aa_second":2}"#);
        assert_eq!(map.get("aa_second"), Some(&2));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["zz_first", "aa_second"]);
    }

    #[test]
    fn test_categories_total() {
        let categories = ColumnCategories {
            complete: 2,
            partial: 3,
            mostly_missing: 1,
            empty: 4,
        };
        assert_eq!(categories.total(), 10);
    }
}

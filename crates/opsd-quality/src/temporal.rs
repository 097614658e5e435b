//! Temporal-consistency checks: gaps against the expected interval and
//! duplicate timestamps.

use chrono::NaiveDateTime;

/// Number of leading gaps kept for the report preview. Detection itself
/// is exhaustive.
pub const GAP_PREVIEW_LIMIT: usize = 5;

#[derive(Debug, Clone, Default)]
pub struct TemporalCheck {
    pub gaps_count: usize,
    /// Largest gap in seconds; None when no gap was detected.
    pub max_gap_seconds: Option<i64>,
    /// Timestamps immediately preceding the first few gaps, in time
    /// order.
    pub gap_preview: Vec<NaiveDateTime>,
    pub duplicate_timestamps: usize,
}

/// Scans timestamps for gaps and duplicates.
///
/// Missing timestamps are ignored. The remaining values are sorted
/// ascending (stable, so equal stamps keep their original order); a
/// difference strictly greater than the expected interval is a gap.
/// Duplicates count as occurrences beyond the first per distinct value.
pub fn check_temporal(
    timestamps: &[Option<NaiveDateTime>],
    expected_interval_seconds: i64,
) -> TemporalCheck {
    let mut sorted: Vec<NaiveDateTime> = timestamps.iter().flatten().copied().collect();
    sorted.sort();

    let mut check = TemporalCheck::default();
    for pair in sorted.windows(2) {
        let diff = (pair[1] - pair[0]).num_seconds();
        if diff > expected_interval_seconds {
            check.gaps_count += 1;
            if check.max_gap_seconds.is_none_or(|max| diff > max) {
                check.max_gap_seconds = Some(diff);
            }
            if check.gap_preview.len() < GAP_PREVIEW_LIMIT {
                check.gap_preview.push(pair[0]);
            }
        }
        if diff == 0 {
            check.duplicate_timestamps += 1;
        }
    }
    check
}

/// Formats a positive duration the way the report expects, for example
/// `0 days 02:00:00`.
pub fn format_duration(seconds: i64) -> String {
    let days = seconds / 86_400;
    let rem = seconds % 86_400;
    let hours = rem / 3_600;
    let minutes = (rem % 3_600) / 60;
    let secs = rem % 60;
    format!("{days} days {hours:02}:{minutes:02}:{secs:02}")
}

/// Human-readable expected spacing, e.g. `1 hour` for 60 minutes.
pub fn expected_frequency_label(minutes: i64) -> String {
    if minutes == 60 {
        "1 hour".to_string()
    } else if minutes % 60 == 0 {
        format!("{} hours", minutes / 60)
    } else {
        format!("{minutes} minutes")
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn hourly(offsets: &[i64]) -> Vec<Option<NaiveDateTime>> {
        let base = NaiveDate::from_ymd_opt(2015, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        offsets
            .iter()
            .map(|h| Some(base + chrono::Duration::hours(*h)))
            .collect()
    }

    #[test]
    fn test_no_gaps_in_regular_series() {
        let check = check_temporal(&hourly(&[0, 1, 2, 3]), 3600);
        assert_eq!(check.gaps_count, 0);
        assert_eq!(check.max_gap_seconds, None);
        assert_eq!(check.duplicate_timestamps, 0);
    }

    #[test]
    fn test_gap_and_duplicate_detection() {
        // 00:00, 02:00, 02:00: one two-hour gap, one duplicate.
        let check = check_temporal(&hourly(&[0, 2, 2]), 3600);
        assert_eq!(check.gaps_count, 1);
        assert_eq!(check.max_gap_seconds, Some(7200));
        assert_eq!(check.duplicate_timestamps, 1);
        assert_eq!(check.gap_preview.len(), 1);
        assert_eq!(check.gap_preview[0].format("%H:%M").to_string(), "00:00");
    }

    #[test]
    fn test_unsorted_input_is_sorted_first() {
        let check = check_temporal(&hourly(&[5, 0, 1, 2]), 3600);
        assert_eq!(check.gaps_count, 1);
        assert_eq!(check.max_gap_seconds, Some(3 * 3600));
    }

    #[test]
    fn test_triple_duplicate_counts_two() {
        let check = check_temporal(&hourly(&[0, 0, 0, 1]), 3600);
        assert_eq!(check.duplicate_timestamps, 2);
    }

    #[test]
    fn test_missing_timestamps_ignored() {
        let mut stamps = hourly(&[0, 1]);
        stamps.insert(1, None);
        let check = check_temporal(&stamps, 3600);
        assert_eq!(check.gaps_count, 0);
        assert_eq!(check.duplicate_timestamps, 0);
    }

    #[test]
    fn test_preview_stops_at_limit_but_count_does_not() {
        let offsets: Vec<i64> = (0..8).map(|i| i * 3).collect();
        let check = check_temporal(&hourly(&offsets), 3600);
        assert_eq!(check.gaps_count, 7);
        assert_eq!(check.gap_preview.len(), GAP_PREVIEW_LIMIT);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(7200), "0 days 02:00:00");
        assert_eq!(format_duration(90_061), "1 days 01:01:01");
        assert_eq!(format_duration(0), "0 days 00:00:00");
    }

    #[test]
    fn test_expected_frequency_label() {
        assert_eq!(expected_frequency_label(60), "1 hour");
        assert_eq!(expected_frequency_label(120), "2 hours");
        assert_eq!(expected_frequency_label(15), "15 minutes");
    }
}

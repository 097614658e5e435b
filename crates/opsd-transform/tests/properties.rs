//! Property tests for imputation and calendar features.

use opsd_ingest::TimeFrame;
use opsd_model::tag_columns;
use opsd_transform::{derive_time_features, fill_time_series};
use polars::prelude::{DataFrame, DataType, NamedFrom, Series, TimeUnit};
use proptest::prelude::*;

const PRICE_COLUMN: &str = "DE_price_day_ahead";

fn frame_of(values: Vec<Option<f64>>) -> TimeFrame {
    let height = values.len();
    let stamps: Vec<Option<i64>> = (0..height as i64).map(|i| Some(i * 3_600_000)).collect();
    let time = Series::new("utc_timestamp".into(), stamps)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
        .unwrap();
    let prices = Series::new(PRICE_COLUMN.into(), values);
    TimeFrame::new(DataFrame::new(vec![time.into(), prices.into()]).unwrap(), "utc_timestamp")
}

fn frame_at_millis(millis: i64) -> TimeFrame {
    let time = Series::new("utc_timestamp".into(), vec![Some(millis)])
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
        .unwrap();
    TimeFrame::new(DataFrame::new(vec![time.into()]).unwrap(), "utc_timestamp")
}

fn feature_at(frame: &TimeFrame, name: &str) -> i32 {
    frame.numeric_values(name).unwrap()[0] as i32
}

proptest! {
    #[test]
    fn fill_leaves_no_missing_unless_column_is_empty(
        values in proptest::collection::vec(proptest::option::of(-1.0e3f64..1.0e3), 1..40)
    ) {
        let mut frame = frame_of(values.clone());
        let tags = tag_columns(&frame.column_names(), &frame.time_column, &["DE".to_string()]);
        fill_time_series(&mut frame, &tags).unwrap();

        let filled = frame.numeric_values_opt(PRICE_COLUMN).unwrap();
        let had_data = values.iter().any(Option::is_some);
        if had_data {
            prop_assert!(filled.iter().all(Option::is_some));
        } else {
            prop_assert!(filled.iter().all(Option::is_none));
        }
    }

    #[test]
    fn fill_is_idempotent(
        values in proptest::collection::vec(proptest::option::of(-1.0e3f64..1.0e3), 1..40)
    ) {
        let mut frame = frame_of(values);
        let tags = tag_columns(&frame.column_names(), &frame.time_column, &["DE".to_string()]);
        fill_time_series(&mut frame, &tags).unwrap();
        let first = frame.numeric_values_opt(PRICE_COLUMN).unwrap();

        let report = fill_time_series(&mut frame, &tags).unwrap();
        let second = frame.numeric_values_opt(PRICE_COLUMN).unwrap();

        prop_assert_eq!(first, second);
        prop_assert_eq!(report.forward_filled, 0);
        prop_assert_eq!(report.backward_filled, 0);
    }

    #[test]
    fn fill_preserves_existing_values(
        values in proptest::collection::vec(proptest::option::of(-1.0e3f64..1.0e3), 1..40)
    ) {
        let mut frame = frame_of(values.clone());
        let tags = tag_columns(&frame.column_names(), &frame.time_column, &["DE".to_string()]);
        fill_time_series(&mut frame, &tags).unwrap();

        let filled = frame.numeric_values_opt(PRICE_COLUMN).unwrap();
        for (original, after) in values.iter().zip(&filled) {
            if let Some(value) = original {
                prop_assert_eq!(after.unwrap(), *value);
            }
        }
    }

    #[test]
    fn calendar_features_satisfy_their_identities(
        millis in -1_000_000_000_000i64..4_102_444_800_000
    ) {
        let mut frame = frame_at_millis(millis);
        derive_time_features(&mut frame).unwrap();

        let month = feature_at(&frame, "month");
        let day = feature_at(&frame, "day");
        let hour = feature_at(&frame, "hour");
        let dayofweek = feature_at(&frame, "dayofweek");
        let quarter = feature_at(&frame, "quarter");
        let is_weekend = feature_at(&frame, "is_weekend");

        prop_assert!((1..=12).contains(&month));
        prop_assert!((1..=31).contains(&day));
        prop_assert!((0..=23).contains(&hour));
        prop_assert!((0..=6).contains(&dayofweek));
        prop_assert_eq!(quarter, (month - 1) / 3 + 1);
        prop_assert_eq!(is_weekend, i32::from(dayofweek >= 5));
    }
}

//! Descriptive statistics over extracted numeric values.
//!
//! All functions operate on the non-missing values of a column and keep
//! full precision; rounding happens only when a report is assembled.

/// Arithmetic mean; None for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median over a sorted copy; the average of the two middle values for
/// an even count. None for an empty slice.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Sample standard deviation (ddof = 1); None with fewer than two
/// values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

pub fn min_value(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

pub fn max_value(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// Counts of values beyond three sample standard deviations of the
/// mean, (high, low). Both zero when the deviation is zero or undefined.
pub fn outlier_counts(values: &[f64]) -> (usize, usize) {
    let (Some(m), Some(std)) = (mean(values), sample_std(values)) else {
        return (0, 0);
    };
    if std == 0.0 {
        return (0, 0);
    }
    let high = values.iter().filter(|v| **v > m + 3.0 * std).count();
    let low = values.iter().filter(|v| **v < m - 3.0 * std).count();
    (high, low)
}

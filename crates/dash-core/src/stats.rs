//! Descriptive-statistics helpers shared by the aggregation pipeline.

use serde::{Deserialize, Serialize};

// ── Mean ──────────────────────────────────────────────────────────────────────

/// Arithmetic mean of a slice, or `None` for an empty slice.
///
/// The empty case is deliberately not 0.0: an empty selection has no mean and
/// callers must render it as such.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

// ── Percentile ────────────────────────────────────────────────────────────────

/// Compute the `p`-th percentile of a **sorted** slice using linear
/// interpolation between the two nearest ranks.
///
/// Returns `0.0` for an empty slice.
pub fn percentile(sorted_data: &[f64], p: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }
    let len = sorted_data.len();
    if len == 1 {
        return sorted_data[0];
    }
    let rank = (p / 100.0) * (len as f64 - 1.0);
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted_data[lo];
    }
    let frac = rank - lo as f64;
    sorted_data[lo] + frac * (sorted_data[hi] - sorted_data[lo])
}

// ── FiveNumberSummary ─────────────────────────────────────────────────────────

/// Minimum, quartiles, and maximum of a sample — the figures a boxplot draws.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl FiveNumberSummary {
    /// Summarise a sample, or `None` when it is empty.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        Some(Self {
            min: sorted[0],
            q1: percentile(&sorted, 25.0),
            median: percentile(&sorted, 50.0),
            q3: percentile(&sorted, 75.0),
            max: sorted[sorted.len() - 1],
        })
    }
}

// ── Pearson correlation ───────────────────────────────────────────────────────

/// Pearson correlation coefficient of paired observations.
///
/// Returns `None` when fewer than two pairs are given or either side has zero
/// variance — there is no meaningful coefficient in those cases.
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    let n = pairs.len();
    if n < 2 {
        return None;
    }

    let inv_n = 1.0 / n as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() * inv_n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() * inv_n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return None;
    }

    // Floating-point rounding can push the ratio a hair outside [-1, 1].
    Some((cov / denom).clamp(-1.0, 1.0))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── mean ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_mean_empty_is_none() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_mean_basic() {
        let m = mean(&[100.0, 50.0]).unwrap();
        assert!((m - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_mean_single_value() {
        assert_eq!(mean(&[42.0]), Some(42.0));
    }

    // ── percentile ────────────────────────────────────────────────────────────

    #[test]
    fn test_percentile_empty_returns_zero() {
        assert_eq!(percentile(&[], 50.0), 0.0);
    }

    #[test]
    fn test_percentile_single_element() {
        assert_eq!(percentile(&[7.0], 0.0), 7.0);
        assert_eq!(percentile(&[7.0], 100.0), 7.0);
    }

    #[test]
    fn test_percentile_median_even() {
        let data = vec![1.0, 2.0, 3.0, 4.0];
        // rank = 0.5 * 3 = 1.5 → interpolate between 2 and 3
        assert!((percentile(&data, 50.0) - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_percentile_quartiles() {
        let data: Vec<f64> = (1..=5).map(|x| x as f64).collect();
        assert!((percentile(&data, 25.0) - 2.0).abs() < 1e-9);
        assert!((percentile(&data, 75.0) - 4.0).abs() < 1e-9);
    }

    // ── FiveNumberSummary ─────────────────────────────────────────────────────

    #[test]
    fn test_five_number_summary_empty() {
        assert!(FiveNumberSummary::from_values(&[]).is_none());
    }

    #[test]
    fn test_five_number_summary_unsorted_input() {
        let summary = FiveNumberSummary::from_values(&[3.0, 1.0, 5.0, 2.0, 4.0]).unwrap();
        assert_eq!(summary.min, 1.0);
        assert!((summary.q1 - 2.0).abs() < 1e-9);
        assert!((summary.median - 3.0).abs() < 1e-9);
        assert!((summary.q3 - 4.0).abs() < 1e-9);
        assert_eq!(summary.max, 5.0);
    }

    #[test]
    fn test_five_number_summary_single_value() {
        let summary = FiveNumberSummary::from_values(&[9.5]).unwrap();
        assert_eq!(summary.min, 9.5);
        assert_eq!(summary.median, 9.5);
        assert_eq!(summary.max, 9.5);
    }

    // ── pearson ───────────────────────────────────────────────────────────────

    #[test]
    fn test_pearson_too_few_pairs() {
        assert_eq!(pearson(&[]), None);
        assert_eq!(pearson(&[(1.0, 2.0)]), None);
    }

    #[test]
    fn test_pearson_perfect_positive() {
        let pairs: Vec<(f64, f64)> = (1..=5).map(|x| (x as f64, 2.0 * x as f64)).collect();
        let r = pearson(&pairs).unwrap();
        assert!((r - 1.0).abs() < 1e-12, "r = {r}");
    }

    #[test]
    fn test_pearson_perfect_negative() {
        let pairs: Vec<(f64, f64)> = (1..=5).map(|x| (x as f64, -3.0 * x as f64)).collect();
        let r = pearson(&pairs).unwrap();
        assert!((r + 1.0).abs() < 1e-12, "r = {r}");
    }

    #[test]
    fn test_pearson_zero_variance_is_none() {
        let pairs = vec![(1.0, 5.0), (2.0, 5.0), (3.0, 5.0)];
        assert_eq!(pearson(&pairs), None);
    }

    #[test]
    fn test_pearson_uncorrelated() {
        // Symmetric pattern with zero covariance.
        let pairs = vec![(-1.0, 1.0), (0.0, -2.0), (1.0, 1.0)];
        let r = pearson(&pairs).unwrap();
        assert!(r.abs() < 1e-12, "r = {r}");
    }

    #[test]
    fn test_pearson_stays_in_unit_interval() {
        let pairs: Vec<(f64, f64)> = (0..100)
            .map(|i| (i as f64 * 1e9, i as f64 * 1e9 + 0.5))
            .collect();
        let r = pearson(&pairs).unwrap();
        assert!((-1.0..=1.0).contains(&r));
    }
}

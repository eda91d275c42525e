/// Lower quartile, median and upper quartile of a dataset.
///
/// # Examples
///
/// ```
/// use ewsurv_stats::percentiles::Quartiles;
///
/// let values = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// let quartiles = Quartiles::new(&values).unwrap();
///
/// assert_eq!(quartiles.q1, 3.25);
/// assert_eq!(quartiles.median, 5.5);
/// assert_eq!(quartiles.q3, 7.75);
/// assert_eq!(quartiles.iqr(), 4.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    /// 25th percentile.
    pub q1: f64,
    /// 50th percentile.
    pub median: f64,
    /// 75th percentile.
    pub q3: f64,
}

impl Quartiles {
    /// Computes quartiles from unsorted values.
    ///
    /// Returns `None` if the dataset is empty.
    #[must_use]
    pub fn new(values: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }

    /// Computes quartiles from sorted values.
    ///
    /// Returns `None` if the dataset is empty.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );
        if sorted_values.is_empty() {
            return None;
        }
        Some(Self {
            q1: compute_percentile(sorted_values, 25.0),
            median: compute_percentile(sorted_values, 50.0),
            q3: compute_percentile(sorted_values, 75.0),
        })
    }

    /// Interquartile range `q3 - q1`.
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Computes a single percentile value from sorted data.
///
/// Uses linear interpolation between the two closest ranks: for a dataset
/// with n values, the k-th percentile sits at fractional position
/// `(n - 1) * k / 100` and is interpolated between its neighbouring order
/// statistics.
///
/// # Arguments
///
/// * `sorted_values` - Values sorted in ascending order
/// * `percentile` - The percentile to compute (0.0 to 100.0, clamped)
///
/// # Returns
///
/// The value at the specified percentile. Returns `f64::NAN` if the input is empty.
///
/// # Examples
///
/// ```
/// use ewsurv_stats::percentiles::compute_percentile;
///
/// let values = vec![1.0, 2.0, 3.0, 4.0];
///
/// assert_eq!(compute_percentile(&values, 50.0), 2.5);
/// assert_eq!(compute_percentile(&values, 25.0), 1.75);
/// assert_eq!(compute_percentile(&values, 100.0), 4.0);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], percentile: f64) -> f64 {
    if sorted_values.is_empty() {
        return f64::NAN;
    }
    let last = sorted_values.len() - 1;
    let position = last as f64 * percentile.clamp(0.0, 100.0) / 100.0;
    let lower = (position.floor() as usize).min(last);
    let upper = (position.ceil() as usize).min(last);
    let fraction = position - lower as f64;
    sorted_values[lower] + fraction * (sorted_values[upper] - sorted_values[lower])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(compute_percentile(&[], 50.0).is_nan());
        assert!(Quartiles::new(&[]).is_none());
    }

    #[test]
    fn test_single_value_is_every_percentile() {
        for p in [0.0, 25.0, 50.0, 75.0, 100.0] {
            assert_eq!(compute_percentile(&[7.0], p), 7.0);
        }
        assert_eq!(Quartiles::new(&[7.0]).unwrap().iqr(), 0.0);
    }

    #[test]
    fn test_extremes_are_min_and_max() {
        let values = [1.0, 4.0, 9.0, 16.0];
        assert_eq!(compute_percentile(&values, 0.0), 1.0);
        assert_eq!(compute_percentile(&values, 100.0), 16.0);
    }

    #[test]
    fn test_quartiles_of_unsorted_input() {
        let quartiles = Quartiles::new(&[9.0, 1.0, 5.0, 8.0, 2.0]).unwrap();
        assert_eq!(quartiles.q1, 2.0);
        assert_eq!(quartiles.median, 5.0);
        assert_eq!(quartiles.q3, 8.0);
        assert_eq!(quartiles.iqr(), 6.0);
    }

    #[test]
    fn test_out_of_range_percentile_is_clamped() {
        let values = [1.0, 2.0, 3.0];
        assert_eq!(compute_percentile(&values, -10.0), 1.0);
        assert_eq!(compute_percentile(&values, 250.0), 3.0);
    }
}

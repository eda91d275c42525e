use ewsurv_stats::{descriptive::DescriptiveStats, percentiles::Quartiles};
use serde::Serialize;

use crate::StatsError;

/// Descriptive statistics of an uncensored sample.
///
/// `std` uses the `n - 1` denominator; quartiles interpolate linearly between
/// order statistics.
///
/// # Example
///
/// ```
/// use ewsurv_analysis::sample_summary::SampleSummary;
///
/// let summary = SampleSummary::new(&[4.0, 1.0, 3.0, 2.0, 5.0]).unwrap();
/// assert_eq!(summary.median, 3.0);
/// assert_eq!(summary.q1, 2.0);
/// assert_eq!(summary.iqr, 2.0);
/// assert_eq!(summary.range, 4.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSummary {
    pub n: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
}

impl SampleSummary {
    pub fn new(values: &[f64]) -> Result<Self, StatsError> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let stats = DescriptiveStats::from_sorted(&sorted).ok_or(StatsError::EmptyData)?;
        let quartiles = Quartiles::from_sorted(&sorted).ok_or(StatsError::EmptyData)?;
        Ok(Self {
            n: stats.count,
            mean: stats.mean,
            median: stats.median,
            std: stats.std_dev,
            q1: quartiles.q1,
            q3: quartiles.q3,
            iqr: quartiles.iqr(),
            min: stats.min,
            max: stats.max,
            range: stats.range,
        })
    }
}

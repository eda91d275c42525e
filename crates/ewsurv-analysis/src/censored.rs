//! Summary statistics for censored samples
//!
//! Each censoring scheme produces its own record shape, because each scheme
//! knows different things about its observations:
//!
//! - **Type I**: which values are exact (below `t0`), so location and spread
//!   of the complete observations.
//! - **Type II**: the same for the first `m` order statistics, plus the time
//!   at which observation stopped.
//! - **Random**: a censoring indicator per subject, so counts and extremes
//!   split by indicator. Extremes of an empty group are absent rather than
//!   undefined.
//!
//! ```text
//! Type I:  n, n_complete, mean, median, std
//! Type II: n, n_complete, censoring_value, mean, median, std
//! Random:  n, n_complete, n_censored, min/max/median_time,
//!          [min/max_complete], [min/max_censored]
//! ```
//!
//! # Example
//!
//! ```
//! use ewsurv_analysis::censored::{RandomSummary, TypeISummary};
//! use ewsurv_model::CensoredObservation;
//!
//! let type_i = TypeISummary::from_data(&[0.2, 0.4, 1.5, 0.9, 1.5], 1.5).unwrap();
//! assert_eq!(type_i.n_complete, 3);
//!
//! let all_censored = [
//!     CensoredObservation { time: 0.3, censored: true },
//!     CensoredObservation { time: 0.7, censored: true },
//! ];
//! let random = RandomSummary::from_observations(&all_censored).unwrap();
//! assert_eq!(random.min_complete, None);
//! assert_eq!(random.max_censored, Some(0.7));
//! ```

use ewsurv_model::{CensoredObservation, RandomCensored, TypeICensored, TypeIICensored};
use ewsurv_stats::descriptive::DescriptiveStats;
use serde::Serialize;

use crate::StatsError;

/// Minimum number of complete observations for a sample standard deviation.
pub const MIN_COMPLETE_FOR_STD: usize = 2;

/// Statistics of a Type I (fixed-time) censored sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeISummary {
    /// Total number of observations
    pub n: usize,
    /// Number of observations strictly below the censoring time
    pub n_complete: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (`n - 1` denominator) of the complete observations
    pub std: f64,
}

/// Statistics of a Type II (fixed-count) censored sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeIISummary {
    /// Total number of observations
    pub n: usize,
    /// Number of observed failures `m`
    pub n_complete: usize,
    /// Value recorded for the censored subjects, `data[m]`.
    ///
    /// Absent when `m == n` (nothing was censored).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub censoring_value: Option<f64>,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (`n - 1` denominator) of the first `m` values
    pub std: f64,
}

/// Statistics of a randomly censored sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RandomSummary {
    pub n: usize,
    pub n_complete: usize,
    pub n_censored: usize,
    pub min_time: f64,
    pub max_time: f64,
    pub median_time: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_complete: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_complete: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_censored: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_censored: Option<f64>,
}

/// Statistics of a censored sample, tagged with the scheme that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, derive_more::From)]
#[serde(tag = "scheme", rename_all = "snake_case")]
pub enum CensoringSummary {
    TypeI(TypeISummary),
    #[serde(rename = "type_ii")]
    TypeII(TypeIISummary),
    Random(RandomSummary),
}

impl CensoringSummary {
    #[must_use]
    pub fn scheme_name(&self) -> &'static str {
        match self {
            Self::TypeI(_) => "Type I",
            Self::TypeII(_) => "Type II",
            Self::Random(_) => "Random",
        }
    }

    /// Total number of observations.
    #[must_use]
    pub fn n(&self) -> usize {
        match self {
            Self::TypeI(s) => s.n,
            Self::TypeII(s) => s.n,
            Self::Random(s) => s.n,
        }
    }

    /// Number of exact event times.
    #[must_use]
    pub fn n_complete(&self) -> usize {
        match self {
            Self::TypeI(s) => s.n_complete,
            Self::TypeII(s) => s.n_complete,
            Self::Random(s) => s.n_complete,
        }
    }

    /// Percentage of censored observations.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn censoring_rate(&self) -> f64 {
        let n = self.n();
        if n == 0 {
            return 0.0;
        }
        100.0 * (n - self.n_complete()) as f64 / n as f64
    }
}

/// Location and spread of the complete observations.
fn complete_stats(complete: &[f64]) -> Result<DescriptiveStats, StatsError> {
    if complete.len() < MIN_COMPLETE_FOR_STD {
        return Err(StatsError::InsufficientCompleteData {
            required: MIN_COMPLETE_FOR_STD,
            found: complete.len(),
        });
    }
    DescriptiveStats::new(complete.iter().copied()).ok_or(StatsError::EmptyData)
}

impl TypeISummary {
    /// Summarizes a Type I sample; values strictly below `threshold` are complete.
    pub fn from_data(data: &[f64], threshold: f64) -> Result<Self, StatsError> {
        Self::from_dataset(&TypeICensored {
            times: data.to_vec(),
            threshold,
        })
    }

    pub fn from_dataset(data: &TypeICensored) -> Result<Self, StatsError> {
        let complete = data.complete_times().collect::<Vec<_>>();
        let stats = complete_stats(&complete)?;
        Ok(Self {
            n: data.times.len(),
            n_complete: complete.len(),
            mean: stats.mean,
            median: stats.median,
            std: stats.std_dev,
        })
    }
}

impl TypeIISummary {
    /// Summarizes a sorted Type II sample whose first `complete` values are event times.
    pub fn from_data(data: &[f64], complete: usize) -> Result<Self, StatsError> {
        let dataset = TypeIICensored::new(data.to_vec(), complete).map_err(|_| {
            StatsError::CompleteCountExceedsLength {
                complete,
                len: data.len(),
            }
        })?;
        Self::from_dataset(&dataset)
    }

    pub fn from_dataset(data: &TypeIICensored) -> Result<Self, StatsError> {
        let stats = complete_stats(data.complete_times())?;
        Ok(Self {
            n: data.times().len(),
            n_complete: data.complete(),
            censoring_value: data.censoring_value(),
            mean: stats.mean,
            median: stats.median,
            std: stats.std_dev,
        })
    }
}

impl RandomSummary {
    pub fn from_observations(data: &[CensoredObservation]) -> Result<Self, StatsError> {
        let times_with = move |indicator: u8| {
            data.iter()
                .filter(move |o| o.indicator() == indicator)
                .map(|o| o.time)
        };
        let all = DescriptiveStats::new(data.iter().map(|o| o.time)).ok_or(StatsError::EmptyData)?;
        let complete = DescriptiveStats::new(times_with(0));
        let censored = DescriptiveStats::new(times_with(1));

        Ok(Self {
            n: all.count,
            n_complete: complete.as_ref().map_or(0, |s| s.count),
            n_censored: censored.as_ref().map_or(0, |s| s.count),
            min_time: all.min,
            max_time: all.max,
            median_time: all.median,
            min_complete: complete.as_ref().map(|s| s.min),
            max_complete: complete.as_ref().map(|s| s.max),
            min_censored: censored.as_ref().map(|s| s.min),
            max_censored: censored.as_ref().map(|s| s.max),
        })
    }

    pub fn from_dataset(data: &RandomCensored) -> Result<Self, StatsError> {
        Self::from_observations(&data.observations)
    }
}

#[cfg(test)]
mod tests {
    use ewsurv_model::{GeneralizedExponential, SimulationSeed, censoring};

    use super::*;

    fn obs(time: f64, censored: bool) -> CensoredObservation {
        CensoredObservation { time, censored }
    }

    #[test]
    fn test_type_i_uses_values_below_threshold_only() {
        let data = [0.5, 1.0, 1.5, 1.5, 0.3, 1.5];
        let summary = TypeISummary::from_data(&data, 1.5).unwrap();
        assert_eq!(summary.n, 6);
        assert_eq!(summary.n_complete, 3);
        assert!((summary.mean - 0.6).abs() < 1e-12);
        assert_eq!(summary.median, 0.5);
        // sample std of [0.3, 0.5, 1.0]
        assert!((summary.std - 0.360_555_127_546_398_9).abs() < 1e-12);
    }

    #[test]
    fn test_type_i_insufficient_complete_data() {
        let err = TypeISummary::from_data(&[0.4, 2.0, 2.0], 2.0).unwrap_err();
        assert_eq!(
            err,
            StatsError::InsufficientCompleteData {
                required: 2,
                found: 1
            }
        );
        assert!(TypeISummary::from_data(&[], 2.0).is_err());
    }

    #[test]
    fn test_type_i_complete_never_exceeds_n() {
        let lifetime = GeneralizedExponential::new(1.5, 2.0).unwrap();
        let mut rng = SimulationSeed::from(42).rng();
        let data = censoring::type_i(&lifetime, 20, 1.5, &mut rng).unwrap();
        let summary = TypeISummary::from_dataset(&data).unwrap();
        assert_eq!(summary.n, 20);
        assert!(summary.n_complete <= summary.n);
        assert_eq!(summary.n_complete, data.complete_times().count());
    }

    /// Remission times of two drug arms, 20 patients each; the 10 patients
    /// without remission are censored at the end of the study.
    fn remission_arm(events: [f64; 10]) -> Vec<f64> {
        events.into_iter().chain([1.0; 10]).collect()
    }

    #[test]
    fn test_type_i_remission_study() {
        let drug_a = remission_arm([
            0.033_455_14,
            0.086_564_03,
            0.087_999_47,
            0.243_858_21,
            0.277_550_32,
            0.407_872_47,
            0.588_256_64,
            0.641_256_20,
            0.906_791_61,
            0.942_222_08,
        ]);
        let drug_b = remission_arm([
            0.037_889_58,
            0.122_072_57,
            0.203_199_83,
            0.244_742_99,
            0.304_924_13,
            0.342_244_62,
            0.429_501_44,
            0.444_845_82,
            0.638_050_66,
            0.691_197_21,
        ]);

        let a = TypeISummary::from_data(&drug_a, 1.0).unwrap();
        assert_eq!((a.n, a.n_complete), (20, 10));
        assert!((a.mean - 0.421_582_617).abs() < 1e-9);
        assert!((a.median - 0.342_711_395).abs() < 1e-9);
        assert!((a.std - 0.334_864_362_903_634).abs() < 1e-9);

        let b = TypeISummary::from_data(&drug_b, 1.0).unwrap();
        assert_eq!((b.n, b.n_complete), (20, 10));
        assert!((b.mean - 0.345_866_885).abs() < 1e-9);
        assert!((b.median - 0.323_584_375).abs() < 1e-9);
        assert!((b.std - 0.210_454_333_034_267).abs() < 1e-9);

        let rate = CensoringSummary::from(a).censoring_rate();
        assert!((rate - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_type_ii_summary() {
        let data = [0.1, 0.2, 0.6, 0.6, 0.6];
        let summary = TypeIISummary::from_data(&data, 3).unwrap();
        assert_eq!(summary.n, 5);
        assert_eq!(summary.n_complete, 3);
        assert_eq!(summary.censoring_value, Some(0.6));
        assert!((summary.mean - 0.3).abs() < 1e-12);
        assert_eq!(summary.median, 0.2);
    }

    #[test]
    fn test_type_ii_censoring_value_is_mth_failure_for_simulated_data() {
        let lifetime = GeneralizedExponential::new(1.5, 2.0).unwrap();
        let mut rng = SimulationSeed::from(42).rng();
        let data = censoring::type_ii(&lifetime, 20, 12, &mut rng).unwrap();
        let summary = TypeIISummary::from_dataset(&data).unwrap();
        assert_eq!(summary.censoring_value, Some(data.times()[11]));
        assert_eq!(summary.n_complete, 12);
    }

    #[test]
    fn test_type_ii_edge_counts() {
        let data = [0.1, 0.2, 0.3];
        let uncensored = TypeIISummary::from_data(&data, 3).unwrap();
        assert_eq!(uncensored.censoring_value, None);

        assert!(matches!(
            TypeIISummary::from_data(&data, 4),
            Err(StatsError::CompleteCountExceedsLength { complete: 4, len: 3 })
        ));
        assert!(matches!(
            TypeIISummary::from_data(&data, 1),
            Err(StatsError::InsufficientCompleteData { found: 1, .. })
        ));
        assert!(TypeIISummary::from_data(&[0.0, 0.0], 0).is_err());
    }

    #[test]
    fn test_random_summary_splits_by_indicator() {
        let data = [
            obs(0.4, false),
            obs(0.1, true),
            obs(0.9, false),
            obs(0.3, true),
            obs(0.2, false),
        ];
        let summary = RandomSummary::from_observations(&data).unwrap();
        assert_eq!(summary.n, 5);
        assert_eq!(summary.n_complete, 3);
        assert_eq!(summary.n_censored, 2);
        assert_eq!(summary.min_time, 0.1);
        assert_eq!(summary.max_time, 0.9);
        assert_eq!(summary.median_time, 0.3);
        assert_eq!(summary.min_complete, Some(0.2));
        assert_eq!(summary.max_complete, Some(0.9));
        assert_eq!(summary.min_censored, Some(0.1));
        assert_eq!(summary.max_censored, Some(0.3));
    }

    #[test]
    fn test_random_all_censored_omits_complete_keys() {
        let data = [obs(0.5, true), obs(0.25, true), obs(1.0, true)];
        let summary = RandomSummary::from_observations(&data).unwrap();
        assert_eq!(summary.n_complete, 0);
        assert_eq!(summary.min_complete, None);

        let json = serde_json::to_value(&summary).unwrap();
        let object = json.as_object().unwrap();
        assert!(!object.contains_key("min_complete"));
        assert!(!object.contains_key("max_complete"));
        assert_eq!(object["min_censored"], 0.25);
        assert_eq!(object["max_censored"], 1.0);
    }

    #[test]
    fn test_random_no_censoring_omits_censored_keys() {
        let data = [obs(0.5, false), obs(0.7, false)];
        let json = serde_json::to_value(RandomSummary::from_observations(&data).unwrap()).unwrap();
        assert!(json.get("min_censored").is_none());
        assert!(json.get("max_censored").is_none());
        assert_eq!(json["n_censored"], 0);
    }

    #[test]
    fn test_random_empty_is_error() {
        assert_eq!(
            RandomSummary::from_observations(&[]).unwrap_err(),
            StatsError::EmptyData
        );
    }

    #[test]
    fn test_summary_enum_is_tagged_by_scheme() {
        let summary =
            CensoringSummary::from(TypeIISummary::from_data(&[0.1, 0.2, 0.2], 2).unwrap());
        assert_eq!(summary.scheme_name(), "Type II");
        assert_eq!(summary.n(), 3);
        assert_eq!(summary.n_complete(), 2);
        assert!((summary.censoring_rate() - 100.0 / 3.0).abs() < 1e-12);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["scheme"], "type_ii");
        assert_eq!(json["censoring_value"], 0.2);
    }
}

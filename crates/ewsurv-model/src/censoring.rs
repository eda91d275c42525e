//! Right-censoring simulators.
//!
//! Each scheme draws `n` lifetimes from a [`GeneralizedExponential`] and turns
//! them into what an experimenter would actually observe:
//!
//! - **Type I** ([`type_i`]): the study ends at a fixed time `t0`; lifetimes
//!   beyond it are recorded as `t0`.
//! - **Type II** ([`type_ii`]): the study ends at the `m`-th failure; the
//!   remaining subjects are recorded at that failure time.
//! - **Random** ([`random`]): every subject has its own exponential censoring
//!   time; the earlier of the two times is recorded with an indicator.
//!
//! ```text
//! Type I  (t0):  |--x   |--x   |------t0   |------t0
//! Type II (m=2): |-x    |--x   |---x(2)    |---x(2)
//! Random:        |--x   |-o    |----x      |--o       (o = censored)
//! ```

use rand::{Rng, distr::Distribution as _};
use rand_distr::Exp;
use serde::{Deserialize, Serialize};

use crate::{CensoringError, GeneralizedExponential, InvalidParameterError};

/// Lifetimes observed under Type I (fixed-time) censoring.
///
/// A value equal to `threshold` is a censored observation; anything below it
/// is an exact event time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeICensored {
    /// Observed times in draw order.
    pub times: Vec<f64>,
    /// The censoring time `t0`.
    pub threshold: f64,
}

impl TypeICensored {
    #[must_use]
    pub fn is_censored(&self, time: f64) -> bool {
        time >= self.threshold
    }

    /// Exact event times, in draw order.
    pub fn complete_times(&self) -> impl Iterator<Item = f64> + '_ {
        self.times.iter().copied().filter(|&t| !self.is_censored(t))
    }
}

/// Lifetimes observed under Type II (fixed-count) censoring.
///
/// `times` is sorted ascending. The first `complete` entries are event times,
/// the rest repeat the time of the last observed failure. The number of
/// complete observations never exceeds the number of times.
///
/// # Example
///
/// ```
/// use ewsurv_model::{CensoringError, TypeIICensored};
///
/// let data = TypeIICensored::new(vec![0.1, 0.4, 0.4], 2)?;
/// assert_eq!(data.complete_times(), &[0.1, 0.4]);
/// assert_eq!(data.censoring_value(), Some(0.4));
///
/// assert!(TypeIICensored::new(vec![0.1], 2).is_err());
/// # Ok::<(), CensoringError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTypeIICensored")]
pub struct TypeIICensored {
    times: Vec<f64>,
    complete: usize,
}

#[derive(Deserialize)]
struct RawTypeIICensored {
    times: Vec<f64>,
    complete: usize,
}

impl TryFrom<RawTypeIICensored> for TypeIICensored {
    type Error = CensoringError;

    fn try_from(raw: RawTypeIICensored) -> Result<Self, Self::Error> {
        Self::new(raw.times, raw.complete)
    }
}

impl TypeIICensored {
    pub fn new(times: Vec<f64>, complete: usize) -> Result<Self, CensoringError> {
        if complete > times.len() {
            return Err(CensoringError::CompleteCountExceedsSize {
                complete,
                size: times.len(),
            });
        }
        Ok(Self { times, complete })
    }

    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Number of observed failures `m`.
    #[must_use]
    pub fn complete(&self) -> usize {
        self.complete
    }

    #[must_use]
    pub fn complete_times(&self) -> &[f64] {
        &self.times[..self.complete]
    }

    /// The entry right after the complete block, `times[m]`.
    ///
    /// For simulated data this is the time of the `m`-th failure, `0.0` when
    /// `m == 0`, and `None` when nothing was censored.
    #[must_use]
    pub fn censoring_value(&self) -> Option<f64> {
        self.times.get(self.complete).copied()
    }
}

/// One subject's observed time and whether it was right-censored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CensoredObservation {
    pub time: f64,
    pub censored: bool,
}

impl CensoredObservation {
    /// Censoring indicator: 0 for an observed event, 1 for a censored time.
    #[must_use]
    pub fn indicator(&self) -> u8 {
        u8::from(self.censored)
    }
}

/// Observations under random (competing-risk) censoring, in draw order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomCensored {
    pub observations: Vec<CensoredObservation>,
}

/// Simulates Type I censoring: lifetimes longer than `threshold` are recorded as `threshold`.
///
/// A threshold below every lifetime censors all observations.
pub fn type_i<R>(
    lifetime: &GeneralizedExponential,
    n: usize,
    threshold: f64,
    rng: &mut R,
) -> Result<TypeICensored, CensoringError>
where
    R: Rng + ?Sized,
{
    let threshold = InvalidParameterError::check_non_negative("t0", threshold)?;
    let times = lifetime
        .generate(n, rng)
        .into_iter()
        .map(|t| t.min(threshold))
        .collect();
    Ok(TypeICensored { times, threshold })
}

/// Simulates Type II censoring: observation stops at the `complete`-th failure.
///
/// With `complete == 0` the study stops before any failure and every entry is
/// `0.0`; with `complete == n` nothing is censored.
pub fn type_ii<R>(
    lifetime: &GeneralizedExponential,
    n: usize,
    complete: usize,
    rng: &mut R,
) -> Result<TypeIICensored, CensoringError>
where
    R: Rng + ?Sized,
{
    if complete > n {
        return Err(CensoringError::CompleteCountExceedsSize { complete, size: n });
    }
    let mut times = lifetime.generate(n, rng);
    times.sort_by(f64::total_cmp);
    let stop_time = complete.checked_sub(1).map_or(0.0, |last| times[last]);
    times[complete..].fill(stop_time);
    Ok(TypeIICensored { times, complete })
}

/// Simulates random censoring with exponential censoring times of mean `mean_censoring_time`.
///
/// All `n` lifetimes are drawn before the `n` censoring times. A tie goes to the event.
pub fn random<R>(
    lifetime: &GeneralizedExponential,
    n: usize,
    mean_censoring_time: f64,
    rng: &mut R,
) -> Result<RandomCensored, CensoringError>
where
    R: Rng + ?Sized,
{
    let eta = InvalidParameterError::check_positive("eta", mean_censoring_time)?;
    let censoring = Exp::new(1.0 / eta).map_err(|_| InvalidParameterError {
        name: "eta",
        value: eta,
        requirement: "a valid exponential mean",
    })?;

    let event_times = lifetime.generate(n, rng);
    let censoring_times = (0..n).map(|_| censoring.sample(rng)).collect::<Vec<f64>>();

    let observations = event_times
        .into_iter()
        .zip(censoring_times)
        .map(|(event, censor)| {
            if event <= censor {
                CensoredObservation {
                    time: event,
                    censored: false,
                }
            } else {
                CensoredObservation {
                    time: censor,
                    censored: true,
                }
            }
        })
        .collect();
    Ok(RandomCensored { observations })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimulationSeed;

    fn lifetime() -> GeneralizedExponential {
        GeneralizedExponential::new(1.5, 2.0).unwrap()
    }

    #[test]
    fn test_type_i_values_never_exceed_threshold() {
        let mut rng = SimulationSeed::from(42).rng();
        let data = type_i(&lifetime(), 20, 1.5, &mut rng).unwrap();
        assert_eq!(data.times.len(), 20);
        assert!(data.times.iter().all(|&t| t <= 1.5));
        let censored = data.times.iter().filter(|&&t| data.is_censored(t)).count();
        assert_eq!(data.complete_times().count() + censored, 20);
        assert!(data.complete_times().all(|t| t < 1.5));
    }

    #[test]
    fn test_type_i_keeps_uncensored_lifetimes() {
        let raw = lifetime().generate(30, &mut SimulationSeed::from(3).rng());
        let data = type_i(&lifetime(), 30, 0.8, &mut SimulationSeed::from(3).rng()).unwrap();
        for (raw, observed) in raw.iter().zip(&data.times) {
            assert_eq!(*observed, raw.min(0.8));
        }
    }

    #[test]
    fn test_type_i_zero_threshold_censors_everything() {
        let mut rng = SimulationSeed::from(1).rng();
        let data = type_i(&lifetime(), 10, 0.0, &mut rng).unwrap();
        assert!(data.times.iter().all(|&t| data.is_censored(t)));
        assert_eq!(data.complete_times().count(), 0);
    }

    #[test]
    fn test_type_i_rejects_negative_threshold() {
        let mut rng = SimulationSeed::from(1).rng();
        let err = type_i(&lifetime(), 10, -1.0, &mut rng).unwrap_err();
        assert!(matches!(err, CensoringError::InvalidParameter(e) if e.name == "t0"));
    }

    #[test]
    fn test_type_ii_sorted_with_repeated_tail() {
        let mut rng = SimulationSeed::from(42).rng();
        let data = type_ii(&lifetime(), 20, 12, &mut rng).unwrap();
        let times = data.times();
        assert_eq!(times.len(), 20);
        assert!(times.is_sorted_by(|a, b| a <= b));
        let stop_time = times[11];
        let tail = times.iter().filter(|&&t| t == stop_time).count();
        // ties among continuous draws are practically impossible
        assert_eq!(tail, 20 - 12 + 1);
        assert_eq!(&times[12..], &[stop_time; 8]);
        assert_eq!(data.complete_times().len(), 12);
        assert_eq!(data.censoring_value(), Some(stop_time));
    }

    #[test]
    fn test_type_ii_keeps_smallest_lifetimes() {
        let mut raw = lifetime().generate(15, &mut SimulationSeed::from(9).rng());
        raw.sort_by(f64::total_cmp);
        let data = type_ii(&lifetime(), 15, 5, &mut SimulationSeed::from(9).rng()).unwrap();
        assert_eq!(data.complete_times(), &raw[..5]);
    }

    #[test]
    fn test_type_ii_edge_counts() {
        let mut rng = SimulationSeed::from(5).rng();
        let none_observed = type_ii(&lifetime(), 6, 0, &mut rng).unwrap();
        assert_eq!(none_observed.times(), &[0.0; 6]);
        assert!(none_observed.complete_times().is_empty());
        assert_eq!(none_observed.censoring_value(), Some(0.0));

        let all_observed = type_ii(&lifetime(), 6, 6, &mut rng).unwrap();
        assert_eq!(all_observed.complete_times(), all_observed.times());
        assert_eq!(all_observed.censoring_value(), None);
        assert!(all_observed.times().is_sorted_by(|a, b| a < b));

        let err = type_ii(&lifetime(), 6, 7, &mut rng).unwrap_err();
        assert_eq!(
            err,
            CensoringError::CompleteCountExceedsSize {
                complete: 7,
                size: 6
            }
        );
    }

    #[test]
    fn test_type_ii_new_rejects_complete_count_beyond_length() {
        assert_eq!(
            TypeIICensored::new(vec![0.1, 0.2], 5).unwrap_err(),
            CensoringError::CompleteCountExceedsSize {
                complete: 5,
                size: 2
            }
        );
        let data = TypeIICensored::new(vec![0.1, 0.2], 2).unwrap();
        assert_eq!(data.complete(), 2);
    }

    #[test]
    fn test_type_ii_deserialize_validates_complete_count() {
        let err = serde_json::from_str::<TypeIICensored>(r#"{"times":[0.1,0.2],"complete":5}"#)
            .unwrap_err();
        assert!(err.to_string().contains("exceeds sample size"));

        let data: TypeIICensored =
            serde_json::from_str(r#"{"times":[0.1,0.2,0.2],"complete":2}"#).unwrap();
        assert_eq!(data.complete_times(), &[0.1, 0.2]);
        assert_eq!(
            serde_json::to_string(&data).unwrap(),
            r#"{"times":[0.1,0.2,0.2],"complete":2}"#
        );
    }

    #[test]
    fn test_random_records_minimum_with_indicator() {
        let mut rng = SimulationSeed::from(42).rng();
        let data = random(&lifetime(), 20, 1.0, &mut rng).unwrap();
        assert_eq!(data.observations.len(), 20);
        assert!(data.observations.iter().all(|o| o.indicator() <= 1));
        assert!(data.observations.iter().all(|o| o.time >= 0.0));
    }

    #[test]
    fn test_random_time_is_the_earlier_of_event_and_censoring() {
        let seed = SimulationSeed::from(11);
        let events = lifetime().generate(40, &mut seed.rng());
        let data = random(&lifetime(), 40, 0.5, &mut seed.rng()).unwrap();
        for (event, obs) in events.iter().zip(&data.observations) {
            if obs.censored {
                assert!(obs.time < *event);
            } else {
                assert_eq!(obs.time, *event);
            }
        }
    }

    #[test]
    fn test_random_tiny_mean_censors_almost_everything() {
        let mut rng = SimulationSeed::from(2).rng();
        let data = random(&lifetime(), 200, 1e-6, &mut rng).unwrap();
        let censored = data.observations.iter().filter(|o| o.censored).count();
        assert!(censored > 190);
    }

    #[test]
    fn test_random_rejects_non_positive_mean() {
        let mut rng = SimulationSeed::from(2).rng();
        assert!(random(&lifetime(), 5, 0.0, &mut rng).is_err());
    }

    #[test]
    fn test_indicator_values() {
        let event = CensoredObservation {
            time: 1.0,
            censored: false,
        };
        let censored = CensoredObservation {
            time: 1.0,
            censored: true,
        };
        assert_eq!(event.indicator(), 0);
        assert_eq!(censored.indicator(), 1);
    }
}

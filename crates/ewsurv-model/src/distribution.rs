//! The Exponentiated-Weibull distribution.
//!
//! EW(α, β, γ) raises the Weibull CDF with shape α and scale β to the power γ:
//!
//! ```text
//! F(x) = [1 - exp(-(x/β)^α)]^γ                                    x > 0
//! f(x) = γ (α/β) (x/β)^(α-1) exp(-(x/β)^α) [1 - exp(-(x/β)^α)]^(γ-1)
//! Q(p) = β (-ln(1 - p^(1/γ)))^(1/α)                               0 <= p < 1
//! h(x) = f(x) / (1 - F(x))
//! ```
//!
//! With γ = 1 it reduces to the Weibull distribution, with α = 1 to the
//! generalized exponential distribution.

use rand::{Rng, distr::Distribution};
use serde::{Deserialize, Serialize};

use crate::InvalidParameterError;

/// Survival probability at or below which the hazard is reported as infinite.
pub const SURVIVAL_EPSILON: f64 = 1e-10;

/// Exponentiated-Weibull distribution with shape α, scale β and power γ.
///
/// Parameters are validated on construction, so every method is infallible.
///
/// # Example
///
/// ```
/// use ewsurv_model::ExponentiatedWeibull;
///
/// let ew = ExponentiatedWeibull::new(2.0, 4.0, 3.0)?;
/// let median = ew.quantile(0.5);
/// assert!((ew.cdf(median) - 0.5).abs() < 1e-12);
///
/// assert!(ExponentiatedWeibull::new(0.0, 4.0, 3.0).is_err());
/// # Ok::<(), ewsurv_model::InvalidParameterError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawParameters")]
pub struct ExponentiatedWeibull {
    alpha: f64,
    beta: f64,
    gamma: f64,
}

#[derive(Deserialize)]
struct RawParameters {
    alpha: f64,
    beta: f64,
    gamma: f64,
}

impl TryFrom<RawParameters> for ExponentiatedWeibull {
    type Error = InvalidParameterError;

    fn try_from(raw: RawParameters) -> Result<Self, Self::Error> {
        Self::new(raw.alpha, raw.beta, raw.gamma)
    }
}

impl ExponentiatedWeibull {
    /// Creates the distribution, rejecting parameters that are not finite and strictly positive.
    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Result<Self, InvalidParameterError> {
        Ok(Self {
            alpha: InvalidParameterError::check_positive("alpha", alpha)?,
            beta: InvalidParameterError::check_positive("beta", beta)?,
            gamma: InvalidParameterError::check_positive("gamma", gamma)?,
        })
    }

    /// Shape parameter α.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Scale parameter β.
    #[must_use]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Power parameter γ.
    #[must_use]
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// `(x/β)^α`, the cumulative hazard of the underlying Weibull.
    fn weibull_cumulative_hazard(&self, x: f64) -> f64 {
        (x / self.beta).powf(self.alpha)
    }

    /// Probability density at `x`. Zero for `x <= 0`.
    #[must_use]
    pub fn density(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        let z = self.weibull_cumulative_hazard(x);
        let weibull_cdf = -(-z).exp_m1();
        let weibull_pdf =
            (self.alpha / self.beta) * (x / self.beta).powf(self.alpha - 1.0) * (-z).exp();
        self.gamma * weibull_pdf * weibull_cdf.powf(self.gamma - 1.0)
    }

    /// Cumulative distribution function at `x`. Zero for `x <= 0`.
    #[must_use]
    pub fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        let z = self.weibull_cumulative_hazard(x);
        (-(-z).exp_m1()).powf(self.gamma)
    }

    /// Survival function `1 - F(x)`.
    #[must_use]
    pub fn survival(&self, x: f64) -> f64 {
        1.0 - self.cdf(x)
    }

    /// Quantile function, the inverse of [`Self::cdf`].
    ///
    /// Returns 0 at `p = 0`, `+inf` at `p = 1` and `NaN` for `p` outside `[0, 1]`.
    #[must_use]
    pub fn quantile(&self, p: f64) -> f64 {
        if !(0.0..=1.0).contains(&p) {
            return f64::NAN;
        }
        let weibull_p = p.powf(1.0 / self.gamma);
        self.beta * (-(-weibull_p).ln_1p()).powf(1.0 / self.alpha)
    }

    /// Hazard rate `f(x) / (1 - F(x))`.
    ///
    /// Once the survival probability drops to [`SURVIVAL_EPSILON`] or below the
    /// ratio is numerically meaningless and `+inf` is returned instead.
    #[must_use]
    pub fn hazard(&self, x: f64) -> f64 {
        let survival = self.survival(x);
        if survival <= SURVIVAL_EPSILON {
            f64::INFINITY
        } else {
            self.density(x) / survival
        }
    }

    /// Draws `n` independent lifetimes by pushing uniform draws through [`Self::quantile`].
    pub fn generate_sample<R>(&self, n: usize, rng: &mut R) -> Vec<f64>
    where
        R: Rng + ?Sized,
    {
        (0..n).map(|_| self.sample(rng)).collect()
    }
}

impl Distribution<f64> for ExponentiatedWeibull {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.quantile(rng.random::<f64>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimulationSeed;

    const PARAMETER_SETS: [(f64, f64, f64); 6] = [
        (2.0, 4.0, 3.0),
        (2.0, 2.0, 1.0),
        (1.4, 2.0, 2.0),
        (1.0, 2.0, 2.0),
        (0.8, 1.0, 2.0),
        (3.5, 0.5, 0.4),
    ];

    fn all_distributions() -> impl Iterator<Item = ExponentiatedWeibull> {
        PARAMETER_SETS
            .iter()
            .map(|&(a, b, g)| ExponentiatedWeibull::new(a, b, g).unwrap())
    }

    fn grid() -> impl Iterator<Item = f64> {
        (1..=80).map(|i| f64::from(i) * 0.05)
    }

    #[test]
    fn test_rejects_non_positive_parameters() {
        for (a, b, g) in [
            (0.0, 1.0, 1.0),
            (1.0, -2.0, 1.0),
            (1.0, 1.0, 0.0),
            (f64::NAN, 1.0, 1.0),
            (1.0, f64::INFINITY, 1.0),
        ] {
            assert!(ExponentiatedWeibull::new(a, b, g).is_err(), "({a}, {b}, {g})");
        }
        let err = ExponentiatedWeibull::new(1.0, 1.0, -1.0).unwrap_err();
        assert_eq!(err.name, "gamma");
    }

    #[test]
    fn test_quantile_at_zero_is_zero() {
        for ew in all_distributions() {
            assert_eq!(ew.quantile(0.0), 0.0);
        }
    }

    #[test]
    fn test_quantile_edges() {
        let ew = ExponentiatedWeibull::new(2.0, 4.0, 3.0).unwrap();
        assert_eq!(ew.quantile(1.0), f64::INFINITY);
        assert!(ew.quantile(-0.1).is_nan());
        assert!(ew.quantile(1.1).is_nan());
    }

    #[test]
    fn test_cdf_quantile_round_trip() {
        for ew in all_distributions() {
            for x in grid() {
                let p = ew.cdf(x);
                if p >= 1.0 {
                    continue;
                }
                let round_trip = ew.cdf(ew.quantile(p));
                assert!((round_trip - p).abs() < 1e-6, "{ew:?} at x={x}");
            }
        }
    }

    #[test]
    fn test_quantile_inverts_cdf() {
        for ew in all_distributions() {
            for p in [0.01, 0.1, 0.25, 0.5, 0.75, 0.9, 0.99] {
                let x = ew.quantile(p);
                assert!((ew.cdf(x) - p).abs() < 1e-9, "{ew:?} at p={p}");
            }
        }
    }

    #[test]
    fn test_cdf_is_monotone_between_zero_and_one() {
        for ew in all_distributions() {
            let mut previous = 0.0;
            for x in grid() {
                let p = ew.cdf(x);
                assert!((0.0..=1.0).contains(&p));
                assert!(p >= previous);
                previous = p;
            }
        }
    }

    #[test]
    fn test_density_is_derivative_of_cdf() {
        let h = 1e-6;
        for ew in all_distributions() {
            for x in grid() {
                let numeric = (ew.cdf(x + h) - ew.cdf(x - h)) / (2.0 * h);
                let analytic = ew.density(x);
                let tolerance = 1e-5 * analytic.abs().max(1.0);
                assert!(
                    (numeric - analytic).abs() < tolerance,
                    "{ew:?} at x={x}: {numeric} vs {analytic}"
                );
            }
        }
    }

    #[test]
    fn test_non_positive_support() {
        let ew = ExponentiatedWeibull::new(2.0, 4.0, 3.0).unwrap();
        assert_eq!(ew.density(0.0), 0.0);
        assert_eq!(ew.density(-1.0), 0.0);
        assert_eq!(ew.cdf(-1.0), 0.0);
        assert_eq!(ew.survival(0.0), 1.0);
        assert_eq!(ew.hazard(0.0), 0.0);
    }

    #[test]
    fn test_weibull_special_case() {
        // gamma = 1 is a plain Weibull: F(x) = 1 - exp(-(x/beta)^alpha)
        let ew = ExponentiatedWeibull::new(2.0, 2.0, 1.0).unwrap();
        let x: f64 = 1.7;
        let expected = 1.0 - (-(x / 2.0).powi(2)).exp();
        assert!((ew.cdf(x) - expected).abs() < 1e-12);
        // and its hazard is (alpha/beta)(x/beta)^(alpha-1)
        assert!((ew.hazard(x) - x / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_hazard_finite_below_guard_infinite_above() {
        for ew in all_distributions() {
            for x in (1..=400).map(|i| f64::from(i) * 0.1) {
                let survival = ew.survival(x);
                let hazard = ew.hazard(x);
                if survival > 2.0 * SURVIVAL_EPSILON {
                    assert!(hazard.is_finite() && hazard >= 0.0, "{ew:?} at x={x}");
                } else if survival <= SURVIVAL_EPSILON {
                    assert_eq!(hazard, f64::INFINITY, "{ew:?} at x={x}");
                }
            }
        }
        let ew = ExponentiatedWeibull::new(2.0, 1.0, 1.0).unwrap();
        assert_eq!(ew.hazard(100.0), f64::INFINITY);
    }

    #[test]
    fn test_sample_is_reproducible_under_seed() {
        let ew = ExponentiatedWeibull::new(2.0, 4.0, 3.0).unwrap();
        let first = ew.generate_sample(20, &mut SimulationSeed::from(7).rng());
        let second = ew.generate_sample(20, &mut SimulationSeed::from(7).rng());
        let other = ew.generate_sample(20, &mut SimulationSeed::from(8).rng());
        assert_eq!(first, second);
        assert_ne!(first, other);
    }

    #[test]
    fn test_sample_median_close_to_theoretical() {
        let ew = ExponentiatedWeibull::new(2.0, 4.0, 3.0).unwrap();
        let mut sample = ew.generate_sample(50, &mut SimulationSeed::from(42).rng());
        sample.sort_by(f64::total_cmp);
        let empirical = f64::midpoint(sample[24], sample[25]);
        let theoretical = ew.quantile(0.5);
        // Standard error of the median at n=50 is ~6% of the median.
        assert!(
            ((empirical - theoretical) / theoretical).abs() < 0.2,
            "empirical {empirical} vs theoretical {theoretical}"
        );
    }

    #[test]
    fn test_deserialize_validates_parameters() {
        let ew: ExponentiatedWeibull =
            serde_json::from_str(r#"{"alpha":2.0,"beta":4.0,"gamma":3.0}"#).unwrap();
        assert_eq!((ew.alpha(), ew.beta(), ew.gamma()), (2.0, 4.0, 3.0));

        let result: Result<ExponentiatedWeibull, _> =
            serde_json::from_str(r#"{"alpha":2.0,"beta":-4.0,"gamma":3.0}"#);
        assert!(result.unwrap_err().to_string().contains("beta"));
    }
}

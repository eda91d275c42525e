use ewsurv_model::ExponentiatedWeibull;
use serde::Serialize;

/// Median and quartiles of an EW distribution, read off its quantile function.
///
/// # Example
///
/// ```
/// use ewsurv_analysis::theoretical::TheoreticalQuantiles;
/// use ewsurv_model::ExponentiatedWeibull;
///
/// let ew = ExponentiatedWeibull::new(2.0, 2.0, 1.0).unwrap();
/// let quantiles = TheoreticalQuantiles::from_distribution(&ew);
/// assert!((quantiles.median - 2.0 * 2f64.ln().sqrt()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TheoreticalQuantiles {
    pub median: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
}

impl TheoreticalQuantiles {
    #[must_use]
    pub fn from_distribution(distribution: &ExponentiatedWeibull) -> Self {
        let q1 = distribution.quantile(0.25);
        let q3 = distribution.quantile(0.75);
        Self {
            median: distribution.quantile(0.5),
            q1,
            q3,
            iqr: q3 - q1,
        }
    }
}

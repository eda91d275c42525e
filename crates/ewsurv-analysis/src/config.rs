//! Run configuration for the report.
//!
//! A [`ReportConfig`] lists which samples to draw, which distributions to
//! tabulate theoretically and which hazard curves to plot. The default
//! configuration reproduces the standard report:
//!
//! | sample    | n   | EW(α, β, γ) | histogram bins |
//! |-----------|-----|-------------|----------------|
//! | `sample1` | 50  | (2, 4, 3)   | 20             |
//! | `sample2` | 100 | (2, 4, 3)   | 25             |
//! | `sample3` | 50  | (2, 2, 1)   | 20             |
//! | `sample4` | 100 | (2, 2, 1)   | 25             |
//!
//! Configurations deserialize from JSON; missing fields fall back to the
//! defaults above.
//!
//! ```
//! use ewsurv_analysis::config::ReportConfig;
//! use ewsurv_model::SimulationSeed;
//!
//! let config: ReportConfig = serde_json::from_str(r#"{ "seed": "000000000000000000000000000004d2" }"#)?;
//! assert_eq!(config.samples.len(), 4);
//! assert_eq!(config.seed, SimulationSeed::from(1234));
//! # Ok::<(), serde_json::Error>(())
//! ```

use ewsurv_model::{ExponentiatedWeibull, SimulationSeed};
use serde::{Deserialize, Serialize};

/// Seed of the standard report run.
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Seed of the single random stream all samples are drawn from, in order.
    pub seed: SimulationSeed,
    pub samples: Vec<SampleSpec>,
    pub theoretical: Vec<TheoreticalSpec>,
    pub hazard_curves: HazardCurveSpec,
}

/// One simulated EW sample and how to plot it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSpec {
    pub size: usize,
    pub distribution: ExponentiatedWeibull,
    pub histogram_bins: usize,
}

/// A distribution whose quantiles are tabulated under `theoretical_EW_{label}`.
///
/// Labels must be unique within a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TheoreticalSpec {
    pub label: String,
    pub distribution: ExponentiatedWeibull,
}

/// Hazard functions evaluated on `points` evenly spaced values of `[x_min, x_max]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardCurveSpec {
    pub x_min: f64,
    pub x_max: f64,
    pub points: usize,
    pub distributions: Vec<ExponentiatedWeibull>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        let ew_243 = constant_ew(2.0, 4.0, 3.0);
        let ew_221 = constant_ew(2.0, 2.0, 1.0);
        Self {
            seed: SimulationSeed::from(DEFAULT_SEED),
            samples: vec![
                SampleSpec {
                    size: 50,
                    distribution: ew_243,
                    histogram_bins: 20,
                },
                SampleSpec {
                    size: 100,
                    distribution: ew_243,
                    histogram_bins: 25,
                },
                SampleSpec {
                    size: 50,
                    distribution: ew_221,
                    histogram_bins: 20,
                },
                SampleSpec {
                    size: 100,
                    distribution: ew_221,
                    histogram_bins: 25,
                },
            ],
            theoretical: vec![
                TheoreticalSpec {
                    label: "243".to_owned(),
                    distribution: ew_243,
                },
                TheoreticalSpec {
                    label: "221".to_owned(),
                    distribution: ew_221,
                },
            ],
            hazard_curves: HazardCurveSpec::default(),
        }
    }
}

impl Default for HazardCurveSpec {
    fn default() -> Self {
        Self {
            x_min: 0.0,
            x_max: 20.0,
            points: 100,
            distributions: vec![
                constant_ew(1.4, 2.0, 2.0),
                constant_ew(1.0, 2.0, 2.0),
                constant_ew(0.8, 1.0, 2.0),
            ],
        }
    }
}

fn constant_ew(alpha: f64, beta: f64, gamma: f64) -> ExponentiatedWeibull {
    ExponentiatedWeibull::new(alpha, beta, gamma).expect("default parameters are positive")
}

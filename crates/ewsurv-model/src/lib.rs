//! Exponentiated-Weibull lifetime model and censoring simulation.
//!
//! - [`distribution`]: the EW distribution (density, CDF, quantile, hazard, sampling)
//! - [`lifetime`]: the generalized-exponential lifetime generator used by the censoring schemes
//! - [`censoring`]: Type I, Type II and random right-censoring simulators
//! - [`seed`]: reproducible seeding of the random source
//!
//! Every sampling function takes the random source explicitly, so a run is
//! fully determined by its [`SimulationSeed`].
//!
//! ```
//! use ewsurv_model::{ExponentiatedWeibull, SimulationSeed};
//!
//! let ew = ExponentiatedWeibull::new(2.0, 4.0, 3.0)?;
//! let mut rng = SimulationSeed::from(42).rng();
//! let sample = ew.generate_sample(50, &mut rng);
//! assert_eq!(sample.len(), 50);
//! assert!(sample.iter().all(|&x| x >= 0.0));
//! # Ok::<(), ewsurv_model::InvalidParameterError>(())
//! ```

pub use self::{censoring::*, distribution::*, lifetime::*, seed::*};

pub mod censoring;
pub mod distribution;
pub mod lifetime;
pub mod seed;

/// A model parameter outside its admissible range.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
#[display("invalid parameter {name}={value}: must be {requirement}")]
pub struct InvalidParameterError {
    pub name: &'static str,
    pub value: f64,
    pub requirement: &'static str,
}

impl InvalidParameterError {
    /// Checks that `value` is finite and strictly positive.
    pub fn check_positive(name: &'static str, value: f64) -> Result<f64, Self> {
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(Self {
                name,
                value,
                requirement: "finite and strictly positive",
            })
        }
    }

    /// Checks that `value` is finite and not negative.
    pub fn check_non_negative(name: &'static str, value: f64) -> Result<f64, Self> {
        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(Self {
                name,
                value,
                requirement: "finite and non-negative",
            })
        }
    }
}

/// Error returned when a censoring scheme cannot produce a dataset.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum CensoringError {
    #[display("{_0}")]
    InvalidParameter(InvalidParameterError),
    #[display("number of complete observations {complete} exceeds sample size {size}")]
    #[from(skip)]
    CompleteCountExceedsSize { complete: usize, size: usize },
}

//! Statistics and report assembly on top of the lifetime model
//!
//! This crate turns simulated samples into the numbers a report shows:
//!
//! 1. **Complete samples** ([`sample_summary::SampleSummary`]): location,
//!    spread and quartiles of an EW sample
//! 2. **Censored samples** ([`censored`]): one summary record per censoring
//!    scheme, behind [`censored::CensoringSummary`]
//! 3. **Theoretical quantiles** ([`theoretical::TheoreticalQuantiles`]): median
//!    and quartiles read off the EW quantile function
//! 4. **Report data** ([`report::ReportData`]): plots, formulas, the `dane`
//!    statistics block and template placeholders, built from a
//!    [`config::ReportConfig`]
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use ewsurv_analysis::{config::ReportConfig, report::ReportData};
//!
//! let report = ReportData::build(&ReportConfig::default(), Utc::now())?;
//! assert_eq!(report.dane.samples.len(), 4);
//! assert!(report.placeholders.contains_key("MEDIAN_THEO_243"));
//! # Ok::<(), ewsurv_analysis::report::ReportError>(())
//! ```

pub mod censored;
pub mod config;
pub mod report;
pub mod sample_summary;
pub mod theoretical;

/// Failure to compute summary statistics for a sample.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum StatsError {
    #[display("cannot summarize an empty sample")]
    EmptyData,
    #[display("at least {required} complete observations are required, found {found}")]
    InsufficientCompleteData { required: usize, found: usize },
    #[display("number of complete observations {complete} exceeds sample length {len}")]
    CompleteCountExceedsLength { complete: usize, len: usize },
}

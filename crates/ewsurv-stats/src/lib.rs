//! Statistical utilities for the ewsurv workspace.
//!
//! This crate provides the sample-level statistics shared by the censoring
//! summaries and the report builder:
//!
//! - **Descriptive statistics**: mean, median, sample variance, standard deviation, range
//! - **Percentiles**: linearly interpolated percentiles (quartiles, IQR)
//! - **Histogram generation**: equal-width frequency distributions for plotting
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`percentiles`]: Interpolated percentiles and quartiles
//! - [`histogram`]: Equal-width histograms for visualizing sample distributions
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use ewsurv_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.median, 3.0);
//! ```
//!
//! ## Computing quartiles
//!
//! ```
//! use ewsurv_stats::percentiles::Quartiles;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let quartiles = Quartiles::new(&values).unwrap();
//! assert_eq!(quartiles.q1, 2.0);
//! assert_eq!(quartiles.q3, 4.0);
//! ```
//!
//! ## Creating a histogram
//!
//! ```
//! use ewsurv_stats::histogram::Histogram;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
//! let histogram = Histogram::new(values, 5);
//! assert_eq!(histogram.bins.len(), 5);
//! ```

pub mod descriptive;
pub mod histogram;
pub mod percentiles;

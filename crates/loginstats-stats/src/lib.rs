//! Statistical primitives for the login statistics pipeline.
//!
//! This crate provides a small collection of statistical tools:
//!
//! - **Descriptive statistics**: mean, median, sample variance and standard deviation
//! - **Percentiles**: linearly interpolated percentiles and medians
//! - **Histogram generation**: frequency distributions over fixed-width bins
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`percentiles`]: Percentile computation
//! - [`histogram`]: Histogram construction for visualizing data distributions
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use loginstats_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Creating a histogram
//!
//! ```
//! use loginstats_stats::histogram::Histogram;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
//! let histogram = Histogram::with_bin_width(values, 4.0, Some(0.0));
//! assert_eq!(histogram.bins.len(), 3);
//! ```

pub mod descriptive;
pub mod histogram;
pub mod percentiles;

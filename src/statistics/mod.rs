//! Robust summary statistics
//!
//! Median and median absolute deviation (MAD) of a numeric sequence. Unlike
//! mean and standard deviation, both are insensitive to a handful of extreme
//! values, which is what makes them suitable for separating "typical" items
//! from outliers.
//!
//! # Example
//!
//! ```
//! use stratsample::statistics::RobustStats;
//!
//! let stats = RobustStats::compute(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
//!
//! assert_eq!(stats.median, 3.0);
//! assert_eq!(stats.mad, 1.0);
//! assert!(stats.contains(2.0));
//! assert!(!stats.contains(5.0));
//! ```

mod robust;

pub use robust::{median, median_mad, RobustStats};

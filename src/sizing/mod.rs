//! Sample-size estimation
//!
//! Each estimator is a small parameter struct implementing
//! [`SampleSizeEstimator`](crate::traits::SampleSizeEstimator).
//! [`SampleSizeMethod`] wraps the scalar-valued ones so a caller can pick an
//! estimator at run time; [`StratifiedSampleSize`] returns one count per
//! stratum and is used directly.
//!
//! All rounding is half-to-even.
//!
//! # Example
//!
//! ```
//! use stratsample::sizing::{PopulationBasedSampleSize, SampleSizeMethod};
//! use stratsample::traits::SampleSizeEstimator;
//!
//! let method = SampleSizeMethod::Population(PopulationBasedSampleSize::new(100_000));
//! assert_eq!(method.sample_size().unwrap(), 15_812);
//! ```

mod estimators;

pub use estimators::{
    ClusterSampleSize, FixedPercentageSampleSize, MarginOfErrorSampleSize,
    PopulationBasedSampleSize, SimpleRandomSampleSize, StratifiedSampleSize, TimeBasedSampleSize,
    Z_SCORE_95,
};

use crate::error::Result;
use crate::traits::SampleSizeEstimator;

/// Run-time choice of a scalar sample-size estimator
#[derive(Clone, Debug, PartialEq)]
pub enum SampleSizeMethod {
    Population(PopulationBasedSampleSize),
    MarginOfError(MarginOfErrorSampleSize),
    SimpleRandom(SimpleRandomSampleSize),
    FixedPercentage(FixedPercentageSampleSize),
    TimeBased(TimeBasedSampleSize),
    Cluster(ClusterSampleSize),
}

impl SampleSizeMethod {
    /// Short name of the estimator, for logs
    pub fn name(&self) -> &'static str {
        match self {
            SampleSizeMethod::Population(_) => "population",
            SampleSizeMethod::MarginOfError(_) => "margin-of-error",
            SampleSizeMethod::SimpleRandom(_) => "simple-random",
            SampleSizeMethod::FixedPercentage(_) => "fixed-percentage",
            SampleSizeMethod::TimeBased(_) => "time-based",
            SampleSizeMethod::Cluster(_) => "cluster",
        }
    }
}

impl SampleSizeEstimator for SampleSizeMethod {
    fn sample_size(&self) -> Result<i64> {
        match self {
            SampleSizeMethod::Population(e) => e.sample_size(),
            SampleSizeMethod::MarginOfError(e) => e.sample_size(),
            SampleSizeMethod::SimpleRandom(e) => e.sample_size(),
            SampleSizeMethod::FixedPercentage(e) => e.sample_size(),
            SampleSizeMethod::TimeBased(e) => e.sample_size(),
            SampleSizeMethod::Cluster(e) => e.sample_size(),
        }
    }
}

/// Compute a sample size with any estimator
pub fn calculate_sample_size(estimator: &impl SampleSizeEstimator) -> Result<i64> {
    estimator.sample_size()
}

//! Sample-size formulas

use crate::error::{Result, SamplingError};
use crate::traits::SampleSizeEstimator;

/// z-score of a two-sided 95% confidence interval
pub const Z_SCORE_95: f64 = 1.96;

fn to_count(value: f64) -> i64 {
    value.round_ties_even() as i64
}

fn require_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SamplingError::invalid_parameter(name, format!("must be finite, got {}", value)))
    }
}

/// Sample size from population size alone
///
/// Small populations (at most 100) are sampled at a quarter, rounded up;
/// larger ones at `ceil(sqrt(N) * log10(N) * 10)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PopulationBasedSampleSize {
    pub population_size: u64,
}

impl PopulationBasedSampleSize {
    pub fn new(population_size: u64) -> Self {
        Self { population_size }
    }
}

impl SampleSizeEstimator for PopulationBasedSampleSize {
    fn sample_size(&self) -> Result<i64> {
        let n = self.population_size as f64;
        let size = if self.population_size <= 100 {
            (0.25 * n).ceil()
        } else {
            (n.sqrt() * n.log10() * 10.0).ceil()
        };
        Ok(size as i64)
    }
}

/// Sample size for estimating a proportion within a margin of error
///
/// `round(z^2 * p * (1 - p) / e^2)` with `z` fixed at [`Z_SCORE_95`];
/// `confidence_level` is recorded but does not change `z`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarginOfErrorSampleSize {
    pub confidence_level: f64,
    pub margin_of_error: f64,
    pub population_proportion: f64,
}

impl MarginOfErrorSampleSize {
    pub fn new(confidence_level: f64, margin_of_error: f64, population_proportion: f64) -> Self {
        Self {
            confidence_level,
            margin_of_error,
            population_proportion,
        }
    }
}

impl SampleSizeEstimator for MarginOfErrorSampleSize {
    fn sample_size(&self) -> Result<i64> {
        let e = require_finite("margin_of_error", self.margin_of_error)?;
        let p = require_finite("population_proportion", self.population_proportion)?;
        if !(0.0..=1.0).contains(&p) {
            return Err(SamplingError::invalid_parameter(
                "population_proportion",
                format!("must lie in [0, 1], got {}", p),
            ));
        }
        if e == 0.0 {
            return Err(SamplingError::DivisionByZero("margin of error is zero"));
        }

        Ok(to_count(Z_SCORE_95.powi(2) * p * (1.0 - p) / e.powi(2)))
    }
}

/// Proportional allocation of a total sample across strata
///
/// Each stratum gets `round(total * stratum_size / population_size)`,
/// rounded independently, so the counts need not sum to the total.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StratifiedSampleSize {
    pub strata_sizes: Vec<u64>,
    pub population_size: u64,
}

impl StratifiedSampleSize {
    pub fn new(strata_sizes: Vec<u64>, population_size: u64) -> Self {
        Self {
            strata_sizes,
            population_size,
        }
    }

    /// One sample count per stratum, in stratum order
    pub fn allocate(&self, total_sample_size: i64) -> Result<Vec<i64>> {
        if total_sample_size < 0 {
            return Err(SamplingError::InvalidBudget(total_sample_size));
        }
        if self.population_size == 0 {
            return Err(SamplingError::DivisionByZero("stratified population is empty"));
        }

        let total = total_sample_size as f64;
        let population = self.population_size as f64;
        Ok(self
            .strata_sizes
            .iter()
            .map(|&size| to_count(total * size as f64 / population))
            .collect())
    }
}

/// `round(N / (1 + (N - 1) / N))`
///
/// For large `N` this tends to `N / 2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimpleRandomSampleSize {
    pub population_size: u64,
}

impl SimpleRandomSampleSize {
    pub fn new(population_size: u64) -> Self {
        Self { population_size }
    }
}

impl SampleSizeEstimator for SimpleRandomSampleSize {
    fn sample_size(&self) -> Result<i64> {
        if self.population_size == 0 {
            return Err(SamplingError::DivisionByZero("population is empty"));
        }
        let n = self.population_size as f64;
        Ok(to_count(n / (1.0 + (n - 1.0) / n)))
    }
}

/// A fixed fraction of the dataset
///
/// `percentage` is a fraction: `0.1` keeps a tenth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedPercentageSampleSize {
    pub dataset_size: u64,
    pub percentage: f64,
}

impl FixedPercentageSampleSize {
    pub fn new(dataset_size: u64, percentage: f64) -> Self {
        Self {
            dataset_size,
            percentage,
        }
    }
}

impl SampleSizeEstimator for FixedPercentageSampleSize {
    fn sample_size(&self) -> Result<i64> {
        let fraction = require_finite("percentage", self.percentage)?;
        if fraction < 0.0 {
            return Err(SamplingError::invalid_parameter(
                "percentage",
                format!("must be non-negative, got {}", fraction),
            ));
        }
        Ok(to_count(self.dataset_size as f64 * fraction))
    }
}

/// Share of the dataset falling in a time window
///
/// `round(dataset_size * (end - start) / total_time)`. A window that ends
/// before it starts yields a negative count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeBasedSampleSize {
    pub start_time: f64,
    pub end_time: f64,
    pub total_time: f64,
    pub dataset_size: u64,
}

impl TimeBasedSampleSize {
    pub fn new(start_time: f64, end_time: f64, total_time: f64, dataset_size: u64) -> Self {
        Self {
            start_time,
            end_time,
            total_time,
            dataset_size,
        }
    }
}

impl SampleSizeEstimator for TimeBasedSampleSize {
    fn sample_size(&self) -> Result<i64> {
        let start = require_finite("start_time", self.start_time)?;
        let end = require_finite("end_time", self.end_time)?;
        let total = require_finite("total_time", self.total_time)?;
        if total == 0.0 {
            return Err(SamplingError::DivisionByZero("total time is zero"));
        }

        Ok(to_count(self.dataset_size as f64 * (end - start) / total))
    }
}

/// Elements covered by sampling whole clusters
///
/// `min(clusters_in_sample, total_clusters) * elements_per_cluster`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClusterSampleSize {
    pub total_clusters: u64,
    pub clusters_in_sample: u64,
    pub elements_per_cluster: u64,
}

impl ClusterSampleSize {
    pub fn new(total_clusters: u64, clusters_in_sample: u64, elements_per_cluster: u64) -> Self {
        Self {
            total_clusters,
            clusters_in_sample,
            elements_per_cluster,
        }
    }
}

impl SampleSizeEstimator for ClusterSampleSize {
    fn sample_size(&self) -> Result<i64> {
        let clusters = self.clusters_in_sample.min(self.total_clusters);
        clusters
            .checked_mul(self.elements_per_cluster)
            .and_then(|n| i64::try_from(n).ok())
            .ok_or_else(|| {
                SamplingError::invalid_parameter(
                    "elements_per_cluster",
                    "cluster sample size overflows",
                )
            })
    }
}

//! Core traits shared across algorithm families
//!
//! Randomness is injected through [`RandomSource`] rather than read from a
//! process-wide generator, so every sampling routine can be replayed from a
//! seed. Sample-size formulas implement [`SampleSizeEstimator`], and
//! incremental samplers implement [`StreamSampler`].

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;

use crate::error::{Result, SamplingError};

/// Source of the two random draws the samplers need
///
/// Implemented for every [`rand::Rng`], so a seeded
/// [`StdRng`](rand::rngs::StdRng) is the usual choice:
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use stratsample::traits::RandomSource;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let j = rng.uniform_inclusive(9);
/// assert!(j <= 9);
/// ```
pub trait RandomSource {
    /// Uniform integer in `[0, upper]` (both ends inclusive)
    fn uniform_inclusive(&mut self, upper: usize) -> usize;

    /// Index drawn with probability proportional to `weights[index]`
    ///
    /// Fails with [`SamplingError::InvalidWeights`] when the weights are
    /// empty, negative, non-finite or sum to zero.
    fn weighted_index(&mut self, weights: &[f64]) -> Result<usize>;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform_inclusive(&mut self, upper: usize) -> usize {
        self.random_range(0..=upper)
    }

    fn weighted_index(&mut self, weights: &[f64]) -> Result<usize> {
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(SamplingError::InvalidWeights(
                "weights must be finite".to_string(),
            ));
        }
        let dist = WeightedIndex::<f64>::new(weights)
            .map_err(|e| SamplingError::InvalidWeights(e.to_string()))?;
        Ok(dist.sample(self))
    }
}

/// Borrowed random source, for handing a `&mut R` to code that owns its source
pub(crate) struct ByRef<'a, S: ?Sized>(pub(crate) &'a mut S);

impl<S: RandomSource + ?Sized> RandomSource for ByRef<'_, S> {
    fn uniform_inclusive(&mut self, upper: usize) -> usize {
        self.0.uniform_inclusive(upper)
    }

    fn weighted_index(&mut self, weights: &[f64]) -> Result<usize> {
        self.0.weighted_index(weights)
    }
}

/// A formula that turns scalar parameters into a sample size
///
/// Counts are signed: some formulas (e.g. a time window whose end precedes
/// its start) legitimately produce negative values, which are rejected only
/// when the count is used as a [`SampleBudget`](crate::item::SampleBudget).
pub trait SampleSizeEstimator {
    /// Compute the sample size
    fn sample_size(&self) -> Result<i64>;
}

/// Incremental sampler fed one item at a time
pub trait StreamSampler {
    /// The type of item retained in the sample
    type Item;

    /// Offer an item from the stream
    fn observe(&mut self, item: Self::Item);

    /// Current sample
    fn sample(&self) -> &[Self::Item];

    /// Maximum sample size
    fn capacity(&self) -> usize;

    /// Number of items offered so far
    fn items_seen(&self) -> u64;

    /// Current sample size
    fn sample_size(&self) -> usize {
        self.sample().len()
    }

    /// Check if nothing has been observed yet
    fn is_empty(&self) -> bool {
        self.items_seen() == 0
    }
}

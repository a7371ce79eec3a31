//! Reservoir sampling for uniform random sampling from streams
//!
//! Reservoir sampling maintains a fixed-size uniform random sample from
//! a stream of unknown length. Each item in the stream has equal probability
//! of being in the final sample.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::trace;

use crate::error::Result;
use crate::item::SampleBudget;
use crate::traits::{ByRef, RandomSource, StreamSampler};

/// Reservoir sampler using Algorithm R
///
/// Maintains a uniform random sample of fixed size from a stream of arbitrary length.
/// Each item in the stream has probability k/n of being in the final sample,
/// where k is the reservoir size and n is the total number of items seen.
///
/// # Algorithm
///
/// Algorithm R (Vitter, 1985):
/// 1. Fill reservoir with first k items
/// 2. For each subsequent item at 0-based position i:
///    - Generate random j in [0, i]
///    - If j < k, replace reservoir[j] with item i
///
/// While the reservoir is filling no random draws are made, so a stream no
/// longer than the capacity comes back whole and in order.
///
/// # Example
///
/// ```
/// use stratsample::sampling::ReservoirSampler;
/// use stratsample::traits::StreamSampler;
///
/// let mut sampler = ReservoirSampler::<i32>::with_seed(5, 42);
///
/// // Stream 100 items
/// for i in 0..100 {
///     sampler.observe(i);
/// }
///
/// // Get uniform random sample of 5 items
/// let sample = sampler.sample();
/// assert_eq!(sample.len(), 5);
/// ```
#[derive(Clone, Debug)]
pub struct ReservoirSampler<T, R = StdRng> {
    /// Maximum sample size
    capacity: usize,
    /// Current sample
    reservoir: Vec<T>,
    /// Number of items seen
    count: u64,
    /// Number of reservoir slots overwritten after the fill phase
    replacements: u64,
    /// Random number generator
    rng: R,
}

impl<T> ReservoirSampler<T, StdRng> {
    /// Create a new reservoir sampler with given capacity and seed
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of items to sample
    /// * `seed` - Seed for random number generator (for reproducibility)
    pub fn with_seed(capacity: usize, seed: u64) -> Self {
        Self::with_rng(capacity, StdRng::seed_from_u64(seed))
    }
}

impl<T, R: RandomSource> ReservoirSampler<T, R> {
    /// Create a new reservoir sampler drawing from `rng`
    ///
    /// Any [`rand::Rng`] works, including a borrowed `&mut StdRng` shared
    /// between several samplers.
    pub fn with_rng(capacity: usize, rng: R) -> Self {
        Self {
            capacity,
            reservoir: Vec::with_capacity(capacity),
            count: 0,
            replacements: 0,
            rng,
        }
    }

    /// Add an item to the sampler
    pub fn add(&mut self, item: T) {
        let position = self.count as usize;
        self.count += 1;

        if self.reservoir.len() < self.capacity {
            // Reservoir not full - just add
            self.reservoir.push(item);
        } else {
            // Reservoir full - maybe replace
            let j = self.rng.uniform_inclusive(position);
            if j < self.capacity {
                self.reservoir[j] = item;
                self.replacements += 1;
            }
        }
    }

    /// Get the current sample
    pub fn sample(&self) -> &[T] {
        &self.reservoir
    }

    /// Consume the sampler and return the sample
    pub fn into_sample(self) -> Vec<T> {
        trace!(
            capacity = self.capacity,
            seen = self.count,
            replacements = self.replacements,
            "reservoir drained"
        );
        self.reservoir
    }

    /// Get the reservoir capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the current sample size
    pub fn len(&self) -> usize {
        self.reservoir.len()
    }

    /// Check if reservoir is empty
    pub fn is_empty(&self) -> bool {
        self.reservoir.is_empty()
    }

    /// Check if reservoir is full
    pub fn is_full(&self) -> bool {
        self.reservoir.len() >= self.capacity
    }

    /// Get the number of items seen
    pub fn items_seen(&self) -> u64 {
        self.count
    }

    /// Get the sampling probability for the current state
    ///
    /// This is the probability that any given item from the stream
    /// is in the current sample.
    pub fn sampling_probability(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            ((self.capacity as f64) / (self.count as f64)).min(1.0)
        }
    }

    /// Reset to empty state, keeping capacity and random source
    pub fn clear(&mut self) {
        self.reservoir.clear();
        self.count = 0;
        self.replacements = 0;
    }
}

impl<T, R: RandomSource> StreamSampler for ReservoirSampler<T, R> {
    type Item = T;

    fn observe(&mut self, item: T) {
        self.add(item);
    }

    fn sample(&self) -> &[T] {
        &self.reservoir
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn items_seen(&self) -> u64 {
        self.count
    }
}

/// Draw a uniform sample of `min(k, n)` items from `data` in one pass
///
/// Auxiliary storage is the reservoir itself (`O(k)`); `data` may be any
/// iterator. Fails with [`InvalidBudget`](crate::SamplingError::InvalidBudget)
/// when `k` is negative.
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use stratsample::sampling::reservoir_sample;
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let picked = reservoir_sample(0..1000, 10, &mut rng).unwrap();
/// assert_eq!(picked.len(), 10);
///
/// // Short inputs come back whole, in order
/// let all = reservoir_sample(vec!["a", "b"], 5, &mut rng).unwrap();
/// assert_eq!(all, vec!["a", "b"]);
/// ```
pub fn reservoir_sample<I, R>(data: I, k: i64, rng: &mut R) -> Result<Vec<I::Item>>
where
    I: IntoIterator,
    R: RandomSource + ?Sized,
{
    let budget = SampleBudget::new(k)?;
    let mut sampler = ReservoirSampler::with_rng(budget.get(), ByRef(rng));
    for item in data {
        sampler.add(item);
    }
    Ok(sampler.into_sample())
}

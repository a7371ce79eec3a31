//! Non-uniform and without-replacement samplers over in-memory slices

use tracing::trace;

use crate::error::{Result, SamplingError};
use crate::item::SampleBudget;
use crate::traits::RandomSource;

/// Reservoir sampling with per-item weights
///
/// Seeds the reservoir with the first `k` items, then for each later item at
/// position `i` draws a slot index `j` from `[0, i]` with probability
/// proportional to `weights[j]`; the item replaces slot `j` when `j < k`.
/// Heavily weighted early items therefore attract more replacements.
///
/// Fails with [`SamplingError::InvalidWeights`] when `weights` and `data`
/// differ in length or a weight prefix is invalid, and with
/// [`SamplingError::InvalidBudget`] for negative `k`.
pub fn weighted_reservoir_sample<T, R>(
    data: &[T],
    weights: &[f64],
    k: i64,
    rng: &mut R,
) -> Result<Vec<T>>
where
    T: Clone,
    R: RandomSource + ?Sized,
{
    let k = SampleBudget::new(k)?.get();
    check_lengths(data.len(), weights.len())?;

    let mut reservoir: Vec<T> = data.iter().take(k).cloned().collect();
    for (i, item) in data.iter().enumerate().skip(k) {
        let j = rng.weighted_index(&weights[..=i])?;
        if j < k {
            reservoir[j] = item.clone();
        }
    }

    Ok(reservoir)
}

/// Draw `k` items with replacement, each with probability proportional to
/// its priority
///
/// The same item may appear more than once. Lengths are always checked;
/// priority values are not validated when `k == 0`.
pub fn priority_sample<T, R>(data: &[T], priorities: &[f64], k: i64, rng: &mut R) -> Result<Vec<T>>
where
    T: Clone,
    R: RandomSource + ?Sized,
{
    let k = SampleBudget::new(k)?.get();
    check_lengths(data.len(), priorities.len())?;

    let mut picked = Vec::with_capacity(k);
    for _ in 0..k {
        let idx = rng.weighted_index(priorities)?;
        picked.push(data[idx].clone());
    }

    trace!(draws = k, population = data.len(), "priority sample drawn");
    Ok(picked)
}

/// Draw `k` distinct items uniformly without replacement
///
/// Uses a partial Fisher-Yates shuffle over item indices. Fails with
/// [`SamplingError::InvalidBudget`] when `k` is negative or exceeds the
/// number of items.
pub fn simple_random_sample<T, R>(data: &[T], k: i64, rng: &mut R) -> Result<Vec<T>>
where
    T: Clone,
    R: RandomSource + ?Sized,
{
    let budget = SampleBudget::new(k)?.get();
    if budget > data.len() {
        return Err(SamplingError::InvalidBudget(k));
    }

    let mut indices: Vec<usize> = (0..data.len()).collect();
    let n = indices.len();
    for i in 0..budget {
        let j = i + rng.uniform_inclusive(n - 1 - i);
        indices.swap(i, j);
    }

    Ok(indices[..budget].iter().map(|&i| data[i].clone()).collect())
}

fn check_lengths(items: usize, weights: usize) -> Result<()> {
    if items != weights {
        return Err(SamplingError::InvalidWeights(format!(
            "expected {} weights, found {}",
            items, weights
        )));
    }
    Ok(())
}

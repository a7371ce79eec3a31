//! Stream sampling algorithms
//!
//! This module provides algorithms for drawing random samples from sequences
//! that may be too large to hold twice in memory.
//!
//! - [`ReservoirSampler`] / [`reservoir_sample`]: uniform sample of fixed size
//!   in a single forward pass (Algorithm R)
//! - [`weighted_reservoir_sample`]: reservoir whose replacement slot is drawn
//!   by weight
//! - [`priority_sample`]: draws with replacement, proportional to priority
//! - [`simple_random_sample`]: distinct items, uniformly, without replacement
//!
//! # Example
//!
//! ```
//! use stratsample::sampling::ReservoirSampler;
//!
//! let mut sampler = ReservoirSampler::<i32>::with_seed(10, 0);
//!
//! // Stream millions of items, keep uniform sample of 10
//! for i in 0..1_000_000 {
//!     sampler.add(i);
//! }
//!
//! // Each item had equal probability of being sampled
//! let sample = sampler.sample();
//! assert_eq!(sample.len(), 10);
//! ```

mod reservoir;
mod weighted;

pub use reservoir::{reservoir_sample, ReservoirSampler};
pub use weighted::{priority_sample, simple_random_sample, weighted_reservoir_sample};

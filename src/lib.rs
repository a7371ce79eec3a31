//! # Stratsample
//!
//! Sample-size estimation and representative sampling of frequency streams.
//!
//! Given a stream of `(item, frequency)` pairs, stratsample splits it into
//! items of typical frequency and outliers using the median and median
//! absolute deviation, divides a sample budget between the two, and draws a
//! uniform reservoir sample from each side in a single pass.
//!
//! ## Features
//!
//! - **Robust Statistics**: Median and MAD of a numeric sequence
//! - **Reservoir Sampling**: Uniform fixed-size samples in one pass, plus
//!   weighted, priority and without-replacement variants
//! - **Stratified Selection**: MAD-banded partitioning with exact budget
//!   allocation, whole-stream or chunk-by-chunk
//! - **Sample Sizing**: Population, margin-of-error, stratified, simple-random,
//!   fixed-percentage, time-window and cluster estimators
//! - **Injectable Randomness**: Every random draw goes through a
//!   [`RandomSource`](traits::RandomSource); seed it for reproducible runs
//!
//! ## Quick Start
//!
//! ```rust
//! use stratsample::prelude::*;
//!
//! let stream: Vec<FrequencyItem> = vec![
//!     ("a", 1.0).into(),
//!     ("b", 2.0).into(),
//!     ("c", 3.0).into(),
//!     ("d", 100.0).into(),
//!     ("e", 2.0).into(),
//! ];
//!
//! let k = PopulationBasedSampleSize::new(stream.len() as u64).sample_size().unwrap();
//! let mut selector = StratifiedSelector::with_seed(7);
//! let sample = selector.select(&stream, k).unwrap();
//!
//! assert!(sample.len() as i64 <= k);
//! ```
//!
//! ## Feature Flags
//!
//! Algorithm families (pick what you need):
//! - `statistics` (default): median and MAD
//! - `sampling` (default): reservoir and weighted sampling
//! - `selection` (default): stratified selection (enables `statistics` and `sampling`)
//! - `sizing` (default): sample-size estimators
//! - `full`: Enable everything below as well
//!
//! Surface features:
//! - `serde`: Enable serialization of items, statistics and plans
//! - `io`: CSV source and sink
//! - `cli`: the `stratsample` binary

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod error;
pub mod item;
pub mod traits;

#[cfg(feature = "statistics")]
#[cfg_attr(docsrs, doc(cfg(feature = "statistics")))]
pub mod statistics;

#[cfg(feature = "sampling")]
#[cfg_attr(docsrs, doc(cfg(feature = "sampling")))]
pub mod sampling;

#[cfg(feature = "selection")]
#[cfg_attr(docsrs, doc(cfg(feature = "selection")))]
pub mod selection;

#[cfg(feature = "sizing")]
#[cfg_attr(docsrs, doc(cfg(feature = "sizing")))]
pub mod sizing;

#[cfg(feature = "io")]
#[cfg_attr(docsrs, doc(cfg(feature = "io")))]
pub mod io;

pub mod prelude {
    pub use crate::error::{Result, SamplingError};
    pub use crate::item::{FrequencyItem, Sample, SampleBudget};
    pub use crate::traits::*;

    #[cfg(feature = "statistics")]
    pub use crate::statistics::RobustStats;

    #[cfg(feature = "sampling")]
    pub use crate::sampling::{reservoir_sample, ReservoirSampler};

    #[cfg(feature = "selection")]
    pub use crate::selection::{allocate, SelectionPlan, StratifiedSelector};

    #[cfg(feature = "sizing")]
    pub use crate::sizing::*;
}

pub use error::{Result, SamplingError};
pub use item::{FrequencyItem, Sample, SampleBudget};

#[cfg(feature = "selection")]
pub use selection::StratifiedSelector;

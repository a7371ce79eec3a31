//! MAD-stratified sample selection
//!
//! Splits a frequency stream into items whose frequency is typical (within
//! one MAD of the median) and outliers, divides the sample budget between the
//! two, and reservoir-samples each side independently.
//!
//! - [`allocate`]: proportional budget split that sums exactly to the total
//! - [`partition`]: typical / outlier split of a stream
//! - [`SelectionPlan`]: statistics and per-partition budgets for one run
//! - [`StratifiedSelector`]: the full selection, whole-stream or chunked
//!
//! # Example
//!
//! ```
//! use stratsample::item::FrequencyItem;
//! use stratsample::selection::StratifiedSelector;
//!
//! let stream: Vec<FrequencyItem> = (0..1000)
//!     .map(|i| FrequencyItem::new(format!("doc{}", i), ((i * 7) % 50) as f64))
//!     .collect();
//!
//! let mut selector = StratifiedSelector::with_seed(42);
//! let plan = selector.plan(&stream, 20).unwrap();
//! let sample = selector.select(&stream, 20).unwrap();
//!
//! assert_eq!(sample.len(), plan.expected_len());
//! ```

mod allocator;
mod chunked;
mod selector;

pub use allocator::allocate;
pub use selector::{partition, Partition, SelectionPlan, StratifiedSelector};

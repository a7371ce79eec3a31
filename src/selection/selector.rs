//! MAD-stratified selection over a frequency stream

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use super::allocator::allocate;
use crate::error::Result;
use crate::item::{FrequencyItem, Sample};
use crate::sampling::reservoir_sample;
use crate::statistics::RobustStats;
use crate::traits::{ByRef, RandomSource};

/// A frequency stream split by membership in the typical band
///
/// Every item of the source stream lands in exactly one side, in stream order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Partition<'a> {
    /// Items with `median - mad <= frequency <= median + mad`
    pub within: Vec<&'a FrequencyItem>,
    /// Everything else
    pub outside: Vec<&'a FrequencyItem>,
}

impl Partition<'_> {
    /// Total number of partitioned items
    pub fn len(&self) -> usize {
        self.within.len() + self.outside.len()
    }

    /// Check if both sides are empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split `stream` into items inside and outside the band `stats` defines
pub fn partition<'a>(stream: &'a [FrequencyItem], stats: &RobustStats) -> Partition<'a> {
    let (within, outside): (Vec<_>, Vec<_>) = stream
        .iter()
        .partition(|item| stats.contains(item.frequency));
    Partition { within, outside }
}

/// The deterministic half of a selection: statistics, partition sizes and
/// the budgets each partition will be sampled with
///
/// # Budget assignment
///
/// The proportional split `(k1, k2)` is not paired with the partitions it
/// was computed for. Under the *minority boost* policy, when the typical
/// partition is at least as large as the outlier partition it receives the
/// smaller of the two shares and the outliers the larger; otherwise the
/// typical partition receives the larger share. For a skewed stream this
/// hands the outliers more of the budget than plain proportional allocation
/// would.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionPlan {
    /// Median and MAD of the stream's frequencies
    pub stats: RobustStats,
    /// Number of items inside the typical band
    pub within_len: usize,
    /// Number of items outside the typical band
    pub outside_len: usize,
    /// Proportional share computed for the typical partition
    pub k1: usize,
    /// Proportional share computed for the outlier partition
    pub k2: usize,
    /// Budget the typical partition is actually sampled with
    pub within_budget: usize,
    /// Budget the outlier partition is actually sampled with
    pub outside_budget: usize,
}

impl SelectionPlan {
    /// Derive the plan for a partitioned stream and a total budget
    pub fn new(stats: RobustStats, within_len: usize, outside_len: usize, k: i64) -> Result<Self> {
        let (k1, k2) = allocate(within_len, outside_len, k)?;

        let (within_budget, outside_budget) = if within_len >= outside_len {
            (k1.min(k2), k1.max(k2))
        } else {
            (k1.max(k2), k1.min(k2))
        };

        Ok(Self {
            stats,
            within_len,
            outside_len,
            k1,
            k2,
            within_budget,
            outside_budget,
        })
    }

    /// Total budget, `k1 + k2`
    pub fn total_budget(&self) -> usize {
        self.k1 + self.k2
    }

    /// Check if the outlier partition received the larger share
    pub fn favours_outliers(&self) -> bool {
        self.within_len >= self.outside_len
    }

    /// Number of items the selection will return
    ///
    /// Smaller than the budget when a partition holds fewer items than it
    /// was assigned.
    pub fn expected_len(&self) -> usize {
        self.within_len.min(self.within_budget) + self.outside_len.min(self.outside_budget)
    }
}

/// Draws a sample of a frequency stream stratified by deviation from the
/// median frequency
///
/// 1. median and MAD of all frequencies
/// 2. partition into typical (`[median - mad, median + mad]`) and outlier items
/// 3. proportional budget split, reconciled to sum exactly to `k`
/// 4. budgets assigned to partitions by the minority boost policy (see
///    [`SelectionPlan`])
/// 5. independent reservoir sample of each partition
///
/// The returned sample lists the typical picks first, then the outliers.
///
/// # Example
///
/// ```
/// use stratsample::item::FrequencyItem;
/// use stratsample::selection::StratifiedSelector;
///
/// let stream: Vec<FrequencyItem> = vec![
///     ("a", 1.0).into(),
///     ("b", 2.0).into(),
///     ("c", 3.0).into(),
///     ("d", 100.0).into(),
///     ("e", 2.0).into(),
/// ];
///
/// let mut selector = StratifiedSelector::with_seed(42);
/// let sample = selector.select(&stream, 3).unwrap();
///
/// assert!(sample.len() <= 3);
/// assert!(sample.iter().all(|item| stream.contains(item)));
/// ```
#[derive(Clone, Debug)]
pub struct StratifiedSelector<R = StdRng> {
    rng: R,
}

impl StratifiedSelector<StdRng> {
    /// Create a selector with a seeded [`StdRng`]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: RandomSource> StratifiedSelector<R> {
    /// Create a selector drawing from `rng`
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Compute the selection plan for `stream` without drawing anything
    ///
    /// Fails with [`EmptyInput`](crate::SamplingError::EmptyInput) for an
    /// empty stream and [`InvalidBudget`](crate::SamplingError::InvalidBudget)
    /// for a negative `k`.
    pub fn plan(&self, stream: &[FrequencyItem], k: i64) -> Result<SelectionPlan> {
        prepare(stream, k).map(|(_, plan)| plan)
    }

    /// Draw a stratified sample of at most `k` items from `stream`
    pub fn select(&mut self, stream: &[FrequencyItem], k: i64) -> Result<Sample> {
        let (parts, plan) = prepare(stream, k)?;

        let mut rng = ByRef(&mut self.rng);
        let within = reservoir_sample(parts.within, plan.within_budget as i64, &mut rng)?;
        let outside = reservoir_sample(parts.outside, plan.outside_budget as i64, &mut rng)?;

        debug!(
            within_drawn = within.len(),
            outside_drawn = outside.len(),
            "stratified sample drawn"
        );

        Ok(within.into_iter().chain(outside).cloned().collect())
    }
}

fn prepare(stream: &[FrequencyItem], k: i64) -> Result<(Partition<'_>, SelectionPlan)> {
    let frequencies: Vec<f64> = stream.iter().map(|item| item.frequency).collect();
    let stats = RobustStats::compute(&frequencies)?;

    let parts = partition(stream, &stats);
    let plan = SelectionPlan::new(stats, parts.within.len(), parts.outside.len(), k)?;

    debug!(
        median = plan.stats.median,
        mad = plan.stats.mad,
        within = plan.within_len,
        outside = plan.outside_len,
        k1 = plan.k1,
        k2 = plan.k2,
        within_budget = plan.within_budget,
        outside_budget = plan.outside_budget,
        "selection planned"
    );

    Ok((parts, plan))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SamplingError;

    fn stream(pairs: &[(&str, f64)]) -> Vec<FrequencyItem> {
        pairs.iter().map(|&(id, f)| FrequencyItem::new(id, f)).collect()
    }

    #[test]
    fn test_partition_band() {
        let items = stream(&[("a", 1.0), ("b", 2.0), ("c", 3.0), ("d", 100.0), ("e", 2.0)]);
        let stats = RobustStats::compute(&[1.0, 2.0, 3.0, 100.0, 2.0]).unwrap();
        let parts = partition(&items, &stats);

        let within: Vec<&str> = parts.within.iter().map(|i| i.id.as_str()).collect();
        let outside: Vec<&str> = parts.outside.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(within, vec!["a", "b", "c", "e"]);
        assert_eq!(outside, vec!["d"]);
        assert_eq!(parts.len(), 5);
    }

    #[test]
    fn test_plan_typical_majority_boosts_outliers() {
        // median 2, MAD 1 -> band [1, 3]; 4 typical, 1 outlier
        let items = stream(&[("a", 1.0), ("b", 2.0), ("c", 3.0), ("d", 100.0), ("e", 2.0)]);
        let plan = StratifiedSelector::with_seed(0).plan(&items, 3).unwrap();

        assert_eq!((plan.within_len, plan.outside_len), (4, 1));
        assert_eq!((plan.k1, plan.k2), (2, 1));
        assert!(plan.favours_outliers());
        assert_eq!((plan.within_budget, plan.outside_budget), (1, 2));
        // Only one outlier exists, so one slot of the budget goes unused
        assert_eq!(plan.expected_len(), 2);
    }

    #[test]
    fn test_plan_outlier_majority_keeps_larger_share_typical() {
        let stats = RobustStats {
            median: 10.0,
            mad: 1.0,
        };
        let plan = SelectionPlan::new(stats, 2, 3, 5).unwrap();

        assert_eq!((plan.k1, plan.k2), (2, 3));
        assert!(!plan.favours_outliers());
        assert_eq!((plan.within_budget, plan.outside_budget), (3, 2));
    }

    #[test]
    fn test_typical_band_holds_at_least_half() {
        // At least half the deviations are <= their median, so the outlier
        // side can never outnumber the typical side of a real stream.
        let items = stream(&[("a", 1.0), ("b", 50.0), ("c", 51.0), ("d", 900.0)]);
        let plan = StratifiedSelector::with_seed(0).plan(&items, 4).unwrap();
        assert!(plan.within_len >= plan.outside_len);
        assert!(plan.favours_outliers());
    }

    #[test]
    fn test_plan_budgets_sum_to_k() {
        let items: Vec<FrequencyItem> = (0..40)
            .map(|i| FrequencyItem::new(format!("id{}", i), (i % 7) as f64 * (i % 3) as f64))
            .collect();
        for k in 0..=45 {
            let plan = StratifiedSelector::with_seed(0).plan(&items, k).unwrap();
            assert_eq!(plan.within_budget + plan.outside_budget, k as usize);
            assert_eq!(plan.total_budget(), k as usize);
        }
    }

    #[test]
    fn test_select_draws_from_both_partitions() {
        let items = stream(&[("a", 1.0), ("b", 2.0), ("c", 3.0), ("d", 100.0), ("e", 2.0)]);
        let mut selector = StratifiedSelector::with_seed(11);
        let sample = selector.select(&items, 3).unwrap();

        assert_eq!(sample.len(), 2);
        assert_eq!(sample[1].id, "d");
        assert!(["a", "b", "c", "e"].contains(&sample[0].id.as_str()));
    }

    #[test]
    fn test_select_whole_stream_when_budget_covers_it() {
        let items = stream(&[("a", 5.0), ("b", 5.0), ("c", 6.0), ("d", 90.0)]);
        let mut selector = StratifiedSelector::with_seed(3);
        let plan = selector.plan(&items, 8).unwrap();
        let sample = selector.select(&items, 8).unwrap();
        assert_eq!(sample.len(), plan.expected_len());
        assert!(sample.iter().all(|item| items.contains(item)));
    }

    #[test]
    fn test_select_is_reproducible() {
        let items: Vec<FrequencyItem> = (0..200)
            .map(|i| FrequencyItem::new(format!("id{}", i), ((i * 37) % 101) as f64))
            .collect();
        let a = StratifiedSelector::with_seed(5).select(&items, 20).unwrap();
        let b = StratifiedSelector::with_seed(5).select(&items, 20).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 20);
    }

    #[test]
    fn test_select_empty_stream() {
        let mut selector = StratifiedSelector::with_seed(0);
        assert_eq!(selector.select(&[], 3), Err(SamplingError::EmptyInput));
    }

    #[test]
    fn test_select_negative_budget() {
        let items = stream(&[("a", 1.0)]);
        let mut selector = StratifiedSelector::with_seed(0);
        assert_eq!(
            selector.select(&items, -1),
            Err(SamplingError::InvalidBudget(-1))
        );
    }
}

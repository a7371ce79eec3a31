//! Chunk-at-a-time driver for streams sampled in independent slices

use tracing::info;

use super::selector::StratifiedSelector;
use crate::error::{Result, SamplingError};
use crate::item::{FrequencyItem, Sample};
use crate::traits::RandomSource;

impl<R: RandomSource> StratifiedSelector<R> {
    /// Sample `stream` in consecutive chunks of `chunk_size` items
    ///
    /// Each chunk is selected on its own, with its own median, MAD and budget
    /// split; `budget_for` maps a chunk's length to its budget. Nothing is
    /// carried between chunks except the random source.
    ///
    /// The first failing chunk aborts the run: its error is returned and the
    /// samples of earlier chunks are discarded. An empty stream has no chunks
    /// and yields an empty sample, unlike [`select`](Self::select), which
    /// fails with [`EmptyInput`](SamplingError::EmptyInput).
    ///
    /// ```
    /// use stratsample::item::FrequencyItem;
    /// use stratsample::selection::StratifiedSelector;
    ///
    /// let stream: Vec<FrequencyItem> = (0..100)
    ///     .map(|i| FrequencyItem::new(format!("doc{}", i), (i % 10) as f64))
    ///     .collect();
    ///
    /// let mut selector = StratifiedSelector::with_seed(1);
    /// let sample = selector
    ///     .select_chunked(&stream, 25, |len| Ok(len as i64 / 5))
    ///     .unwrap();
    /// assert!(sample.len() <= 20);
    /// ```
    pub fn select_chunked<F>(
        &mut self,
        stream: &[FrequencyItem],
        chunk_size: usize,
        mut budget_for: F,
    ) -> Result<Sample>
    where
        F: FnMut(usize) -> Result<i64>,
    {
        if chunk_size == 0 {
            return Err(SamplingError::invalid_parameter(
                "chunk_size",
                "must be at least 1",
            ));
        }

        let mut sample = Sample::new();
        for (index, chunk) in stream.chunks(chunk_size).enumerate() {
            let k = budget_for(chunk.len())?;
            let picked = self.select(chunk, k)?;
            info!(
                chunk = index,
                items = chunk.len(),
                budget = k,
                selected = picked.len(),
                "chunk sampled"
            );
            sample.extend(picked);
        }

        Ok(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<FrequencyItem> {
        (0..n)
            .map(|i| FrequencyItem::new(format!("id{}", i), (i % 13) as f64))
            .collect()
    }

    #[test]
    fn test_budget_per_chunk() {
        let stream = items(95);
        let mut lens = Vec::new();
        let mut selector = StratifiedSelector::with_seed(2);
        let sample = selector
            .select_chunked(&stream, 30, |len| {
                lens.push(len);
                Ok(4)
            })
            .unwrap();

        assert_eq!(lens, vec![30, 30, 30, 5]);
        assert!(sample.len() <= 16);
        assert!(sample.iter().all(|item| stream.contains(item)));
    }

    #[test]
    fn test_single_chunk_matches_select() {
        let stream = items(40);
        let chunked = StratifiedSelector::with_seed(9)
            .select_chunked(&stream, 100, |_| Ok(7))
            .unwrap();
        let whole = StratifiedSelector::with_seed(9).select(&stream, 7).unwrap();
        assert_eq!(chunked, whole);
    }

    #[test]
    fn test_failing_chunk_aborts_run() {
        let stream = items(20);
        let mut calls = 0;
        let result = StratifiedSelector::with_seed(0).select_chunked(&stream, 5, |_| {
            calls += 1;
            Ok(if calls == 3 { -1 } else { 2 })
        });
        assert_eq!(result, Err(SamplingError::InvalidBudget(-1)));
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_zero_chunk_size() {
        let stream = items(3);
        assert!(matches!(
            StratifiedSelector::with_seed(0).select_chunked(&stream, 0, |_| Ok(1)),
            Err(SamplingError::InvalidParameter { name: "chunk_size", .. })
        ));
    }

    #[test]
    fn test_empty_stream_yields_empty_sample() {
        let mut selector = StratifiedSelector::with_seed(0);
        let mut calls = 0;
        let sample = selector
            .select_chunked(&[], 10, |_| {
                calls += 1;
                Ok(3)
            })
            .unwrap();
        assert!(sample.is_empty());
        assert_eq!(calls, 0);

        // whole-stream selection of the same input fails instead
        assert_eq!(selector.select(&[], 3), Err(SamplingError::EmptyInput));
    }
}

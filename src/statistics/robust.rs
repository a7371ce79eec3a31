//! Median and median absolute deviation

use crate::error::{Result, SamplingError};

/// Median and MAD of a sequence
///
/// The pair defines the "typical" band `[median - mad, median + mad]` used to
/// partition a frequency stream.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RobustStats {
    /// Median of the values
    pub median: f64,
    /// Median of `|x - median|` over the same values
    pub mad: f64,
}

impl RobustStats {
    /// Compute median and MAD of `values`
    ///
    /// Fails with [`SamplingError::EmptyInput`] when `values` is empty.
    pub fn compute(values: &[f64]) -> Result<Self> {
        let (median, mad) = median_mad(values)?;
        Ok(Self { median, mad })
    }

    /// Lower edge of the typical band
    pub fn lower(&self) -> f64 {
        self.median - self.mad
    }

    /// Upper edge of the typical band
    pub fn upper(&self) -> f64 {
        self.median + self.mad
    }

    /// Check if `value` lies within `[median - mad, median + mad]`, inclusive
    pub fn contains(&self, value: f64) -> bool {
        self.lower() <= value && value <= self.upper()
    }
}

/// Median of `values`
///
/// Even-length inputs average the two central order statistics.
/// Fails with [`SamplingError::EmptyInput`] when `values` is empty.
pub fn median(values: &[f64]) -> Result<f64> {
    let mut sorted = values.to_vec();
    median_in_place(&mut sorted)
}

/// Median and median absolute deviation of `values`
pub fn median_mad(values: &[f64]) -> Result<(f64, f64)> {
    let mut scratch = values.to_vec();
    let median = median_in_place(&mut scratch)?;

    for (dev, &x) in scratch.iter_mut().zip(values) {
        *dev = (x - median).abs();
    }
    let mad = median_in_place(&mut scratch)?;

    Ok((median, mad))
}

fn median_in_place(values: &mut [f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(SamplingError::EmptyInput);
    }

    values.sort_unstable_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Ok(values[mid])
    } else {
        Ok((values[mid - 1] + values[mid]) / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_odd_length() {
        assert_eq!(median_mad(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(), (3.0, 1.0));
    }

    #[test]
    fn test_even_length_interpolates() {
        // deviations from 2.5 are [1.5, 0.5, 0.5, 1.5] -> MAD 1.0
        assert_eq!(median_mad(&[1.0, 2.0, 3.0, 4.0]).unwrap(), (2.5, 1.0));
    }

    #[test]
    fn test_unsorted_input() {
        assert_eq!(median(&[5.0, 1.0, 4.0, 2.0, 3.0]).unwrap(), 3.0);
        assert_eq!(median_mad(&[1.0, 2.0, 3.0, 100.0, 2.0]).unwrap(), (2.0, 1.0));
    }

    #[test]
    fn test_single_value() {
        assert_eq!(median_mad(&[7.0]).unwrap(), (7.0, 0.0));
    }

    #[test]
    fn test_empty() {
        assert_eq!(median(&[]), Err(SamplingError::EmptyInput));
        assert_eq!(RobustStats::compute(&[]), Err(SamplingError::EmptyInput));
    }

    #[test]
    fn test_band_is_inclusive() {
        let stats = RobustStats {
            median: 10.0,
            mad: 2.0,
        };
        assert!(stats.contains(8.0));
        assert!(stats.contains(12.0));
        assert!(!stats.contains(7.999));
        assert!(!stats.contains(12.001));
    }

    #[test]
    fn test_input_untouched() {
        let values = [3.0, 1.0, 2.0];
        let _ = median_mad(&values).unwrap();
        assert_eq!(values, [3.0, 1.0, 2.0]);
    }
}

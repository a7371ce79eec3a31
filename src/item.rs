//! Data model: frequency items, samples and sample budgets

use core::fmt;

use crate::error::{Result, SamplingError};

/// One `(identifier, frequency)` pair from a frequency stream
///
/// Identifiers are opaque and need not be unique.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrequencyItem {
    /// Opaque identifier token
    pub id: String,
    /// Non-negative occurrence count (or rate)
    pub frequency: f64,
}

impl FrequencyItem {
    /// Create a new item
    pub fn new(id: impl Into<String>, frequency: f64) -> Self {
        Self {
            id: id.into(),
            frequency,
        }
    }
}

impl<S: Into<String>> From<(S, f64)> for FrequencyItem {
    fn from((id, frequency): (S, f64)) -> Self {
        Self::new(id, frequency)
    }
}

impl fmt::Display for FrequencyItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.id, self.frequency)
    }
}

/// Items drawn from a frequency stream, owned by the caller
pub type Sample = Vec<FrequencyItem>;

/// A validated, non-negative sample budget
///
/// Budgets arrive as signed counts (see
/// [`SampleSizeEstimator`](crate::traits::SampleSizeEstimator)); converting
/// one into a `SampleBudget` is where negative values are rejected.
///
/// ```
/// use stratsample::item::SampleBudget;
///
/// assert_eq!(SampleBudget::new(3).unwrap().get(), 3);
/// assert!(SampleBudget::new(-1).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleBudget(usize);

impl SampleBudget {
    /// Validate a signed budget
    pub fn new(k: i64) -> Result<Self> {
        usize::try_from(k)
            .map(SampleBudget)
            .map_err(|_| SamplingError::InvalidBudget(k))
    }

    /// The budget as an item count
    pub fn get(self) -> usize {
        self.0
    }
}

impl From<usize> for SampleBudget {
    fn from(k: usize) -> Self {
        SampleBudget(k)
    }
}

impl TryFrom<i64> for SampleBudget {
    type Error = SamplingError;

    fn try_from(k: i64) -> Result<Self> {
        Self::new(k)
    }
}

impl fmt::Display for SampleBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//! Error types shared by every algorithm family

use thiserror::Error;

/// Convenience alias for results produced by this crate
pub type Result<T, E = SamplingError> = core::result::Result<T, E>;

/// Failure of a sampling, statistics or sizing operation
///
/// Errors are never recovered internally: each one aborts the operation that
/// raised it and propagates unchanged to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SamplingError {
    /// Median (and therefore MAD) is undefined for an empty input
    #[error("median is undefined for an empty input")]
    EmptyInput,

    /// A sample budget was negative or could not be satisfied
    #[error("invalid sample budget: {0}")]
    InvalidBudget(i64),

    /// A proportional split or ratio had a zero denominator
    #[error("division by zero: {0}")]
    DivisionByZero(&'static str),

    /// Selection weights were empty, mismatched, negative, non-finite or all zero
    #[error("invalid weights: {0}")]
    InvalidWeights(String),

    /// A scalar parameter was outside its valid domain
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: String,
    },
}

impl SamplingError {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        SamplingError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

//! Proportional split of a sample budget between two partitions

use core::cmp::Ordering;

use crate::error::{Result, SamplingError};
use crate::item::SampleBudget;

/// Split `total_k` between two partitions in proportion to their sizes
///
/// Both shares are rounded independently (half to even) from the exact
/// ratio `total_k * size / (size_a + size_b)`. Rounding can leave the pair
/// one off the total; the drift is then reconciled:
///
/// - surplus: subtracted from the larger share (`k_a` on a tie)
/// - deficit: added to the smaller share (`k_a` on a tie)
///
/// so `k_a + k_b == total_k` always holds and neither share is negative.
///
/// Fails with [`SamplingError::InvalidBudget`] for negative `total_k` and
/// with [`SamplingError::DivisionByZero`] when both partitions are empty.
///
/// ```
/// use stratsample::selection::allocate;
///
/// assert_eq!(allocate(2, 3, 3).unwrap(), (1, 2));
/// // 0.5 and 0.5 both round to 0; the deficit goes to the first share
/// assert_eq!(allocate(1, 1, 1).unwrap(), (1, 0));
/// ```
pub fn allocate(size_a: usize, size_b: usize, total_k: i64) -> Result<(usize, usize)> {
    let total = SampleBudget::new(total_k)?.get() as i128;
    let population = size_a as i128 + size_b as i128;
    if population == 0 {
        return Err(SamplingError::DivisionByZero(
            "budget allocation across two empty partitions",
        ));
    }

    let mut k_a = rounded_share(total, size_a as i128, population);
    let mut k_b = rounded_share(total, size_b as i128, population);

    let drift = k_a + k_b - total;
    if drift > 0 {
        if k_a >= k_b {
            k_a -= drift;
        } else {
            k_b -= drift;
        }
    } else if drift < 0 {
        if k_a <= k_b {
            k_a -= drift;
        } else {
            k_b -= drift;
        }
    }

    debug_assert!(k_a >= 0 && k_b >= 0 && k_a + k_b == total);
    Ok((k_a as usize, k_b as usize))
}

/// `round(total * size / population)`, half to even, in exact integer
/// arithmetic
///
/// `total < 2^63` and `size < 2^64`, so the product fits in an `i128`.
fn rounded_share(total: i128, size: i128, population: i128) -> i128 {
    let numerator = total * size;
    let quotient = numerator / population;
    let remainder = numerator % population;
    match (2 * remainder).cmp(&population) {
        Ordering::Less => quotient,
        Ordering::Greater => quotient + 1,
        Ordering::Equal => quotient + (quotient & 1),
    }
}

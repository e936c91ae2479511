//! Order statistics and inversion counting

use super::sorting::{self, partition_3way, MERGE_INSERTION_THRESHOLD};
use crate::compare::Comparator;
use crate::dsa_violation;
use crate::error::{DsaError, Result};
use crate::random::Random64;

/// The element that would sit at index `k` if `v` were sorted
///
/// Partitions around random pivots, narrowing to the side holding `k`,
/// without sorting the rest. Expected O(n). On return `v[k]` is in its
/// sorted position, everything before it orders at or below it and
/// everything after at or above.
///
/// # Errors
///
/// `OutOfRange` if `k >= v.len()`.
///
/// # Examples
///
/// ```rust
/// use dsakit::algorithms::quick_select;
/// use dsakit::{NaturalOrder, Random64};
///
/// let mut v = vec![9, 2, 7, 4, 5];
/// let median = *quick_select(&mut v, 2, &NaturalOrder, &mut Random64::new())?;
/// assert_eq!(median, 5);
/// # Ok::<(), dsakit::DsaError>(())
/// ```
pub fn quick_select<'a, T, C: Comparator<T>>(
    v: &'a mut [T],
    k: usize,
    cmp: &C,
    rng: &mut Random64,
) -> Result<&'a T> {
    if k >= v.len() {
        return Err(dsa_violation!(DsaError::out_of_range(k, v.len())));
    }
    let mut lo = 0;
    let mut hi = v.len();
    while hi - lo > 1 {
        let range = &mut v[lo..hi];
        let p = rng.uniform_usize(range.len() - 1);
        range.swap(0, p);
        let (lt, gt) = partition_3way(range, cmp);
        let (lt, gt) = (lo + lt, lo + gt);
        if k < lt {
            hi = lt;
        } else if k > gt {
            lo = gt + 1;
        } else {
            break;
        }
    }
    Ok(&v[k])
}

/// Number of pairs `i < j` with `v[j]` ordering strictly before `v[i]`
///
/// Computed by mergesort in O(n log n); `v` is left sorted.
///
/// # Errors
///
/// `AllocationFailure` if the merge buffer cannot be obtained.
pub fn count_inversions<T, C: Comparator<T>>(v: &mut [T], cmp: &C) -> Result<u64> {
    sorting::merge_sort_with(v, cmp, MERGE_INSERTION_THRESHOLD)
}

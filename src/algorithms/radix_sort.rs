//! Counting sort and LSD radix sort
//!
//! Both are stable distribution sorts running in O(n + radix) per pass.
//! Elements are moved with an in-place permutation, so no `Clone` bound is
//! needed and the only scratch memory is the count table and one index per
//! element.

use crate::containers::DynamicArray;
use crate::dsa_violation;
use crate::error::{DsaError, Result};

/// Number of distinct byte values
const BYTE_RADIX: usize = 256;

/// Unsigned integer types usable directly as counting-sort keys
pub trait CountingKey: Copy {
    /// The key as a bucket index; saturates when it does not fit in `usize`
    fn bucket(&self) -> usize;
}

macro_rules! impl_counting_key {
    ($($t:ty),*) => {
        $(
            impl CountingKey for $t {
                #[inline]
                fn bucket(&self) -> usize {
                    usize::try_from(*self).unwrap_or(usize::MAX)
                }
            }
        )*
    };
}

impl_counting_key!(u8, u16, u32, u64, usize);

/// Sort non-negative integer keys in `[0, radix]`
///
/// # Errors
///
/// `OutOfRange` if any value exceeds `radix`; the slice is left unchanged.
///
/// # Examples
///
/// ```rust
/// use dsakit::algorithms::counting_sort;
///
/// let mut v = vec![3u32, 0, 2, 3, 1];
/// counting_sort(&mut v, 3)?;
/// assert_eq!(v, vec![0, 1, 2, 3, 3]);
/// # Ok::<(), dsakit::DsaError>(())
/// ```
pub fn counting_sort<K: CountingKey>(v: &mut [K], radix: usize) -> Result<()> {
    counting_sort_by_key(v, radix, |k: &K| k.bucket())
}

/// Stable counting sort of records by an extracted key in `[0, radix]`
///
/// # Errors
///
/// `OutOfRange` if an extracted key exceeds `radix`, `CapacityOverflow` if
/// `radix + 1` buckets cannot be addressed.
pub fn counting_sort_by_key<T, F>(v: &mut [T], radix: usize, key: F) -> Result<()>
where
    F: Fn(&T) -> usize,
{
    let buckets = radix
        .checked_add(1)
        .ok_or_else(|| dsa_violation!(DsaError::capacity_overflow(radix, 0)))?;
    if let Some(bad) = v.iter().map(&key).find(|&k| k > radix) {
        return Err(dsa_violation!(DsaError::out_of_range(bad, buckets)));
    }
    distribute(v, buckets, key)
}

/// One stable distribution pass; every key must already be below `buckets`
fn distribute<T, F>(v: &mut [T], buckets: usize, key: F) -> Result<()>
where
    F: Fn(&T) -> usize,
{
    if v.len() < 2 {
        return Ok(());
    }
    let mut starts = DynamicArray::with_size(buckets, 0usize)?;
    for item in v.iter() {
        starts[key(item)] += 1;
    }
    let mut total = 0;
    for slot in starts.iter_mut() {
        let count = *slot;
        *slot = total;
        total += count;
    }

    let mut dest = DynamicArray::with_capacity(v.len())?;
    for item in v.iter() {
        let bucket = key(item);
        dest.push(starts[bucket])?;
        starts[bucket] += 1;
    }
    apply_permutation(v, &mut dest);
    Ok(())
}

/// Move `v[i]` to `v[dest[i]]` for every `i`, following permutation cycles
///
/// `dest` ends up as the identity.
fn apply_permutation<T>(v: &mut [T], dest: &mut [usize]) {
    for i in 0..v.len() {
        while dest[i] != i {
            let d = dest[i];
            v.swap(i, d);
            dest.swap(i, d);
        }
    }
}

/// Least-significant-digit radix sort of equal-length byte keys
///
/// Runs one stable byte-wise counting pass per key position, from the last
/// byte to the first, leaving the keys in lexicographic order.
///
/// # Errors
///
/// `InvalidRange` if the keys do not all share the first key's length.
pub fn lsd_radix_sort<T: AsRef<[u8]>>(v: &mut [T]) -> Result<()> {
    let Some(first) = v.first() else {
        return Ok(());
    };
    let width = first.as_ref().len();
    if let Some((index, item)) = v
        .iter()
        .enumerate()
        .find(|(_, item)| item.as_ref().len() != width)
    {
        return Err(dsa_violation!(DsaError::invalid_range(
            index,
            item.as_ref().len(),
            width
        )));
    }
    log::trace!("lsd radix sort: {} keys of width {}", v.len(), width);

    for position in (0..width).rev() {
        distribute(v, BYTE_RADIX, |item: &T| item.as_ref()[position] as usize)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting_sort_basic() {
        let mut v = vec![5u32, 1, 4, 1, 0, 5, 3];
        counting_sort(&mut v, 5).unwrap();
        assert_eq!(v, vec![0, 1, 1, 3, 4, 5, 5]);
    }

    #[test]
    fn test_counting_sort_empty_and_single() {
        let mut empty: Vec<u8> = Vec::new();
        counting_sort(&mut empty, 10).unwrap();
        assert!(empty.is_empty());

        let mut one = vec![7u16];
        counting_sort(&mut one, 7).unwrap();
        assert_eq!(one, vec![7]);
    }

    #[test]
    fn test_counting_sort_key_out_of_range() {
        let mut v = vec![1u64, 9, 2];
        let err = counting_sort(&mut v, 8).unwrap_err();
        assert!(matches!(err, DsaError::OutOfRange { index: 9, size: 9 }));
        assert_eq!(v, vec![1, 9, 2]);
    }

    #[test]
    fn test_counting_sort_radix_overflow() {
        let mut v = vec![0usize, 1];
        assert!(matches!(
            counting_sort(&mut v, usize::MAX),
            Err(DsaError::CapacityOverflow { .. })
        ));
    }

    #[test]
    fn test_counting_sort_by_key_stable() {
        let mut records = vec![(2, "x"), (0, "y"), (2, "z"), (1, "w"), (0, "v")];
        counting_sort_by_key(&mut records, 2, |r: &(usize, &str)| r.0).unwrap();
        assert_eq!(
            records,
            vec![(0, "y"), (0, "v"), (1, "w"), (2, "x"), (2, "z")]
        );
    }

    #[test]
    fn test_apply_permutation() {
        let mut v = vec!['a', 'b', 'c', 'd'];
        let mut dest = vec![2, 0, 3, 1];
        apply_permutation(&mut v, &mut dest);
        assert_eq!(v, vec!['b', 'd', 'a', 'c']);
        assert_eq!(dest, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_lsd_radix_sort_strings() {
        let mut v = vec!["dab", "cab", "fad", "bad", "dad", "ebb", "ace", "add"];
        lsd_radix_sort(&mut v).unwrap();
        assert_eq!(
            v,
            vec!["ace", "add", "bad", "cab", "dab", "dad", "ebb", "fad"]
        );
    }

    #[test]
    fn test_lsd_radix_sort_byte_arrays() {
        let mut v: Vec<[u8; 4]> = [300u32, 7, 65536, 0, 255]
            .iter()
            .map(|x| x.to_be_bytes())
            .collect();
        lsd_radix_sort(&mut v).unwrap();
        let back: Vec<u32> = v.iter().map(|b| u32::from_be_bytes(*b)).collect();
        assert_eq!(back, vec![0, 7, 255, 300, 65536]);
    }

    #[test]
    fn test_lsd_radix_sort_mismatched_width() {
        let mut v = vec!["abc", "de", "fgh"];
        assert!(matches!(
            lsd_radix_sort(&mut v),
            Err(DsaError::InvalidRange { start: 1, end: 2, size: 3 })
        ));
    }

    #[test]
    fn test_lsd_radix_sort_zero_width() {
        let mut v = vec![String::new(), String::new()];
        lsd_radix_sort(&mut v).unwrap();
        assert_eq!(v.len(), 2);
    }
}

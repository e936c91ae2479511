//! Comparison sorts over slices
//!
//! Every routine takes an injected [`Comparator`] and works on `&mut [T]`,
//! so a [`DynamicArray`] is sorted in place through `DerefMut`.
//!
//! - [`insertion_sort`]: stable, base case for the recursive sorts
//! - [`quick_sort`]: randomized pivot, bounds-checked Hoare partition
//! - [`quick_sort_median3`]: same partition with a median-of-three pivot
//! - [`quick_sort_3way`]: Dijkstra partition for inputs with many equal keys
//! - [`merge_sort`]: stable, adaptive top-down mergesort with one buffer

use crate::compare::Comparator;
use crate::containers::DynamicArray;
use crate::error::Result;
use crate::random::Random64;
use std::cmp::Ordering;
use std::mem;
use std::ptr;

/// Ranges at or below this length are finished by insertion sort in quicksort
pub const QUICK_INSERTION_THRESHOLD: usize = 20;

/// Ranges at or below this length are finished by insertion sort in mergesort
pub const MERGE_INSERTION_THRESHOLD: usize = 200;

/// Insertion cutoff for the three-way quicksort
pub const THREE_WAY_INSERTION_THRESHOLD: usize = 256;

/// True when no element orders strictly before its predecessor
pub fn is_sorted<T, C: Comparator<T>>(v: &[T], cmp: &C) -> bool {
    v.windows(2).all(|w| !cmp.less(&w[1], &w[0]))
}

/// Stable insertion sort
pub fn insertion_sort<T, C: Comparator<T>>(v: &mut [T], cmp: &C) {
    insertion_sort_counting(v, cmp);
}

/// Insertion sort by adjacent swaps, returning the number of swaps made
///
/// Each swap removes exactly one inversion, so the return value is the
/// inversion count of the input.
pub(crate) fn insertion_sort_counting<T, C: Comparator<T>>(v: &mut [T], cmp: &C) -> u64 {
    let mut swaps = 0u64;
    for i in 1..v.len() {
        let mut j = i;
        while j > 0 && cmp.less(&v[j], &v[j - 1]) {
            v.swap(j, j - 1);
            j -= 1;
            swaps += 1;
        }
    }
    swaps
}

/// One bubble pass; returns false if no pair was out of order
///
/// When it returns true the last slot holds a maximum element.
fn bubble_pass<T, C: Comparator<T>>(v: &mut [T], cmp: &C) -> bool {
    let mut exchanged = false;
    for i in 1..v.len() {
        if cmp.less(&v[i], &v[i - 1]) {
            v.swap(i, i - 1);
            exchanged = true;
        }
    }
    exchanged
}

/// How quicksort picks its pivot
pub(crate) enum PivotRule<'a> {
    Random(&'a mut Random64),
    MedianOfThree,
}

impl PivotRule<'_> {
    fn select<T, C: Comparator<T>>(&mut self, v: &[T], cmp: &C) -> usize {
        match self {
            PivotRule::Random(rng) => rng.uniform_usize(v.len() - 1),
            PivotRule::MedianOfThree => median_of_three(v, cmp),
        }
    }
}

/// Index of the median of the first, middle and last elements
fn median_of_three<T, C: Comparator<T>>(v: &[T], cmp: &C) -> usize {
    let (a, b, c) = (0, v.len() / 2, v.len() - 1);
    if cmp.less(&v[a], &v[b]) {
        if cmp.less(&v[b], &v[c]) {
            b
        } else if cmp.less(&v[a], &v[c]) {
            c
        } else {
            a
        }
    } else if cmp.less(&v[a], &v[c]) {
        a
    } else if cmp.less(&v[b], &v[c]) {
        c
    } else {
        b
    }
}

/// Hoare partition around `v[0]`; returns the pivot's final position
///
/// Both scans stop at the ends of the range, so no sentinel is needed.
/// Requires `v.len() >= 2`.
fn partition<T, C: Comparator<T>>(v: &mut [T], cmp: &C) -> usize {
    let hi = v.len() - 1;
    let mut i = 0;
    let mut j = hi + 1;
    loop {
        loop {
            i += 1;
            if !cmp.less(&v[i], &v[0]) || i == hi {
                break;
            }
        }
        loop {
            j -= 1;
            if !cmp.less(&v[0], &v[j]) || j == 0 {
                break;
            }
        }
        if i >= j {
            break;
        }
        v.swap(i, j);
    }
    v.swap(0, j);
    j
}

/// Dijkstra three-way partition around `v[0]`
///
/// Returns `(lt, gt)` such that `v[..lt]` orders before the pivot,
/// `v[lt..=gt]` is equivalent to it and `v[gt + 1..]` orders after it.
pub(crate) fn partition_3way<T, C: Comparator<T>>(v: &mut [T], cmp: &C) -> (usize, usize) {
    let mut lt = 0;
    let mut i = 1;
    let mut gt = v.len() - 1;
    // v[lt] always holds an element equivalent to the pivot
    while i <= gt {
        match cmp.compare(&v[i], &v[lt]) {
            Ordering::Less => {
                v.swap(lt, i);
                lt += 1;
                i += 1;
            }
            Ordering::Greater => {
                v.swap(i, gt);
                gt -= 1;
            }
            Ordering::Equal => i += 1,
        }
    }
    (lt, gt)
}

fn quick_sort_loop<T, C: Comparator<T>>(
    mut v: &mut [T],
    cmp: &C,
    pivot: &mut PivotRule<'_>,
    threshold: usize,
) {
    loop {
        if v.len() <= threshold.max(1) {
            insertion_sort(v, cmp);
            return;
        }
        let p = pivot.select(v, cmp);
        v.swap(0, p);
        let mid = partition(v, cmp);

        let (left, right) = mem::take(&mut v).split_at_mut(mid);
        let right = &mut right[1..];
        // recurse into the smaller side so stack depth stays logarithmic
        if left.len() < right.len() {
            quick_sort_loop(left, cmp, pivot, threshold);
            v = right;
        } else {
            quick_sort_loop(right, cmp, pivot, threshold);
            v = left;
        }
    }
}

/// Quicksort entry shared by the pivot variants
pub(crate) fn quick_sort_by_rule<T, C: Comparator<T>>(
    v: &mut [T],
    cmp: &C,
    mut pivot: PivotRule<'_>,
    threshold: usize,
) {
    if v.len() < 2 || !bubble_pass(v, cmp) {
        return;
    }
    let n = v.len();
    log::trace!("quicksort over {} elements", n);
    quick_sort_loop(&mut v[..n - 1], cmp, &mut pivot, threshold);
}

/// Randomized quicksort (not stable)
///
/// A single bubble pass first detects sorted input and returns early.
/// Pivots are drawn from `rng`, so a fixed seed reproduces the exact
/// sequence of comparisons.
pub fn quick_sort<T, C: Comparator<T>>(v: &mut [T], cmp: &C, rng: &mut Random64) {
    quick_sort_by_rule(v, cmp, PivotRule::Random(rng), QUICK_INSERTION_THRESHOLD);
}

/// Quicksort with a median-of-three pivot (not stable)
pub fn quick_sort_median3<T, C: Comparator<T>>(v: &mut [T], cmp: &C) {
    quick_sort_by_rule(v, cmp, PivotRule::MedianOfThree, QUICK_INSERTION_THRESHOLD);
}

pub(crate) fn quick_sort_3way_with<T, C: Comparator<T>>(
    mut v: &mut [T],
    cmp: &C,
    rng: &mut Random64,
    threshold: usize,
) {
    loop {
        if v.len() <= threshold.max(1) {
            insertion_sort(v, cmp);
            return;
        }
        let p = rng.uniform_usize(v.len() - 1);
        v.swap(0, p);
        let (lt, gt) = partition_3way(v, cmp);

        let (left, rest) = mem::take(&mut v).split_at_mut(lt);
        let right = &mut rest[gt - lt + 1..];
        if left.len() < right.len() {
            quick_sort_3way_with(left, cmp, rng, threshold);
            v = right;
        } else {
            quick_sort_3way_with(right, cmp, rng, threshold);
            v = left;
        }
    }
}

/// Three-way randomized quicksort (not stable)
///
/// Runs of equal keys are gathered around the pivot and never revisited,
/// which keeps inputs with few distinct keys at O(n log k).
pub fn quick_sort_3way<T, C: Comparator<T>>(v: &mut [T], cmp: &C, rng: &mut Random64) {
    quick_sort_3way_with(v, cmp, rng, THREE_WAY_INSERTION_THRESHOLD);
}

/// Stable, adaptive top-down mergesort
///
/// Allocates one auxiliary buffer of `len / 2 + 1` slots up front. The merge
/// of two sorted halves is skipped when the last element of the left half
/// does not order after the first of the right, which makes sorted input
/// linear.
///
/// # Errors
///
/// `AllocationFailure` or `CapacityOverflow` if the buffer cannot be obtained.
pub fn merge_sort<T, C: Comparator<T>>(v: &mut [T], cmp: &C) -> Result<()> {
    merge_sort_with(v, cmp, MERGE_INSERTION_THRESHOLD).map(|_| ())
}

/// Mergesort returning the number of inversions it removed
pub(crate) fn merge_sort_with<T, C: Comparator<T>>(
    v: &mut [T],
    cmp: &C,
    threshold: usize,
) -> Result<u64> {
    let threshold = threshold.max(1);
    if mem::size_of::<T>() == 0 {
        return Ok(0);
    }
    if v.len() <= threshold {
        return Ok(insertion_sort_counting(v, cmp));
    }
    log::trace!("mergesort over {} elements", v.len());
    let mut buf: DynamicArray<T> = DynamicArray::with_capacity(v.len() / 2 + 1)?;
    // buf stays at length 0; its slots are scratch space only
    Ok(merge_sort_rec(v, cmp, threshold, buf.as_mut_ptr()))
}

fn merge_sort_rec<T, C: Comparator<T>>(v: &mut [T], cmp: &C, threshold: usize, buf: *mut T) -> u64 {
    let len = v.len();
    if len <= threshold {
        return insertion_sort_counting(v, cmp);
    }
    let mid = len / 2;
    let mut inversions = merge_sort_rec(&mut v[..mid], cmp, threshold, buf);
    inversions += merge_sort_rec(&mut v[mid..], cmp, threshold, buf);
    if !cmp.less(&v[mid], &v[mid - 1]) {
        return inversions;
    }
    // Safety: buf has room for len / 2 + 1 >= mid elements
    inversions + unsafe { merge(v, mid, buf, cmp) }
}

/// Merge the sorted runs `v[..mid]` and `v[mid..]`, counting cross inversions
///
/// The left run is moved into `buf`; the hole guard writes back whatever
/// is left of it if the comparator panics, so `v` always holds every
/// element exactly once.
unsafe fn merge<T, C: Comparator<T>>(v: &mut [T], mid: usize, buf: *mut T, cmp: &C) -> u64 {
    // Safety: the caller guarantees buf has room for mid elements
    unsafe {
        let len = v.len();
        let v = v.as_mut_ptr();
        let mut right = v.add(mid);
        let right_end = v.add(len);
        let mut inversions = 0u64;

        ptr::copy_nonoverlapping(v, buf, mid);
        let mut hole = MergeHole {
            start: buf,
            end: buf.add(mid),
            dest: v,
        };

        while hole.start < hole.end && right < right_end {
            // taking from the left on ties keeps the merge stable
            let to_copy = if cmp.less(&*right, &*hole.start) {
                inversions += hole.end.offset_from(hole.start) as u64;
                let r = right;
                right = right.add(1);
                r
            } else {
                let l = hole.start;
                hole.start = hole.start.add(1);
                l
            };
            ptr::copy_nonoverlapping(to_copy, hole.dest, 1);
            hole.dest = hole.dest.add(1);
        }
        inversions
    }
}

/// Left-run remainder that still has to land in front of `dest`
struct MergeHole<T> {
    start: *mut T,
    end: *mut T,
    dest: *mut T,
}

impl<T> Drop for MergeHole<T> {
    fn drop(&mut self) {
        // Safety: [start, end) is initialized and dest has exactly that much room
        unsafe {
            let len = self.end.offset_from(self.start) as usize;
            ptr::copy_nonoverlapping(self.start, self.dest, len);
        }
    }
}

//! BinaryHeap: array-backed priority queue
//!
//! Heap positions are 1-based: position `p` has children `2p` and `2p + 1`
//! and parent `p / 2`. Position `p` is stored in slot `p - 1` of the backing
//! [`DynamicArray`], so no placeholder element is needed for slot 0.

use super::DynamicArray;
use crate::compare::{Comparator, NaturalOrder};
use crate::dsa_violation;
use crate::error::{DsaError, Result};
use std::fmt;
use std::ops::AddAssign;

/// Priority queue ordered by a [`Comparator`]
///
/// `a` has higher priority than `b` when `compare(a, b)` is `Less`, so the
/// default [`NaturalOrder`] gives a min-heap. Wrap the comparator in
/// [`Reverse`](crate::Reverse) for a max-heap.
///
/// # Examples
///
/// ```rust
/// use dsakit::{BinaryHeap, NaturalOrder, Reverse};
///
/// let mut heap: BinaryHeap<i32> = [5, 1, 4].into_iter().collect();
/// assert_eq!(heap.extract()?, 1);
///
/// let mut max_heap = BinaryHeap::with_comparator(Reverse(NaturalOrder));
/// max_heap.insert(3)?;
/// max_heap.insert(9)?;
/// assert_eq!(*max_heap.peek()?, 9);
/// # Ok::<(), dsakit::DsaError>(())
/// ```
#[derive(Clone)]
pub struct BinaryHeap<T, C = NaturalOrder> {
    data: DynamicArray<T>,
    cmp: C,
}

impl<T: Ord> BinaryHeap<T, NaturalOrder> {
    /// Empty min-heap
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T: Ord> Default for BinaryHeap<T, NaturalOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Comparator<T>> BinaryHeap<T, C> {
    /// Empty heap ordered by `cmp`
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            data: DynamicArray::new(),
            cmp,
        }
    }

    /// Heapify an existing array bottom-up in O(n)
    pub fn from_array(data: DynamicArray<T>, cmp: C) -> Self {
        let mut heap = Self { data, cmp };
        let n = heap.data.len();
        for p in (1..=n / 2).rev() {
            heap.sift_down(p, n);
        }
        heap
    }

    /// Number of queued elements
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when nothing is queued
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Drop every element
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// The comparator ordering this heap
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// `a` outranks `b` at 1-based positions
    #[inline]
    fn outranks(&self, a: usize, b: usize) -> bool {
        self.cmp.less(&self.data[a - 1], &self.data[b - 1])
    }

    fn sift_up(&mut self, mut p: usize) {
        while p > 1 && self.outranks(p, p / 2) {
            self.data.swap(p - 1, p / 2 - 1);
            p /= 2;
        }
    }

    /// Restore the heap below position `p` within the first `n` positions
    fn sift_down(&mut self, mut p: usize, n: usize) {
        while 2 * p <= n {
            let mut child = 2 * p;
            if child < n && self.outranks(child + 1, child) {
                child += 1;
            }
            if !self.outranks(child, p) {
                break;
            }
            self.data.swap(p - 1, child - 1);
            p = child;
        }
    }

    /// Add an element
    pub fn insert(&mut self, value: T) -> Result<()> {
        self.data.push(value)?;
        let n = self.data.len();
        self.sift_up(n);
        Ok(())
    }

    /// Remove and return the highest-priority element
    ///
    /// # Errors
    ///
    /// `EmptyContainer` if the heap is empty.
    pub fn extract(&mut self) -> Result<T> {
        let n = self.data.len();
        if n == 0 {
            return Err(dsa_violation!(DsaError::empty_container(
                "BinaryHeap",
                "extract"
            )));
        }
        self.data.swap(0, n - 1);
        let top = self
            .data
            .pop()
            .ok_or_else(|| dsa_violation!(DsaError::empty_container("BinaryHeap", "extract")))?;
        self.sift_down(1, n - 1);
        Ok(top)
    }

    /// Highest-priority element without removing it
    pub fn peek(&self) -> Result<&T> {
        self.data
            .first()
            .ok_or_else(|| dsa_violation!(DsaError::empty_container("BinaryHeap", "peek")))
    }

    /// Elements in storage order
    pub fn as_slice(&self) -> &[T] {
        self.data.as_slice()
    }

    /// Consume the heap, returning its elements in priority order
    pub fn into_sorted_array(mut self) -> DynamicArray<T> {
        let n = self.data.len();
        // heapsort leaves the lowest priority first; flip afterwards
        for end in (2..=n).rev() {
            self.data.swap(0, end - 1);
            self.sift_down(1, end - 1);
        }
        self.data.reverse();
        self.data
    }
}

impl<T: Ord> FromIterator<T> for BinaryHeap<T, NaturalOrder> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_array(iter.into_iter().collect(), NaturalOrder)
    }
}

impl<T, C: Comparator<T>> AddAssign<T> for BinaryHeap<T, C> {
    fn add_assign(&mut self, value: T) {
        if let Err(e) = self.insert(value) {
            panic!("BinaryHeap insert failed: {}", e);
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for BinaryHeap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryHeap")
            .field("data", &self.data)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::Reverse;

    fn drain<T, C: Comparator<T>>(heap: &mut BinaryHeap<T, C>) -> Vec<T> {
        let mut out = Vec::new();
        while !heap.is_empty() {
            out.push(heap.extract().unwrap());
        }
        out
    }

    fn assert_heap<T, C: Comparator<T>>(heap: &BinaryHeap<T, C>) {
        let n = heap.len();
        for p in 2..=n {
            assert!(!heap.outranks(p, p / 2), "position {} outranks its parent", p);
        }
    }

    #[test]
    fn test_min_heap_order() {
        let mut heap = BinaryHeap::new();
        for x in [5, 1, 4, 2, 8] {
            heap.insert(x).unwrap();
            assert_heap(&heap);
        }
        assert_eq!(*heap.peek().unwrap(), 1);
        assert_eq!(drain(&mut heap), vec![1, 2, 4, 5, 8]);
    }

    #[test]
    fn test_max_heap_with_reverse() {
        let mut heap = BinaryHeap::with_comparator(Reverse(NaturalOrder));
        for x in [3, 9, 1, 7] {
            heap += x;
        }
        assert_eq!(drain(&mut heap), vec![9, 7, 3, 1]);
    }

    #[test]
    fn test_closure_comparator() {
        let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
        let mut heap = BinaryHeap::with_comparator(by_len);
        for s in ["ccc", "a", "bb"] {
            heap.insert(s).unwrap();
        }
        assert_eq!(heap.extract().unwrap(), "a");
    }

    #[test]
    fn test_from_array_heapifies() {
        let data: DynamicArray<i32> = (0..100).rev().collect();
        let heap = BinaryHeap::from_array(data, NaturalOrder);
        assert_heap(&heap);
        assert_eq!(*heap.peek().unwrap(), 0);
        assert_eq!(heap.len(), 100);
    }

    #[test]
    fn test_into_sorted_array() {
        let heap: BinaryHeap<i32> = [9, 3, 7, 1, 3, 8].into_iter().collect();
        assert_eq!(heap.into_sorted_array().as_slice(), &[1, 3, 3, 7, 8, 9]);

        let heap = BinaryHeap::from_array((0..10).collect(), Reverse(NaturalOrder));
        let sorted = heap.into_sorted_array();
        assert_eq!(sorted.as_slice(), &[9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_empty_errors() {
        let mut heap: BinaryHeap<u32> = BinaryHeap::new();
        assert!(matches!(
            heap.extract(),
            Err(DsaError::EmptyContainer { container: "BinaryHeap", operation: "extract" })
        ));
        assert!(heap.peek().is_err());
    }

    #[test]
    fn test_size_after_inserts_and_extracts() {
        let mut heap = BinaryHeap::new();
        for i in 0..50 {
            heap.insert(i % 13).unwrap();
        }
        for _ in 0..20 {
            heap.extract().unwrap();
        }
        assert_eq!(heap.len(), 30);
        assert_heap(&heap);
        heap.clear();
        assert!(heap.is_empty());
    }
}

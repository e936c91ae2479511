//! DynamicArray: contiguous, owning, growable sequence
//!
//! Allocation is separated from construction: the buffer holds `capacity`
//! slots of which only `[0, len)` are initialized, so capacity can be
//! reserved without touching the unused slots. Growth goes through
//! `realloc`, doubling the capacity unless a larger explicit reservation is
//! requested, for amortized O(1) append.

use crate::algorithms::sorting;
use crate::compare::{Comparator, NaturalOrder, Reverse};
use crate::dsa_violation;
use crate::error::{check_bounds, check_insert_position, check_range, DsaError, Result};
use crate::random::Random64;
use std::alloc::{self, Layout};
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ops::{Add, AddAssign, Deref, DerefMut, Index, IndexMut};
use std::ptr::{self, NonNull};
use std::slice;

/// Growable array with explicit capacity management
///
/// # Examples
///
/// ```rust
/// use dsakit::DynamicArray;
///
/// let mut arr = DynamicArray::new();
/// arr.push(3)?;
/// arr.push(1)?;
/// arr.push(2)?;
/// arr.sort();
/// assert_eq!(arr.as_slice(), &[1, 2, 3]);
/// # Ok::<(), dsakit::DsaError>(())
/// ```
pub struct DynamicArray<T> {
    ptr: Option<NonNull<T>>,
    len: usize,
    cap: usize,
    _marker: PhantomData<T>,
}

impl<T> DynamicArray<T> {
    /// Capacity of the first allocation made by an append
    const MIN_NON_ZERO_CAP: usize = 4;

    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// Create a new empty array without allocating
    #[inline]
    pub fn new() -> Self {
        Self {
            ptr: None,
            len: 0,
            cap: 0,
            _marker: PhantomData,
        }
    }

    /// Create an array with room for `cap` elements, none initialized
    pub fn with_capacity(cap: usize) -> Result<Self> {
        let mut arr = Self::new();
        if cap > 0 {
            arr.realloc(cap)?;
        }
        Ok(arr)
    }

    /// Create an array of `size` copies of `value`
    pub fn with_size(size: usize, value: T) -> Result<Self>
    where
        T: Clone,
    {
        let mut arr = Self::with_capacity(size)?;
        arr.resize(size, value)?;
        Ok(arr)
    }

    /// Create an array holding clones of `items`
    pub fn from_slice(items: &[T]) -> Result<Self>
    where
        T: Clone,
    {
        let mut arr = Self::with_capacity(items.len())?;
        arr.extend_from_slice(items)?;
        Ok(arr)
    }

    /// Number of live elements
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when there are no live elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocated slots
    #[inline]
    pub fn capacity(&self) -> usize {
        if Self::IS_ZST {
            usize::MAX
        } else {
            self.cap
        }
    }

    /// Pointer to the first slot (dangling when nothing is allocated)
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        match self.ptr {
            Some(ptr) => ptr.as_ptr(),
            None => NonNull::dangling().as_ptr(),
        }
    }

    /// Mutable pointer to the first slot (dangling when nothing is allocated)
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        match self.ptr {
            Some(ptr) => ptr.as_ptr(),
            None => NonNull::dangling().as_ptr(),
        }
    }

    /// Live elements as a slice
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    /// Live elements as a mutable slice
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }

    fn layout_for(cap: usize) -> Result<Layout> {
        Layout::array::<T>(cap)
            .map_err(|_| dsa_violation!(DsaError::capacity_overflow(cap, mem::size_of::<T>())))
    }

    /// Reallocate to exactly `new_cap` slots
    fn realloc(&mut self, new_cap: usize) -> Result<()> {
        if Self::IS_ZST || new_cap <= self.cap {
            return Ok(());
        }
        let new_layout = Self::layout_for(new_cap)?;

        let new_ptr = match self.ptr {
            Some(ptr) => {
                let old_layout = Self::layout_for(self.cap)?;
                unsafe {
                    alloc::realloc(ptr.as_ptr() as *mut u8, old_layout, new_layout.size()) as *mut T
                }
            }
            None => unsafe { alloc::alloc(new_layout) as *mut T },
        };

        let ptr = NonNull::new(new_ptr)
            .ok_or_else(|| dsa_violation!(DsaError::allocation_failure(new_layout.size())))?;
        log::debug!(
            "DynamicArray capacity {} -> {} ({} live)",
            self.cap,
            new_cap,
            self.len
        );
        self.ptr = Some(ptr);
        self.cap = new_cap;
        Ok(())
    }

    /// Grow for at least `required` slots, doubling unless more is asked for
    fn grow_amortized(&mut self, required: usize) -> Result<()> {
        let target = required
            .max(self.cap.saturating_mul(2))
            .max(Self::MIN_NON_ZERO_CAP);
        self.realloc(target)
    }

    /// Reserve space for at least `additional` more elements
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        let required = self.len.checked_add(additional).ok_or_else(|| {
            dsa_violation!(DsaError::capacity_overflow(usize::MAX, mem::size_of::<T>()))
        })?;
        if required <= self.capacity() {
            return Ok(());
        }
        self.grow_amortized(required)
    }

    /// Reserve space for exactly `additional` more elements
    pub fn reserve_exact(&mut self, additional: usize) -> Result<()> {
        let required = self.len.checked_add(additional).ok_or_else(|| {
            dsa_violation!(DsaError::capacity_overflow(usize::MAX, mem::size_of::<T>()))
        })?;
        self.realloc(required)
    }

    /// Ensure the array has at least `min_cap` slots
    pub fn ensure_capacity(&mut self, min_cap: usize) -> Result<()> {
        if min_cap <= self.capacity() {
            return Ok(());
        }
        self.realloc(min_cap)
    }

    /// Append an element to the end
    pub fn push(&mut self, value: T) -> Result<()> {
        if self.len == self.capacity() {
            if Self::IS_ZST {
                return Err(dsa_violation!(DsaError::capacity_overflow(
                    usize::MAX,
                    0
                )));
            }
            self.grow_amortized(self.len + 1)?;
        }
        unsafe {
            ptr::write(self.as_mut_ptr().add(self.len), value);
        }
        self.len += 1;
        Ok(())
    }

    /// Remove and return the last element
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            self.len -= 1;
            Some(unsafe { ptr::read(self.as_ptr().add(self.len)) })
        }
    }

    /// Insert an element at `index`, shifting the tail right
    ///
    /// `index == len()` appends.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        check_insert_position(index, self.len).map_err(|e| dsa_violation!(e))?;
        if self.len == self.capacity() {
            self.grow_amortized(self.len + 1)?;
        }
        unsafe {
            let p = self.as_mut_ptr().add(index);
            ptr::copy(p, p.add(1), self.len - index);
            ptr::write(p, value);
        }
        self.len += 1;
        Ok(())
    }

    /// Remove the element at `index`, preserving the order of the rest
    pub fn remove(&mut self, index: usize) -> Result<T> {
        check_bounds(index, self.len).map_err(|e| dsa_violation!(e))?;
        unsafe {
            let p = self.as_mut_ptr().add(index);
            let value = ptr::read(p);
            ptr::copy(p.add(1), p, self.len - index - 1);
            self.len -= 1;
            Ok(value)
        }
    }

    /// Remove the element at `index` by moving the last element into the gap
    ///
    /// O(1); does not preserve order.
    pub fn swap_remove(&mut self, index: usize) -> Result<T> {
        check_bounds(index, self.len).map_err(|e| dsa_violation!(e))?;
        unsafe {
            let base = self.as_mut_ptr();
            let value = ptr::read(base.add(index));
            let last = self.len - 1;
            if index != last {
                ptr::copy_nonoverlapping(base.add(last), base.add(index), 1);
            }
            self.len = last;
            Ok(value)
        }
    }

    /// Checked shared access
    pub fn get(&self, index: usize) -> Result<&T> {
        check_bounds(index, self.len).map_err(|e| dsa_violation!(e))?;
        Ok(unsafe { &*self.as_ptr().add(index) })
    }

    /// Checked mutable access
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        check_bounds(index, self.len).map_err(|e| dsa_violation!(e))?;
        Ok(unsafe { &mut *self.as_mut_ptr().add(index) })
    }

    /// Replace the element at `index`, returning the previous one
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        let slot = self.get_mut(index)?;
        Ok(mem::replace(slot, value))
    }

    /// Last element, if any
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Resize to `new_len`, cloning `value` into new slots
    pub fn resize(&mut self, new_len: usize, value: T) -> Result<()>
    where
        T: Clone,
    {
        if new_len > self.len {
            self.ensure_capacity(new_len)?;
            while self.len < new_len {
                unsafe {
                    ptr::write(self.as_mut_ptr().add(self.len), value.clone());
                }
                self.len += 1;
            }
        } else {
            self.truncate(new_len);
        }
        Ok(())
    }

    /// Drop every element past `new_len`
    pub fn truncate(&mut self, new_len: usize) {
        while self.len > new_len {
            self.len -= 1;
            unsafe {
                ptr::drop_in_place(self.as_mut_ptr().add(self.len));
            }
        }
    }

    /// Drop all elements, keeping the allocation
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Shrink the capacity to the current length
    pub fn shrink_to_fit(&mut self) -> Result<()> {
        if Self::IS_ZST || self.len == self.cap {
            return Ok(());
        }
        let Some(ptr) = self.ptr else {
            return Ok(());
        };
        let old_layout = Self::layout_for(self.cap)?;

        if self.len == 0 {
            unsafe { alloc::dealloc(ptr.as_ptr() as *mut u8, old_layout) };
            self.ptr = None;
            self.cap = 0;
            return Ok(());
        }

        let new_layout = Self::layout_for(self.len)?;
        let new_ptr = unsafe {
            alloc::realloc(ptr.as_ptr() as *mut u8, old_layout, new_layout.size()) as *mut T
        };
        self.ptr = Some(
            NonNull::new(new_ptr)
                .ok_or_else(|| dsa_violation!(DsaError::allocation_failure(new_layout.size())))?,
        );
        self.cap = self.len;
        Ok(())
    }

    /// Append every item of an iterator
    pub fn extend<I>(&mut self, iter: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0)?;
        for item in iter {
            self.push(item)?;
        }
        Ok(())
    }

    /// Append clones of every element of `items`
    pub fn extend_from_slice(&mut self, items: &[T]) -> Result<()>
    where
        T: Clone,
    {
        self.reserve(items.len())?;
        for item in items {
            unsafe {
                ptr::write(self.as_mut_ptr().add(self.len), item.clone());
            }
            self.len += 1;
        }
        Ok(())
    }

    /// Move every element of `other` onto the end of `self`, leaving `other` empty
    pub fn append(&mut self, other: &mut Self) -> Result<()> {
        let count = other.len;
        self.reserve(count)?;
        unsafe {
            ptr::copy_nonoverlapping(other.as_ptr(), self.as_mut_ptr().add(self.len), count);
        }
        other.len = 0;
        self.len += count;
        Ok(())
    }

    /// Copy of the elements in `[start, end)`
    pub fn sub_array(&self, start: usize, end: usize) -> Result<Self>
    where
        T: Clone,
    {
        check_range(start, end, self.len).map_err(|e| dsa_violation!(e))?;
        Self::from_slice(&self.as_slice()[start..end])
    }

    /// Copy of the elements from `start` to the end
    pub fn sub_array_from(&self, start: usize) -> Result<Self>
    where
        T: Clone,
    {
        self.sub_array(start, self.len)
    }

    /// Position of the first element equal to `value`
    pub fn find(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.as_slice().iter().position(|x| x == value)
    }

    /// Position of the first element `comparator` considers equal to `value`
    pub fn find_by<C: Comparator<T>>(&self, value: &T, comparator: &C) -> Option<usize> {
        self.as_slice().iter().position(|x| comparator.equal(x, value))
    }

    /// Overwrite `[start, end)` with clones of `value`
    pub fn fill(&mut self, value: T, start: usize, end: usize) -> Result<()>
    where
        T: Clone,
    {
        check_range(start, end, self.len).map_err(|e| dsa_violation!(e))?;
        for slot in &mut self.as_mut_slice()[start..end] {
            *slot = value.clone();
        }
        Ok(())
    }

    /// Sort ascending by natural order (not stable)
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.sort_by(&NaturalOrder);
    }

    /// Sort descending by natural order (not stable)
    pub fn sort_descending(&mut self)
    where
        T: Ord,
    {
        self.sort_by(&Reverse(NaturalOrder));
    }

    /// Sort with a comparator using randomized quicksort (not stable)
    pub fn sort_by<C: Comparator<T>>(&mut self, comparator: &C) {
        let mut rng = Random64::new();
        sorting::quick_sort(self.as_mut_slice(), comparator, &mut rng);
    }

    /// Stable ascending sort by natural order
    pub fn stable_sort(&mut self) -> Result<()>
    where
        T: Ord,
    {
        self.stable_sort_by(&NaturalOrder)
    }

    /// Stable sort with a comparator using adaptive mergesort
    ///
    /// Linear on input that is already sorted.
    pub fn stable_sort_by<C: Comparator<T>>(&mut self, comparator: &C) -> Result<()> {
        sorting::merge_sort(self.as_mut_slice(), comparator)
    }

    /// True when no adjacent pair is out of order under `comparator`
    pub fn is_sorted_by<C: Comparator<T>>(&self, comparator: &C) -> bool {
        sorting::is_sorted(self.as_slice(), comparator)
    }

    /// Borrowing iterator
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Mutable borrowing iterator
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        self.clear();
        if let Some(ptr) = self.ptr {
            if let Ok(layout) = Self::layout_for(self.cap) {
                unsafe { alloc::dealloc(ptr.as_ptr() as *mut u8, layout) };
            }
        }
    }
}

impl<T> Deref for DynamicArray<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> DerefMut for DynamicArray<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T> Index<usize> for DynamicArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<T> IndexMut<usize> for DynamicArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.as_mut_slice()[index]
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T: Clone> Clone for DynamicArray<T> {
    fn clone(&self) -> Self {
        match Self::from_slice(self.as_slice()) {
            Ok(arr) => arr,
            Err(e) => panic!("DynamicArray clone failed: {}", e),
        }
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut arr = Self::new();
        if let Err(e) = arr.extend(iter) {
            panic!("DynamicArray collect failed: {}", e);
        }
        arr
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        if let Err(e) = DynamicArray::extend(self, iter) {
            panic!("DynamicArray extend failed: {}", e);
        }
    }
}

impl<T: Clone> Add<&DynamicArray<T>> for &DynamicArray<T> {
    type Output = DynamicArray<T>;

    fn add(self, rhs: &DynamicArray<T>) -> DynamicArray<T> {
        let mut out = self.clone();
        out += rhs;
        out
    }
}

impl<T> Add for DynamicArray<T> {
    type Output = DynamicArray<T>;

    fn add(mut self, mut rhs: DynamicArray<T>) -> DynamicArray<T> {
        self += &mut rhs;
        self
    }
}

impl<T: Clone> AddAssign<&DynamicArray<T>> for DynamicArray<T> {
    fn add_assign(&mut self, rhs: &DynamicArray<T>) {
        if let Err(e) = self.extend_from_slice(rhs.as_slice()) {
            panic!("DynamicArray concatenation failed: {}", e);
        }
    }
}

impl<T> AddAssign<&mut DynamicArray<T>> for DynamicArray<T> {
    fn add_assign(&mut self, rhs: &mut DynamicArray<T>) {
        if let Err(e) = self.append(rhs) {
            panic!("DynamicArray concatenation failed: {}", e);
        }
    }
}

/// Owning iterator over a [`DynamicArray`]
pub struct IntoIter<T> {
    arr: DynamicArray<T>,
    front: usize,
    back: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        let value = unsafe { ptr::read(self.arr.as_ptr().add(self.front)) };
        self.front += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(unsafe { ptr::read(self.arr.as_ptr().add(self.back)) })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        unsafe {
            let remaining = ptr::slice_from_raw_parts_mut(
                self.arr.as_mut_ptr().add(self.front),
                self.back - self.front,
            );
            // the array must not drop what was already yielded
            self.arr.len = 0;
            ptr::drop_in_place(remaining);
        }
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> IntoIter<T> {
        let back = self.len;
        // ownership of the live range moves to the iterator
        self.len = 0;
        IntoIter {
            arr: self,
            front: 0,
            back,
        }
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

// Safety: DynamicArray<T> uniquely owns its elements
unsafe impl<T: Send> Send for DynamicArray<T> {}

// Safety: shared access only hands out &T
unsafe impl<T: Sync> Sync for DynamicArray<T> {}

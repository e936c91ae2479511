//! CircularQueue: ring-buffer FIFO
//!
//! The buffer capacity is always a power of two so wrap-around is a bit
//! mask. One slot is kept unused, which makes `head == tail` mean empty and
//! `tail + 1 == head` mean full; a full ring doubles on the next enqueue.

use crate::dsa_violation;
use crate::error::{DsaError, Result};
use std::alloc::{self, Layout};
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};

/// Growable FIFO queue over a circular buffer
///
/// # Examples
///
/// ```rust
/// use dsakit::CircularQueue;
///
/// let mut queue = CircularQueue::new();
/// for i in 0..10 {
///     queue.enqueue(i)?;
/// }
/// assert_eq!(queue.dequeue()?, 0);
/// assert_eq!(*queue.peek()?, 1);
/// # Ok::<(), dsakit::DsaError>(())
/// ```
pub struct CircularQueue<T> {
    buffer: NonNull<T>,
    /// Allocated slots; zero or a power of two
    capacity: usize,
    /// Read position
    head: usize,
    /// Write position
    tail: usize,
    _phantom: PhantomData<T>,
}

impl<T> CircularQueue<T> {
    /// Slots allocated by the first enqueue
    const INITIAL_CAPACITY: usize = 4;

    /// Create an empty queue; nothing is allocated until the first enqueue
    pub fn new() -> Self {
        Self {
            buffer: NonNull::dangling(),
            capacity: 0,
            head: 0,
            tail: 0,
            _phantom: PhantomData,
        }
    }

    /// Create a queue that holds `capacity` elements before it has to grow
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut queue = Self::new();
        if capacity > 0 {
            let slots = capacity
                .checked_add(1)
                .and_then(usize::checked_next_power_of_two)
                .ok_or_else(|| {
                    dsa_violation!(DsaError::capacity_overflow(capacity, mem::size_of::<T>()))
                })?;
            queue.grow_to(slots.max(Self::INITIAL_CAPACITY))?;
        }
        Ok(queue)
    }

    #[inline]
    fn mask(&self) -> usize {
        self.capacity.wrapping_sub(1)
    }

    /// Number of queued elements
    #[inline]
    pub fn len(&self) -> usize {
        self.tail.wrapping_sub(self.head) & self.mask()
    }

    /// True when nothing is queued
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Allocated slots (one of which always stays free)
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn layout_for(capacity: usize) -> Result<Layout> {
        Layout::array::<T>(capacity).map_err(|_| {
            dsa_violation!(DsaError::capacity_overflow(capacity, mem::size_of::<T>()))
        })
    }

    fn allocate(capacity: usize) -> Result<NonNull<T>> {
        let layout = Self::layout_for(capacity)?;
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }
        // Safety: layout has non-zero size
        let ptr = unsafe { alloc::alloc(layout) as *mut T };
        NonNull::new(ptr).ok_or_else(|| dsa_violation!(DsaError::allocation_failure(layout.size())))
    }

    fn release(&mut self) {
        if self.capacity == 0 {
            return;
        }
        if let Ok(layout) = Self::layout_for(self.capacity) {
            if layout.size() != 0 {
                unsafe { alloc::dealloc(self.buffer.as_ptr() as *mut u8, layout) };
            }
        }
    }

    /// Move the live elements into a fresh buffer of `new_capacity` slots,
    /// unwrapping them so the front lands at slot 0
    fn grow_to(&mut self, new_capacity: usize) -> Result<()> {
        let new_buffer = Self::allocate(new_capacity)?;
        let len = self.len();
        if len > 0 {
            unsafe {
                let src = self.buffer.as_ptr();
                let dst = new_buffer.as_ptr();
                if self.head < self.tail {
                    ptr::copy_nonoverlapping(src.add(self.head), dst, len);
                } else {
                    let first_part = self.capacity - self.head;
                    ptr::copy_nonoverlapping(src.add(self.head), dst, first_part);
                    ptr::copy_nonoverlapping(src, dst.add(first_part), self.tail);
                }
            }
        }
        log::debug!(
            "CircularQueue capacity {} -> {} ({} queued)",
            self.capacity,
            new_capacity,
            len
        );
        self.release();
        self.buffer = new_buffer;
        self.capacity = new_capacity;
        self.head = 0;
        self.tail = len;
        Ok(())
    }

    /// Append at the back, doubling the ring first if it is full
    pub fn enqueue(&mut self, value: T) -> Result<()> {
        if self.capacity == 0 {
            self.grow_to(Self::INITIAL_CAPACITY)?;
        } else if (self.tail + 1) & self.mask() == self.head {
            let doubled = self.capacity.checked_mul(2).ok_or_else(|| {
                dsa_violation!(DsaError::capacity_overflow(usize::MAX, mem::size_of::<T>()))
            })?;
            self.grow_to(doubled)?;
        }
        unsafe {
            ptr::write(self.buffer.as_ptr().add(self.tail), value);
        }
        self.tail = (self.tail + 1) & self.mask();
        Ok(())
    }

    /// Remove and return the front element
    ///
    /// # Errors
    ///
    /// `EmptyContainer` if the queue is empty.
    pub fn dequeue(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(dsa_violation!(DsaError::empty_container(
                "CircularQueue",
                "dequeue"
            )));
        }
        let value = unsafe { ptr::read(self.buffer.as_ptr().add(self.head)) };
        self.head = (self.head + 1) & self.mask();
        Ok(value)
    }

    /// Front element
    pub fn peek(&self) -> Result<&T> {
        if self.is_empty() {
            return Err(dsa_violation!(DsaError::empty_container(
                "CircularQueue",
                "peek"
            )));
        }
        Ok(unsafe { &*self.buffer.as_ptr().add(self.head) })
    }

    /// Most recently enqueued element
    pub fn peek_back(&self) -> Result<&T> {
        if self.is_empty() {
            return Err(dsa_violation!(DsaError::empty_container(
                "CircularQueue",
                "peek_back"
            )));
        }
        let last = self.tail.wrapping_sub(1) & self.mask();
        Ok(unsafe { &*self.buffer.as_ptr().add(last) })
    }

    /// Drop every element, keeping the buffer
    pub fn clear(&mut self) {
        while !self.is_empty() {
            unsafe {
                ptr::drop_in_place(self.buffer.as_ptr().add(self.head));
            }
            self.head = (self.head + 1) & self.mask();
        }
        self.head = 0;
        self.tail = 0;
    }

    /// Iterate from front to back
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            queue: self,
            pos: self.head,
            remaining: self.len(),
        }
    }
}

impl<T> Default for CircularQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for CircularQueue<T> {
    fn drop(&mut self) {
        self.clear();
        self.release();
    }
}

/// Front-to-back iterator over a [`CircularQueue`]
pub struct Iter<'a, T> {
    queue: &'a CircularQueue<T>,
    pos: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let item = unsafe { &*self.queue.buffer.as_ptr().add(self.pos) };
        self.pos = (self.pos + 1) & self.queue.mask();
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a CircularQueue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> FromIterator<T> for CircularQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        for item in iter {
            if let Err(e) = queue.enqueue(item) {
                panic!("CircularQueue collect failed: {}", e);
            }
        }
        queue
    }
}

impl<T: Clone> Clone for CircularQueue<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for CircularQueue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: fmt::Debug> fmt::Debug for CircularQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// Safety: the queue uniquely owns its elements
unsafe impl<T: Send> Send for CircularQueue<T> {}
unsafe impl<T: Sync> Sync for CircularQueue<T> {}

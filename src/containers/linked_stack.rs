//! LinkedStack: singly-linked LIFO

use crate::dsa_violation;
use crate::error::{DsaError, Result};
use std::fmt;

struct Cell<T> {
    value: T,
    next: Option<Box<Cell<T>>>,
}

/// Owning singly-linked stack
///
/// Each cell is owned by the one above it. Teardown is iterative, so very
/// deep stacks do not overflow the call stack when dropped.
///
/// # Examples
///
/// ```rust
/// use dsakit::LinkedStack;
///
/// let mut stack: LinkedStack<i32> = [1, 2, 3].into_iter().collect();
/// assert_eq!(*stack.peek()?, 3);
/// assert_eq!(stack.pop()?, 3);
/// assert_eq!(stack.len(), 2);
/// # Ok::<(), dsakit::DsaError>(())
/// ```
pub struct LinkedStack<T> {
    top: Option<Box<Cell<T>>>,
    len: usize,
}

impl<T> LinkedStack<T> {
    /// Empty stack
    pub fn new() -> Self {
        Self { top: None, len: 0 }
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the stack holds nothing
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.top.is_none()
    }

    /// Push onto the top
    pub fn push(&mut self, value: T) {
        let next = self.top.take();
        self.top = Some(Box::new(Cell { value, next }));
        self.len += 1;
    }

    /// Remove and return the top element
    ///
    /// # Errors
    ///
    /// `EmptyContainer` if the stack is empty.
    pub fn pop(&mut self) -> Result<T> {
        let cell = self
            .top
            .take()
            .ok_or_else(|| dsa_violation!(DsaError::empty_container("LinkedStack", "pop")))?;
        let Cell { value, next } = *cell;
        self.top = next;
        self.len -= 1;
        Ok(value)
    }

    /// Top element
    pub fn peek(&self) -> Result<&T> {
        self.top
            .as_ref()
            .map(|cell| &cell.value)
            .ok_or_else(|| dsa_violation!(DsaError::empty_container("LinkedStack", "peek")))
    }

    /// Mutable top element
    pub fn peek_mut(&mut self) -> Result<&mut T> {
        self.top
            .as_mut()
            .map(|cell| &mut cell.value)
            .ok_or_else(|| dsa_violation!(DsaError::empty_container("LinkedStack", "peek")))
    }

    /// Release the whole chain
    pub fn clear(&mut self) {
        let mut link = self.top.take();
        while let Some(mut cell) = link {
            link = cell.next.take();
        }
        self.len = 0;
    }

    /// Iterate from top to bottom
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.top.as_deref(),
        }
    }
}

impl<T> Default for LinkedStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for LinkedStack<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Top-to-bottom iterator over a [`LinkedStack`]
pub struct Iter<'a, T> {
    next: Option<&'a Cell<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.next.map(|cell| {
            self.next = cell.next.as_deref();
            &cell.value
        })
    }
}

impl<'a, T> IntoIterator for &'a LinkedStack<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Items are pushed in order, so the last one ends on top
impl<T> FromIterator<T> for LinkedStack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut stack = Self::new();
        for item in iter {
            stack.push(item);
        }
        stack
    }
}

impl<T: Clone> Clone for LinkedStack<T> {
    fn clone(&self) -> Self {
        // rebuild bottom-up through a tail cursor to keep the order
        let mut copy = Self::new();
        let mut tail = &mut copy.top;
        for value in self.iter() {
            let cell = tail.insert(Box::new(Cell {
                value: value.clone(),
                next: None,
            }));
            tail = &mut cell.next;
        }
        copy.len = self.len;
        copy
    }
}

impl<T: PartialEq> PartialEq for LinkedStack<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

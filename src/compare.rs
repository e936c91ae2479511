//! Comparator strategies
//!
//! Containers and algorithms take an injected [`Comparator`] instead of
//! requiring `Ord`. [`NaturalOrder`] is the default; any
//! `Fn(&T, &T) -> Ordering` closure works as well.

use std::cmp::Ordering;

/// Three-way ordering strategy over `T`
pub trait Comparator<T: ?Sized> {
    /// Compare `a` against `b`
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// `a` orders strictly before `b`
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    /// `a` and `b` are equivalent under this ordering
    #[inline]
    fn equal(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Equal
    }
}

/// The element type's own `Ord` implementation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Reverses the wrapped comparator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reverse<C>(pub C);

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for Reverse<C> {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(b, a)
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_order() {
        assert!(NaturalOrder.less(&1, &2));
        assert!(!NaturalOrder.less(&2, &2));
        assert!(NaturalOrder.equal(&"a", &"a"));
    }

    #[test]
    fn test_reverse() {
        let rev = Reverse(NaturalOrder);
        assert!(rev.less(&5, &1));
        assert_eq!(rev.compare(&1, &1), Ordering::Equal);
    }

    #[test]
    fn test_closure() {
        let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
        assert!(by_len.less(&"ab", &"abc"));
        assert!(by_len.equal(&"ab", &"cd"));
    }
}

//! OrderedSet: unbalanced binary search tree
//!
//! Nodes live in a dense arena and refer to each other by index. Every node
//! keeps the index of its parent, so in-order successor and predecessor are
//! found by walking up the tree instead of keeping a traversal stack.
//! Removing a node detaches it with the transplant primitive and then
//! compacts the arena by moving the last node into the freed slot.
//!
//! The tree is never rebalanced; sorted insertion order degrades it to a
//! list. [`height`](OrderedSet::height) and
//! [`is_balanced`](OrderedSet::is_balanced) report the current shape.

use crate::compare::{Comparator, NaturalOrder};
use crate::containers::DynamicArray;
use crate::error::Result;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, BitAnd, BitOr, Sub, SubAssign};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeId(usize);

#[derive(Clone)]
struct Node<T> {
    value: T,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// Set of unique values kept in comparator order
///
/// # Examples
///
/// ```rust
/// use dsakit::OrderedSet;
///
/// let set: OrderedSet<i32> = [5, 3, 8, 1, 4].into_iter().collect();
/// assert_eq!(set.min(), Some(&1));
/// assert_eq!(set.max(), Some(&8));
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 3, 4, 5, 8]);
/// ```
#[derive(Clone)]
pub struct OrderedSet<T, C = NaturalOrder> {
    nodes: DynamicArray<Node<T>>,
    root: Option<NodeId>,
    cmp: C,
}

impl<T: Ord> OrderedSet<T, NaturalOrder> {
    /// Empty set in natural order
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T: Ord> Default for OrderedSet<T, NaturalOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Comparator<T>> OrderedSet<T, C> {
    /// Empty set ordered by `cmp`
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            nodes: DynamicArray::new(),
            root: None,
            cmp,
        }
    }

    /// Number of values
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the set holds nothing
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Remove every value
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// The comparator ordering this set
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    #[inline]
    fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.0]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.nodes[id.0]
    }

    fn find(&self, value: &T) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id);
            current = match self.cmp.compare(value, &node.value) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.node(id).left {
            id = left;
        }
        id
    }

    fn rightmost(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.node(id).right {
            id = right;
        }
        id
    }

    fn next_node(&self, id: NodeId) -> Option<NodeId> {
        if let Some(right) = self.node(id).right {
            return Some(self.leftmost(right));
        }
        let mut child = id;
        let mut parent = self.node(id).parent;
        while let Some(p) = parent {
            if self.node(p).right != Some(child) {
                break;
            }
            child = p;
            parent = self.node(p).parent;
        }
        parent
    }

    fn prev_node(&self, id: NodeId) -> Option<NodeId> {
        if let Some(left) = self.node(id).left {
            return Some(self.rightmost(left));
        }
        let mut child = id;
        let mut parent = self.node(id).parent;
        while let Some(p) = parent {
            if self.node(p).left != Some(child) {
                break;
            }
            child = p;
            parent = self.node(p).parent;
        }
        parent
    }

    /// Insert `value`; returns `false` and leaves the set untouched if an
    /// equivalent value is already present
    ///
    /// # Errors
    ///
    /// `AllocationFailure` if the node arena cannot grow.
    pub fn insert(&mut self, value: T) -> Result<bool> {
        let mut parent = None;
        let mut went_left = false;
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id);
            parent = Some(id);
            match self.cmp.compare(&value, &node.value) {
                Ordering::Less => {
                    went_left = true;
                    current = node.left;
                }
                Ordering::Greater => {
                    went_left = false;
                    current = node.right;
                }
                Ordering::Equal => return Ok(false),
            }
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            value,
            parent,
            left: None,
            right: None,
        })?;
        match parent {
            None => self.root = Some(id),
            Some(p) if went_left => self.node_mut(p).left = Some(id),
            Some(p) => self.node_mut(p).right = Some(id),
        }
        Ok(true)
    }

    /// Put `substitute` where `target` hangs from its parent
    fn transplant(&mut self, target: NodeId, substitute: Option<NodeId>) {
        let parent = self.node(target).parent;
        match parent {
            None => self.root = substitute,
            Some(p) if self.node(p).left == Some(target) => self.node_mut(p).left = substitute,
            Some(p) => self.node_mut(p).right = substitute,
        }
        if let Some(s) = substitute {
            self.node_mut(s).parent = parent;
        }
    }

    /// Remove the value equivalent to `value`; returns `false` if absent
    pub fn remove(&mut self, value: &T) -> bool {
        match self.find(value) {
            Some(id) => {
                self.unlink(id);
                true
            }
            None => false,
        }
    }

    /// Detach node `z` from the tree and drop it
    fn unlink(&mut self, z: NodeId) {
        let (left, right) = {
            let node = self.node(z);
            (node.left, node.right)
        };
        match (left, right) {
            (None, _) => self.transplant(z, right),
            (_, None) => self.transplant(z, left),
            (Some(l), Some(r)) => {
                let y = self.leftmost(r);
                if y != r {
                    let y_right = self.node(y).right;
                    self.transplant(y, y_right);
                    self.node_mut(y).right = Some(r);
                    self.node_mut(r).parent = Some(y);
                }
                self.transplant(z, Some(y));
                self.node_mut(y).left = Some(l);
                self.node_mut(l).parent = Some(y);
            }
        }
        self.release(z);
    }

    /// Drop a detached node, moving the last arena node into its slot
    fn release(&mut self, z: NodeId) {
        let last = NodeId(self.nodes.len() - 1);
        // z is detached, so nothing points at it any more
        self.nodes.swap(z.0, last.0);
        self.nodes.truncate(last.0);
        if z == last {
            return;
        }
        let (parent, left, right) = {
            let moved = self.node(z);
            (moved.parent, moved.left, moved.right)
        };
        match parent {
            None => self.root = Some(z),
            Some(p) => {
                let parent_node = self.node_mut(p);
                if parent_node.left == Some(last) {
                    parent_node.left = Some(z);
                } else {
                    parent_node.right = Some(z);
                }
            }
        }
        for child in [left, right].into_iter().flatten() {
            self.node_mut(child).parent = Some(z);
        }
    }

    /// True when an equivalent value is present
    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// Smallest value
    pub fn min(&self) -> Option<&T> {
        self.root.map(|r| &self.node(self.leftmost(r)).value)
    }

    /// Largest value
    pub fn max(&self) -> Option<&T> {
        self.root.map(|r| &self.node(self.rightmost(r)).value)
    }

    /// Smallest value ordering strictly after `value`
    ///
    /// `value` need not be in the set.
    pub fn successor(&self, value: &T) -> Option<&T> {
        if let Some(id) = self.find(value) {
            return self.next_node(id).map(|n| &self.node(n).value);
        }
        let mut best = None;
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id);
            if self.cmp.less(value, &node.value) {
                best = Some(&node.value);
                current = node.left;
            } else {
                current = node.right;
            }
        }
        best
    }

    /// Largest value ordering strictly before `value`
    ///
    /// `value` need not be in the set.
    pub fn predecessor(&self, value: &T) -> Option<&T> {
        if let Some(id) = self.find(value) {
            return self.prev_node(id).map(|n| &self.node(n).value);
        }
        let mut best = None;
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id);
            if self.cmp.less(&node.value, value) {
                best = Some(&node.value);
                current = node.right;
            } else {
                current = node.left;
            }
        }
        best
    }

    /// In-order iterator; `.rev()` walks from the largest value down
    pub fn iter(&self) -> Iter<'_, T, C> {
        Iter {
            set: self,
            front: self.root.map(|r| self.leftmost(r)),
            back: self.root.map(|r| self.rightmost(r)),
            remaining: self.len(),
        }
    }

    /// Every value of `self` is in `other`
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.len() <= other.len() && self.iter().all(|v| other.contains(v))
    }

    /// Every value of `other` is in `self`
    pub fn is_superset_of(&self, other: &Self) -> bool {
        other.is_subset_of(self)
    }

    /// Insert every value of `other`
    pub fn union_with(&mut self, other: &Self) -> Result<()>
    where
        T: Clone,
    {
        for value in other.iter() {
            self.insert(value.clone())?;
        }
        Ok(())
    }

    /// Keep only values also in `other`
    pub fn intersect_with(&mut self, other: &Self) -> Result<()>
    where
        T: Clone,
        C: Clone,
    {
        *self = self.intersection(other)?;
        Ok(())
    }

    /// Remove every value of `other`
    pub fn difference_with(&mut self, other: &Self) {
        for value in other.iter() {
            self.remove(value);
        }
    }

    /// Values in either set
    pub fn union(&self, other: &Self) -> Result<Self>
    where
        T: Clone,
        C: Clone,
    {
        let mut out = self.clone();
        out.union_with(other)?;
        Ok(out)
    }

    /// Values in both sets
    pub fn intersection(&self, other: &Self) -> Result<Self>
    where
        T: Clone,
        C: Clone,
    {
        let mut out = Self::with_comparator(self.cmp.clone());
        for value in self.iter().filter(|v| other.contains(v)) {
            out.insert(value.clone())?;
        }
        Ok(out)
    }

    /// Values in `self` but not in `other`
    pub fn difference(&self, other: &Self) -> Result<Self>
    where
        T: Clone,
        C: Clone,
    {
        let mut out = self.clone();
        out.difference_with(other);
        Ok(out)
    }

    /// Height of every node, indexed like the arena; leaves have height 0
    fn node_heights(&self) -> Vec<isize> {
        let mut heights = vec![-1isize; self.len()];
        let Some(root) = self.root else {
            return heights;
        };
        // iterative post-order: a node is finished once both children are
        let mut stack = vec![(root, false)];
        while let Some((id, children_done)) = stack.pop() {
            let node = self.node(id);
            if children_done {
                let h = |c: Option<NodeId>| c.map_or(-1, |c| heights[c.0]);
                let height = 1 + h(node.left).max(h(node.right));
                heights[id.0] = height;
            } else {
                stack.push((id, true));
                stack.extend(node.left.map(|l| (l, false)));
                stack.extend(node.right.map(|r| (r, false)));
            }
        }
        heights
    }

    /// Edges on the longest root-to-leaf path; `None` for the empty set
    pub fn height(&self) -> Option<usize> {
        let root = self.root?;
        Some(self.node_heights()[root.0] as usize)
    }

    /// True when no node's subtrees differ in height by more than one
    pub fn is_balanced(&self) -> bool {
        let heights = self.node_heights();
        let h = |c: Option<NodeId>| c.map_or(-1, |c| heights[c.0]);
        self.nodes
            .iter()
            .all(|node| (h(node.left) - h(node.right)).abs() <= 1)
    }
}

/// In-order iterator over an [`OrderedSet`]
pub struct Iter<'a, T, C> {
    set: &'a OrderedSet<T, C>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<'a, T, C: Comparator<T>> Iterator for Iter<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        self.remaining -= 1;
        self.front = self.set.next_node(id);
        Some(&self.set.node(id).value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, C: Comparator<T>> DoubleEndedIterator for Iter<'a, T, C> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        self.remaining -= 1;
        self.back = self.set.prev_node(id);
        Some(&self.set.node(id).value)
    }
}

impl<T, C: Comparator<T>> ExactSizeIterator for Iter<'_, T, C> {}

impl<'a, T, C: Comparator<T>> IntoIterator for &'a OrderedSet<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, C>;

    fn into_iter(self) -> Iter<'a, T, C> {
        self.iter()
    }
}

impl<T: Ord> FromIterator<T> for OrderedSet<T, NaturalOrder> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            if let Err(e) = set.insert(value) {
                panic!("OrderedSet collect failed: {}", e);
            }
        }
        set
    }
}

impl<T, C: Comparator<T>> PartialEq for OrderedSet<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| self.cmp.equal(a, b))
    }
}

impl<T: fmt::Debug, C: Comparator<T>> fmt::Debug for OrderedSet<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

fn expect_alloc<T>(result: Result<T>, operation: &str) -> T {
    match result {
        Ok(value) => value,
        Err(e) => panic!("OrderedSet {} failed: {}", operation, e),
    }
}

impl<T: Clone, C: Comparator<T> + Clone> BitOr<&OrderedSet<T, C>> for &OrderedSet<T, C> {
    type Output = OrderedSet<T, C>;

    fn bitor(self, rhs: &OrderedSet<T, C>) -> OrderedSet<T, C> {
        expect_alloc(self.union(rhs), "union")
    }
}

impl<T: Clone, C: Comparator<T> + Clone> BitAnd<&OrderedSet<T, C>> for &OrderedSet<T, C> {
    type Output = OrderedSet<T, C>;

    fn bitand(self, rhs: &OrderedSet<T, C>) -> OrderedSet<T, C> {
        expect_alloc(self.intersection(rhs), "intersection")
    }
}

impl<T: Clone, C: Comparator<T> + Clone> Sub<&OrderedSet<T, C>> for &OrderedSet<T, C> {
    type Output = OrderedSet<T, C>;

    fn sub(self, rhs: &OrderedSet<T, C>) -> OrderedSet<T, C> {
        expect_alloc(self.difference(rhs), "difference")
    }
}

impl<T, C: Comparator<T>> Add<T> for OrderedSet<T, C> {
    type Output = OrderedSet<T, C>;

    fn add(mut self, value: T) -> OrderedSet<T, C> {
        self += value;
        self
    }
}

impl<T, C: Comparator<T>> Sub<T> for OrderedSet<T, C> {
    type Output = OrderedSet<T, C>;

    fn sub(mut self, value: T) -> OrderedSet<T, C> {
        self.remove(&value);
        self
    }
}

impl<T, C: Comparator<T>> AddAssign<T> for OrderedSet<T, C> {
    fn add_assign(&mut self, value: T) {
        expect_alloc(self.insert(value), "insert");
    }
}

impl<T, C: Comparator<T>> SubAssign<T> for OrderedSet<T, C> {
    fn sub_assign(&mut self, value: T) {
        self.remove(&value);
    }
}

impl<T: Clone, C: Comparator<T>> AddAssign<&OrderedSet<T, C>> for OrderedSet<T, C> {
    fn add_assign(&mut self, rhs: &OrderedSet<T, C>) {
        expect_alloc(self.union_with(rhs), "union");
    }
}

impl<T, C: Comparator<T>> SubAssign<&OrderedSet<T, C>> for OrderedSet<T, C> {
    fn sub_assign(&mut self, rhs: &OrderedSet<T, C>) {
        self.difference_with(rhs);
    }
}

//! Tree-based collections
//!
//! - **`OrderedSet<T, C>`** - unbalanced binary search tree with parent links and set algebra

pub mod ordered_set;

pub use ordered_set::OrderedSet;

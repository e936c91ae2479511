//! # dsakit: Generic Containers and Sorting Algorithms
//!
//! This crate provides a small, self-contained library of classic data
//! structures and algorithms over arbitrary element types, with explicit
//! error values for every contract violation.
//!
//! ## Key Features
//!
//! - **Dynamic Array**: growable contiguous storage with positional insert/remove,
//!   concatenation and in-place sorting
//! - **Hash Table**: byte-string keys, open addressing with djb2 hashing and
//!   backward-shift deletion
//! - **Ordered Set**: binary search tree with successor/predecessor queries and
//!   set algebra
//! - **Binary Heap**: priority queue over an injected comparator
//! - **Queue and Stack**: ring-buffer FIFO and linked LIFO
//! - **Sorting Toolkit**: randomized, median-of-three and three-way quicksort,
//!   stable mergesort, counting and LSD radix sort, selection, inversion
//!   counting and shuffling
//! - **Deterministic RNG**: PCG generators for reproducible pivots and shuffles
//! - **Violation Reporting**: every rejected operation is logged and forwarded
//!   to an optional process-wide sink
//!
//! ## Quick Start
//!
//! ```rust
//! use dsakit::{
//!     BinaryHeap, CircularQueue, DynamicArray, HashTable, LinkedStack, OrderedSet,
//! };
//! use dsakit::algorithms::{counting_sort, quick_select, Sorter};
//! use dsakit::compare::NaturalOrder;
//!
//! // Growable array with positional editing
//! let mut array = DynamicArray::new();
//! for value in [5, 3, 9, 1] {
//!     array.push(value).unwrap();
//! }
//! array.insert(1, 7).unwrap();
//! array.sort();
//! assert_eq!(array.as_slice(), &[1, 3, 5, 7, 9]);
//!
//! // Byte-string keyed hash table
//! let mut table = HashTable::new();
//! table.insert("alpha", 1).unwrap();
//! table.insert("beta", 2).unwrap();
//! assert_eq!(*table.get("beta").unwrap(), 2);
//! assert!(table.get("gamma").is_err());
//!
//! // Ordered set with neighbour queries
//! let set: OrderedSet<i32> = [40, 10, 30, 20].into_iter().collect();
//! assert_eq!(set.successor(&20), Some(&30));
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![10, 20, 30, 40]);
//!
//! // Min-heap under the natural order
//! let mut heap = BinaryHeap::new();
//! heap.insert(8).unwrap();
//! heap.insert(2).unwrap();
//! assert_eq!(heap.extract().unwrap(), 2);
//!
//! // FIFO and LIFO
//! let mut queue = CircularQueue::new();
//! queue.enqueue('a').unwrap();
//! assert_eq!(queue.dequeue().unwrap(), 'a');
//! let mut stack = LinkedStack::new();
//! stack.push("top");
//! assert_eq!(*stack.peek().unwrap(), "top");
//!
//! // Sorting toolkit
//! let mut data = [4u32, 0, 3, 3, 1];
//! counting_sort(&mut data, 4).unwrap();
//! assert_eq!(data, [0, 1, 3, 3, 4]);
//!
//! let mut sorter = Sorter::new();
//! let mut words = ["pear", "fig", "apple"];
//! sorter.sort(&mut words, &NaturalOrder);
//! assert_eq!(words, ["apple", "fig", "pear"]);
//!
//! let mut rng = dsakit::Random64::new();
//! let mut values = [9, 4, 7, 1];
//! assert_eq!(*quick_select(&mut values, 1, &NaturalOrder, &mut rng).unwrap(), 4);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod algorithms;
pub mod compare;
pub mod config;
pub mod containers;
pub mod error;
pub mod error_report;
pub mod hash_map;
pub mod random;
pub mod tree;

// Re-export core types
pub use compare::{Comparator, NaturalOrder, Reverse};
pub use containers::{BinaryHeap, CircularQueue, DynamicArray, LinkedStack};
pub use error::{DsaError, Result};
pub use hash_map::HashTable;
pub use random::{Pcg32, Random64};
pub use tree::OrderedSet;

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize dsakit
///
/// Only emits a debug log line today; containers need no global setup.
pub fn init() {
    log::debug!("Initializing dsakit v{}", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_functionality() {
        init();
        let mut array = DynamicArray::new();
        array.push(1u8).unwrap();
        assert_eq!(array.len(), 1);
    }

    #[test]
    fn test_version_info() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
        // Version should be semver format like "0.1.0"
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2);
    }

    #[test]
    fn test_reexports_resolve() {
        let _: HashTable<u32> = HashTable::new();
        let _: OrderedSet<u32, Reverse<NaturalOrder>> =
            OrderedSet::with_comparator(Reverse(NaturalOrder));
        let _ = Random64::new();
        let err: DsaError = DsaError::out_of_range(1, 0);
        assert_eq!(err.category(), "range");
    }
}

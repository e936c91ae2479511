//! End-to-end usage scenarios across the public containers
//!
//! Each test drives a container only through its public API, the way a
//! downstream crate would.

use dsakit::compare::{NaturalOrder, Reverse};
use dsakit::error_report::{self, ViolationReport};
use dsakit::{
    BinaryHeap, CircularQueue, DsaError, DynamicArray, HashTable, LinkedStack, OrderedSet,
};
use std::sync::{Arc, Mutex};

// =============================================================================
// HASH TABLE
// =============================================================================

#[test]
fn test_hash_table_insert_lookup_remove() {
    let mut table = HashTable::new();
    table.insert("a", 1).unwrap();
    table.insert("b", 2).unwrap();
    table.insert("c", 3).unwrap();

    assert!(table.contains("b"));
    assert_eq!(*table.get("b").unwrap(), 2);

    assert_eq!(table.remove("a"), Some(1));
    assert!(!table.contains("a"));
    assert!(table.contains("c"));
    assert_eq!(table.len(), 2);
}

#[test]
fn test_hash_table_missing_key_is_an_error() {
    let table: HashTable<u8> = HashTable::new();
    match table.get("nope") {
        Err(DsaError::KeyNotFound { key }) => assert_eq!(key, "nope"),
        other => panic!("unexpected result: {:?}", other.map(|v| *v)),
    }
}

#[test]
fn test_hash_table_survives_mass_churn() {
    let mut table = HashTable::with_capacity(4).unwrap();
    for i in 0..2_000u32 {
        table.insert(i.to_le_bytes(), i).unwrap();
    }
    for i in (0..2_000u32).filter(|i| i % 3 != 0) {
        assert_eq!(table.remove(i.to_le_bytes()), Some(i));
    }
    for i in 0..2_000u32 {
        assert_eq!(table.contains(i.to_le_bytes()), i % 3 == 0, "key {}", i);
    }
    assert!(table.load_factor() < 0.5);
}

#[test]
fn test_hash_table_counts_words() {
    let text = "the quick brown fox jumps over the lazy dog the end";
    let mut table: HashTable<u32> = HashTable::new();
    for word in text.split_whitespace() {
        *table.entry_or_default(word).unwrap() += 1;
    }
    assert_eq!(*table.get("the").unwrap(), 3);
    assert_eq!(*table.get("fox").unwrap(), 1);
    assert_eq!(table.len(), 9);
}

// =============================================================================
// BINARY HEAP
// =============================================================================

#[test]
fn test_min_heap_extract_order() {
    let heap_input = DynamicArray::from_slice(&[5, 1, 4, 2, 8]).unwrap();
    let mut heap = BinaryHeap::from_array(heap_input, NaturalOrder);

    let mut drained = Vec::new();
    while !heap.is_empty() {
        drained.push(heap.extract().unwrap());
    }
    assert_eq!(drained, vec![1, 2, 4, 5, 8]);
}

#[test]
fn test_max_heap_with_reverse_order() {
    let mut heap = BinaryHeap::with_comparator(Reverse(NaturalOrder));
    for v in [5, 1, 4, 2, 8] {
        heap.insert(v).unwrap();
    }
    assert_eq!(*heap.peek().unwrap(), 8);
    heap.extract().unwrap();
    heap.extract().unwrap();
    assert_eq!(heap.len(), 3);
    assert_eq!(heap.extract().unwrap(), 4);
}

#[test]
fn test_heap_as_task_scheduler() {
    let by_priority = |a: &(u8, &'static str), b: &(u8, &'static str)| a.0.cmp(&b.0);
    let mut heap: BinaryHeap<(u8, &'static str), _> = BinaryHeap::with_comparator(by_priority);
    heap.insert((3, "write report")).unwrap();
    heap.insert((1, "fix outage")).unwrap();
    heap.insert((2, "review patch")).unwrap();

    assert_eq!(heap.extract().unwrap().1, "fix outage");
    assert_eq!(heap.extract().unwrap().1, "review patch");
    assert_eq!(heap.extract().unwrap().1, "write report");
    assert!(matches!(
        heap.extract(),
        Err(DsaError::EmptyContainer { .. })
    ));
}

// =============================================================================
// ORDERED SET
// =============================================================================

#[test]
fn test_ordered_set_min_max_and_order() {
    let set: OrderedSet<i32> = [5, 3, 8, 1, 4].into_iter().collect();
    assert_eq!(set.min(), Some(&1));
    assert_eq!(set.max(), Some(&8));
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 3, 4, 5, 8]);
    assert_eq!(set.iter().rev().copied().collect::<Vec<_>>(), vec![8, 5, 4, 3, 1]);
}

#[test]
fn test_ordered_set_algebra() {
    let a: OrderedSet<i32> = (0..10).collect();
    let b: OrderedSet<i32> = (5..15).collect();

    let union = &a | &b;
    let both = &a & &b;
    let only_a = &a - &b;

    assert_eq!(union.len(), 15);
    assert_eq!(both.iter().copied().collect::<Vec<_>>(), vec![5, 6, 7, 8, 9]);
    assert_eq!(only_a.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
    assert!(union.is_superset_of(&a));
    assert!(both.is_subset_of(&b));
}

#[test]
fn test_ordered_set_neighbours_after_removal() {
    let mut set: OrderedSet<i32> = [50, 30, 70, 20, 40, 60, 80].into_iter().collect();
    assert!(set.remove(&50));
    assert!(!set.remove(&50));
    assert_eq!(set.successor(&40), Some(&60));
    assert_eq!(set.predecessor(&60), Some(&40));
    assert_eq!(set.successor(&80), None);
    assert_eq!(set.len(), 6);
}

// =============================================================================
// DYNAMIC ARRAY
// =============================================================================

#[test]
fn test_dynamic_array_sorting() {
    let mut array = DynamicArray::from_slice(&[3, 1, 2]).unwrap();
    array.sort();
    assert_eq!(array.as_slice(), &[1, 2, 3]);

    let mut pairs = DynamicArray::from_slice(&[(1, "a"), (1, "b"), (2, "c")]).unwrap();
    pairs
        .stable_sort_by(&|x: &(i32, &str), y: &(i32, &str)| y.0.cmp(&x.0))
        .unwrap();
    assert_eq!(pairs.as_slice(), &[(2, "c"), (1, "a"), (1, "b")]);
    pairs
        .stable_sort_by(&|x: &(i32, &str), y: &(i32, &str)| x.0.cmp(&y.0))
        .unwrap();
    assert_eq!(pairs.as_slice(), &[(1, "a"), (1, "b"), (2, "c")]);
}

#[test]
fn test_dynamic_array_positional_editing() {
    let mut array: DynamicArray<char> = "abcdef".chars().collect();
    assert_eq!(array.remove(1).unwrap(), 'b');
    array.insert(0, 'z').unwrap();
    assert_eq!(array.swap_remove(0).unwrap(), 'z');
    assert_eq!(array.len(), 5);
    assert!(array.insert(9, 'q').is_err());

    let tail = array.sub_array_from(3).unwrap();
    assert_eq!(tail.len(), 2);

    let joined = &array + &tail;
    assert_eq!(joined.len(), 7);
}

#[test]
fn test_moved_from_array_is_empty_and_reusable() {
    let mut array = DynamicArray::from_slice(&[1, 2, 3]).unwrap();
    let taken = std::mem::take(&mut array);
    assert_eq!(taken.len(), 3);
    assert!(array.is_empty());
    array.push(9).unwrap();
    assert_eq!(array.as_slice(), &[9]);
}

// =============================================================================
// QUEUE AND STACK
// =============================================================================

#[test]
fn test_queue_preserves_order_across_growth() {
    let mut queue = CircularQueue::new();
    queue.enqueue(0).unwrap();
    let initial_capacity = queue.capacity();

    for i in 1..100 {
        queue.enqueue(i).unwrap();
    }
    assert!(queue.capacity() > initial_capacity);

    let drained: Vec<i32> = (0..100).map(|_| queue.dequeue().unwrap()).collect();
    assert_eq!(drained, (0..100).collect::<Vec<_>>());
    assert!(queue.is_empty());
}

#[test]
fn test_queue_interleaved_wraparound() {
    let mut queue = CircularQueue::with_capacity(3).unwrap();
    let mut expected = std::collections::VecDeque::new();
    for round in 0..50 {
        queue.enqueue(round).unwrap();
        expected.push_back(round);
        if round % 3 == 2 {
            assert_eq!(queue.dequeue().unwrap(), expected.pop_front().unwrap());
        }
    }
    assert_eq!(
        queue.iter().copied().collect::<Vec<_>>(),
        expected.into_iter().collect::<Vec<_>>()
    );
}

#[test]
fn test_stack_balanced_brackets() {
    fn balanced(input: &str) -> bool {
        let mut stack = LinkedStack::new();
        for c in input.chars() {
            match c {
                '(' | '[' => stack.push(c),
                ')' => {
                    if stack.pop().ok() != Some('(') {
                        return false;
                    }
                }
                ']' => {
                    if stack.pop().ok() != Some('[') {
                        return false;
                    }
                }
                _ => {}
            }
        }
        stack.is_empty()
    }

    assert!(balanced("([a](b))"));
    assert!(!balanced("([)]"));
    assert!(!balanced("(("));
    assert!(!balanced(")"));
}

// =============================================================================
// VIOLATION REPORTING
// =============================================================================

#[test]
fn test_violations_reach_installed_sink() {
    let seen: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));
    let sink_seen = seen.clone();
    error_report::set_violation_sink(Box::new(move |report: &ViolationReport| {
        sink_seen.lock().unwrap().push(report.kind);
    }));

    let array: DynamicArray<u8> = DynamicArray::new();
    assert!(array.get(3).is_err());
    let mut queue: CircularQueue<u8> = CircularQueue::new();
    assert!(queue.dequeue().is_err());

    error_report::clear_violation_sink();
    let kinds = seen.lock().unwrap().clone();
    assert!(kinds.contains(&"range"));
    assert!(kinds.contains(&"empty"));
}

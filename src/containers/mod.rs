//! Container types
//!
//! - **`DynamicArray<T>`** - contiguous growable array with explicit capacity control
//! - **`CircularQueue<T>`** - ring-buffer FIFO with power-of-two doubling
//! - **`LinkedStack<T>`** - singly-linked LIFO
//! - **`BinaryHeap<T, C>`** - priority queue layered on `DynamicArray`

pub mod binary_heap;
pub mod circular_queue;
pub mod dynamic_array;
pub mod linked_stack;

pub use binary_heap::BinaryHeap;
pub use circular_queue::CircularQueue;
pub use dynamic_array::DynamicArray;
pub use linked_stack::LinkedStack;

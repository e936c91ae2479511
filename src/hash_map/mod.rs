//! Hash table keyed by byte strings
//!
//! - `HashTable<V>`: open addressing with linear probing, djb2 hashing and
//!   backward-shift deletion
//! - `djb2` / `Djb2Hasher`: the hash function, also usable with std maps

mod hash_functions;
mod hash_table;

pub use hash_functions::{djb2, BuildDjb2Hasher, Djb2Hasher, DJB2_MULTIPLIER, DJB2_SEED};
pub use hash_table::{HashTable, Iter};

//! Byte-string hash functions
//!
//! ```rust
//! use dsakit::hash_map::djb2;
//!
//! assert_eq!(djb2(b""), 5381);
//! assert_eq!(djb2(b"a"), 5381 * 33 + 97);
//! ```

use std::hash::{BuildHasherDefault, Hasher};

/// Initial value of the djb2 accumulator
pub const DJB2_SEED: u64 = 5381;

/// Multiplier applied per byte
pub const DJB2_MULTIPLIER: u64 = 33;

/// Bernstein's multiplicative rolling hash: `h = h * 33 + byte` from 5381
#[inline]
pub fn djb2(bytes: &[u8]) -> u64 {
    bytes.iter().fold(DJB2_SEED, |hash, &b| {
        hash.wrapping_mul(DJB2_MULTIPLIER).wrapping_add(b as u64)
    })
}

/// [`Hasher`] adapter over [`djb2`], for use with std collections
#[derive(Debug, Clone, Copy)]
pub struct Djb2Hasher {
    hash: u64,
}

impl Default for Djb2Hasher {
    fn default() -> Self {
        Self { hash: DJB2_SEED }
    }
}

impl Hasher for Djb2Hasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.hash = self.hash.wrapping_mul(DJB2_MULTIPLIER).wrapping_add(b as u64);
        }
    }
}

/// `BuildHasher` producing [`Djb2Hasher`]s
pub type BuildDjb2Hasher = BuildHasherDefault<Djb2Hasher>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_djb2_known_values() {
        assert_eq!(djb2(b""), 5381);
        assert_eq!(djb2(b"ab"), (5381 * 33 + 97) * 33 + 98);
        assert_ne!(djb2(b"ab"), djb2(b"ba"));
    }

    #[test]
    fn test_djb2_wraps() {
        let long = vec![0xffu8; 4096];
        // must not overflow-panic in debug builds
        let _ = djb2(&long);
    }

    #[test]
    fn test_hasher_matches_function() {
        let mut hasher = Djb2Hasher::default();
        hasher.write(b"hello");
        assert_eq!(hasher.finish(), djb2(b"hello"));
    }

    #[test]
    fn test_build_hasher_with_std_map() {
        let mut map: HashMap<&str, i32, BuildDjb2Hasher> = HashMap::default();
        map.insert("x", 1);
        map.insert("y", 2);
        assert_eq!(map.get("y"), Some(&2));
    }
}

//! Fisher–Yates shuffle

use crate::random::Random64;

/// Uniformly permute `v` in place
///
/// Walks backward, swapping each position with a uniformly chosen position
/// at or before it. The permutation depends only on the generator state.
pub fn shuffle<T>(v: &mut [T], rng: &mut Random64) {
    for i in (1..v.len()).rev() {
        let j = rng.uniform_usize(i);
        v.swap(i, j);
    }
}

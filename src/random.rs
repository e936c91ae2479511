//! Seeded, reproducible pseudo-random generation
//!
//! [`Pcg32`] is the PCG-XSH-RR generator: a 64-bit multiplicative LCG state
//! update with an xorshift + random-rotate output function. [`Random64`]
//! pairs two `Pcg32` streams to produce 64-bit values and is the generator
//! consumed by [`shuffle`](crate::algorithms::shuffle) and the randomized
//! quicksort/quickselect pivots.
//!
//! Both implement [`rand::RngCore`], so they can drive anything in the
//! `rand` ecosystem while keeping fully reproducible sequences.

use crate::dsa_violation;
use crate::error::{DsaError, Result};
use rand::{RngCore, SeedableRng};

const PCG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;

/// Default state used by [`Random64::default`]
pub const DEFAULT_STATE: u64 = 0x853c_49e6_748f_ea9b;
/// Default stream selector used by [`Random64::default`]
pub const DEFAULT_SEQUENCE: u64 = 0xda3e_39cb_94b9_5bdb;

/// 32-bit PCG generator with a selectable stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pcg32 {
    state: u64,
    inc: u64,
}

impl Pcg32 {
    /// Seed with an initial state and a stream selector
    pub fn new(state: u64, sequence: u64) -> Self {
        let mut rng = Self {
            state: 0,
            inc: (sequence << 1) | 1,
        };
        rng.step();
        rng.state = rng.state.wrapping_add(state);
        rng.step();
        rng
    }

    #[inline]
    fn step(&mut self) {
        self.state = self
            .state
            .wrapping_mul(PCG_MULTIPLIER)
            .wrapping_add(self.inc);
    }

    /// Next uniformly distributed 32-bit value
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.step();
        let xorshifted = (((old >> 18) ^ old) >> 27) as u32;
        let rot = (old >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

/// 64-bit generator built from two independent [`Pcg32`] streams
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Random64 {
    high: Pcg32,
    low: Pcg32,
}

impl Random64 {
    /// Generator with the documented default seed
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_STATE, DEFAULT_SEQUENCE)
    }

    /// Generator seeded with an explicit `(state, sequence)` pair
    ///
    /// The two halves run on distinct streams; the low stream uses the
    /// complemented sequence so the halves never coincide.
    pub fn with_seed(state: u64, sequence: u64) -> Self {
        Self {
            high: Pcg32::new(state, sequence),
            low: Pcg32::new(state.rotate_left(32), !sequence),
        }
    }

    /// Next uniformly distributed 64-bit value
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let high = self.high.next_u32() as u64;
        let low = self.low.next_u32() as u64;
        (high << 32) | low
    }

    /// Uniform value in the inclusive range `[start, end]`
    ///
    /// Draws below `2^64 mod bound` are rejected so every value in the range
    /// is equally likely.
    ///
    /// # Errors
    ///
    /// `InvalidRange` if `start > end`.
    pub fn uniform(&mut self, start: u64, end: u64) -> Result<u64> {
        if start > end {
            return Err(dsa_violation!(DsaError::invalid_range(
                start as usize,
                end as usize,
                end as usize
            )));
        }
        let bound = (end - start).wrapping_add(1);
        if bound == 0 {
            // full 64-bit range
            return Ok(self.next_u64());
        }
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let r = self.next_u64();
            if r >= threshold {
                return Ok(start + r % bound);
            }
        }
    }

    /// Uniform index in `[0, upper]`
    pub fn uniform_usize(&mut self, upper: usize) -> usize {
        // start <= end always holds here
        self.uniform(0, upper as u64).map(|v| v as usize).unwrap_or(0)
    }
}

impl Default for Random64 {
    fn default() -> Self {
        Self::new()
    }
}

fn fill_from_u64(rng: &mut impl FnMut() -> u64, dest: &mut [u8]) {
    for chunk in dest.chunks_mut(8) {
        let bytes = rng().to_le_bytes();
        chunk.copy_from_slice(&bytes[..chunk.len()]);
    }
}

impl RngCore for Pcg32 {
    fn next_u32(&mut self) -> u32 {
        Pcg32::next_u32(self)
    }

    fn next_u64(&mut self) -> u64 {
        let high = Pcg32::next_u32(self) as u64;
        (high << 32) | Pcg32::next_u32(self) as u64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        fill_from_u64(&mut || RngCore::next_u64(self), dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl RngCore for Random64 {
    fn next_u32(&mut self) -> u32 {
        (Random64::next_u64(self) >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        Random64::next_u64(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        fill_from_u64(&mut || Random64::next_u64(self), dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Random64 {
    /// Little-endian `state` followed by little-endian `sequence`
    type Seed = [u8; 16];

    fn from_seed(seed: Self::Seed) -> Self {
        let mut state = [0u8; 8];
        let mut sequence = [0u8; 8];
        state.copy_from_slice(&seed[..8]);
        sequence.copy_from_slice(&seed[8..]);
        Self::with_seed(u64::from_le_bytes(state), u64::from_le_bytes(sequence))
    }
}

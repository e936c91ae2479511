//! Sorting, selection and shuffling algorithms
//!
//! Free functions operate on `&mut [T]` with an injected
//! [`Comparator`](crate::compare::Comparator), so they work on
//! [`DynamicArray`](crate::DynamicArray) through `DerefMut` as well as on
//! plain slices and `Vec`s. [`Sorter`] bundles a [`SortConfig`] with an owned
//! generator for callers that want configured cutoffs and reproducible
//! pivots.

pub mod radix_sort;
pub mod selection;
pub mod shuffle;
pub mod sorting;

pub use radix_sort::{counting_sort, counting_sort_by_key, lsd_radix_sort, CountingKey};
pub use selection::{count_inversions, quick_select};
pub use shuffle::shuffle;
pub use sorting::{
    insertion_sort, is_sorted, merge_sort, quick_sort, quick_sort_3way, quick_sort_median3,
};

use crate::compare::Comparator;
use crate::config::{Config, SortConfig};
use crate::error::Result;
use crate::random::Random64;
use sorting::PivotRule;

/// Sorting front end carrying its configuration and pivot generator
///
/// # Examples
///
/// ```rust
/// use dsakit::algorithms::Sorter;
/// use dsakit::NaturalOrder;
///
/// let mut sorter = Sorter::new();
/// let mut v = vec![4, 1, 3, 1];
/// sorter.sort(&mut v, &NaturalOrder);
/// assert_eq!(v, vec![1, 1, 3, 4]);
/// ```
#[derive(Debug, Clone)]
pub struct Sorter {
    config: SortConfig,
    rng: Random64,
}

impl Sorter {
    /// Sorter with the default configuration
    pub fn new() -> Self {
        let config = SortConfig::default();
        let rng = Random64::with_seed(config.seed_state, config.seed_sequence);
        Self { config, rng }
    }

    /// Sorter with a validated custom configuration
    pub fn with_config(config: SortConfig) -> Result<Self> {
        config.validate()?;
        let rng = Random64::with_seed(config.seed_state, config.seed_sequence);
        Ok(Self { config, rng })
    }

    /// Active configuration
    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Randomized quicksort with the configured cutoff
    pub fn sort<T, C: Comparator<T>>(&mut self, v: &mut [T], cmp: &C) {
        sorting::quick_sort_by_rule(
            v,
            cmp,
            PivotRule::Random(&mut self.rng),
            self.config.quick_insertion_threshold,
        );
    }

    /// Median-of-three quicksort with the configured cutoff
    pub fn sort_median3<T, C: Comparator<T>>(&mut self, v: &mut [T], cmp: &C) {
        sorting::quick_sort_by_rule(
            v,
            cmp,
            PivotRule::MedianOfThree,
            self.config.quick_insertion_threshold,
        );
    }

    /// Three-way quicksort
    pub fn sort_3way<T, C: Comparator<T>>(&mut self, v: &mut [T], cmp: &C) {
        sorting::quick_sort_3way_with(
            v,
            cmp,
            &mut self.rng,
            sorting::THREE_WAY_INSERTION_THRESHOLD,
        );
    }

    /// Stable mergesort with the configured cutoff
    pub fn stable_sort<T, C: Comparator<T>>(&mut self, v: &mut [T], cmp: &C) -> Result<()> {
        sorting::merge_sort_with(v, cmp, self.config.merge_insertion_threshold).map(|_| ())
    }

    /// Inversion count; sorts `v` as a side effect
    pub fn count_inversions<T, C: Comparator<T>>(&mut self, v: &mut [T], cmp: &C) -> Result<u64> {
        sorting::merge_sort_with(v, cmp, self.config.merge_insertion_threshold)
    }

    /// `k`-th order statistic
    pub fn select<'a, T, C: Comparator<T>>(
        &mut self,
        v: &'a mut [T],
        k: usize,
        cmp: &C,
    ) -> Result<&'a T> {
        quick_select(v, k, cmp, &mut self.rng)
    }

    /// Fisher–Yates shuffle driven by the sorter's generator
    pub fn shuffle<T>(&mut self, v: &mut [T]) {
        shuffle::shuffle(v, &mut self.rng);
    }
}

impl Default for Sorter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{NaturalOrder, Reverse};
    use crate::DynamicArray;

    #[test]
    fn test_sorter_default_config() {
        let sorter = Sorter::new();
        assert_eq!(sorter.config(), &SortConfig::default());
    }

    #[test]
    fn test_sorter_rejects_invalid_config() {
        let config = SortConfig {
            merge_insertion_threshold: 0,
            ..SortConfig::default()
        };
        assert!(Sorter::with_config(config).is_err());
    }

    #[test]
    fn test_sorter_variants_agree() {
        let mut sorter = Sorter::with_config(SortConfig::realtime_preset()).unwrap();
        let mut base: Vec<i64> = (0..3000).map(|i| (i * 7919) % 1009).collect();
        sorter.shuffle(&mut base);
        let mut expected = base.clone();
        expected.sort();

        let mut a = base.clone();
        sorter.sort(&mut a, &NaturalOrder);
        let mut b = base.clone();
        sorter.sort_median3(&mut b, &NaturalOrder);
        let mut c = base.clone();
        sorter.sort_3way(&mut c, &NaturalOrder);
        let mut d = base.clone();
        sorter.stable_sort(&mut d, &NaturalOrder).unwrap();

        assert_eq!(a, expected);
        assert_eq!(b, expected);
        assert_eq!(c, expected);
        assert_eq!(d, expected);
    }

    #[test]
    fn test_sorter_on_dynamic_array() {
        let mut sorter = Sorter::new();
        let mut arr: DynamicArray<i32> = (0..100).collect();
        sorter.shuffle(&mut arr);
        sorter.sort(&mut arr, &Reverse(NaturalOrder));
        assert!(is_sorted(&arr, &Reverse(NaturalOrder)));
        assert_eq!(*sorter.select(&mut arr, 0, &NaturalOrder).unwrap(), 0);
    }

    #[test]
    fn test_sorter_reproducible() {
        let mut a: Vec<u32> = (0..64).collect();
        let mut b = a.clone();
        Sorter::new().shuffle(&mut a);
        Sorter::new().shuffle(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_sorter_count_inversions() {
        let mut sorter = Sorter::new();
        let mut v = vec![3, 2, 1];
        assert_eq!(sorter.count_inversions(&mut v, &NaturalOrder).unwrap(), 3);
    }
}

//! HashTable: open addressing over byte-string keys
//!
//! Linear probing from `djb2(key) % capacity`. The table doubles with a full
//! rehash whenever `count * 2 >= capacity`, so at least half the slots are
//! always empty and every probe walk terminates. Deletion uses backward
//! shifting instead of tombstones: after a slot is cleared, later members of
//! the same cluster whose ideal slot lies at or before the gap are moved
//! back into it, keeping every remaining key reachable from its ideal slot.

use super::hash_functions::djb2;
use crate::config::{Config, HashTableConfig};
use crate::containers::DynamicArray;
use crate::dsa_violation;
use crate::error::{DsaError, Result};
use std::fmt;

#[derive(Clone)]
struct Entry<V> {
    key: Box<[u8]>,
    value: V,
}

/// Associative map from byte strings to `V`
///
/// # Examples
///
/// ```rust
/// use dsakit::HashTable;
///
/// let mut table = HashTable::new();
/// table.insert("a", 1)?;
/// table.insert("b", 2)?;
/// assert_eq!(*table.get("b")?, 2);
/// assert_eq!(table.remove("a"), Some(1));
/// assert!(!table.contains("a"));
/// # Ok::<(), dsakit::DsaError>(())
/// ```
#[derive(Clone)]
pub struct HashTable<V> {
    slots: DynamicArray<Option<Entry<V>>>,
    count: usize,
    config: HashTableConfig,
}

impl<V> HashTable<V> {
    /// Empty table with the default configuration
    pub fn new() -> Self {
        let config = HashTableConfig::default();
        // the default capacity is small and valid, so this only fails on OOM
        match Self::with_config(config) {
            Ok(table) => table,
            Err(e) => panic!("HashTable allocation failed: {}", e),
        }
    }

    /// Empty table with `capacity` initial slots
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_config(HashTableConfig {
            initial_capacity: capacity.max(1),
            ..HashTableConfig::default()
        })
    }

    /// Empty table sized and tuned by `config`
    pub fn with_config(config: HashTableConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            slots: Self::empty_slots(config.initial_capacity)?,
            count: 0,
            config,
        })
    }

    fn empty_slots(capacity: usize) -> Result<DynamicArray<Option<Entry<V>>>> {
        let mut slots = DynamicArray::with_capacity(capacity)?;
        for _ in 0..capacity {
            slots.push(None)?;
        }
        Ok(slots)
    }

    /// Number of stored entries
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// True when no entry is stored
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of slots
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Stored entries per slot
    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.capacity() as f64
    }

    /// Active configuration
    pub fn config(&self) -> &HashTableConfig {
        &self.config
    }

    #[inline]
    fn ideal_slot(&self, key: &[u8]) -> usize {
        (djb2(key) % self.capacity() as u64) as usize
    }

    /// Slot holding `key`, if present
    fn find_slot(&self, key: &[u8]) -> Option<usize> {
        let cap = self.capacity();
        let mut i = self.ideal_slot(key);
        for _ in 0..cap {
            match &self.slots[i] {
                None => return None,
                Some(entry) if &*entry.key == key => return Some(i),
                Some(_) => i = (i + 1) % cap,
            }
        }
        None
    }

    /// Place an entry known to be absent into the first free slot of its probe run
    fn place(&mut self, entry: Entry<V>) {
        let cap = self.capacity();
        let mut i = self.ideal_slot(&entry.key);
        while self.slots[i].is_some() {
            i = (i + 1) % cap;
        }
        self.slots[i] = Some(entry);
    }

    /// Move every entry into a fresh table of `new_capacity` slots
    fn rehash(&mut self, new_capacity: usize) -> Result<()> {
        let fresh = Self::empty_slots(new_capacity)?;
        let old = std::mem::replace(&mut self.slots, fresh);
        log::debug!(
            "HashTable rehash {} -> {} slots ({} entries)",
            old.len(),
            new_capacity,
            self.count
        );
        for entry in old.into_iter().flatten() {
            self.place(entry);
        }
        Ok(())
    }

    /// Insert or overwrite, returning the previous value for `key`
    ///
    /// # Errors
    ///
    /// `AllocationFailure` or `CapacityOverflow` if a required rehash cannot
    /// allocate; the table is unchanged in that case.
    pub fn insert(&mut self, key: impl AsRef<[u8]>, value: V) -> Result<Option<V>> {
        let key = key.as_ref();
        if let Some(i) = self.find_slot(key) {
            if let Some(entry) = self.slots[i].as_mut() {
                return Ok(Some(std::mem::replace(&mut entry.value, value)));
            }
        }

        let needed = (self.count + 1).saturating_mul(2);
        if needed >= self.capacity() {
            let doubled = self.capacity().checked_mul(2).ok_or_else(|| {
                dsa_violation!(DsaError::capacity_overflow(usize::MAX, std::mem::size_of::<V>()))
            })?;
            self.rehash(doubled)?;
        }
        self.place(Entry {
            key: key.into(),
            value,
        });
        self.count += 1;
        Ok(None)
    }

    /// True when `key` is stored
    pub fn contains(&self, key: impl AsRef<[u8]>) -> bool {
        self.find_slot(key.as_ref()).is_some()
    }

    /// Value stored for `key`
    ///
    /// # Errors
    ///
    /// `KeyNotFound` if the key is absent; [`contains`](Self::contains) is the
    /// non-failing check.
    pub fn get(&self, key: impl AsRef<[u8]>) -> Result<&V> {
        let key = key.as_ref();
        self.find_slot(key)
            .and_then(|i| self.slots[i].as_ref())
            .map(|entry| &entry.value)
            .ok_or_else(|| dsa_violation!(DsaError::key_not_found(key)))
    }

    /// Mutable value stored for `key`
    pub fn get_mut(&mut self, key: impl AsRef<[u8]>) -> Result<&mut V> {
        let key = key.as_ref();
        match self.find_slot(key) {
            Some(i) => self.slots[i]
                .as_mut()
                .map(|entry| &mut entry.value)
                .ok_or_else(|| dsa_violation!(DsaError::key_not_found(key))),
            None => Err(dsa_violation!(DsaError::key_not_found(key))),
        }
    }

    /// Value for `key`, inserting `V::default()` first if it is absent
    pub fn entry_or_default(&mut self, key: impl AsRef<[u8]>) -> Result<&mut V>
    where
        V: Default,
    {
        let key = key.as_ref();
        if !self.contains(key) {
            self.insert(key, V::default())?;
        }
        self.get_mut(key)
    }

    /// Remove `key`, returning its value; `None` when it was absent
    pub fn remove(&mut self, key: impl AsRef<[u8]>) -> Option<V> {
        let mut gap = self.find_slot(key.as_ref())?;
        let removed = self.slots[gap].take()?;
        self.count -= 1;

        let cap = self.capacity();
        let mut j = (gap + 1) % cap;
        loop {
            let ideal = match &self.slots[j] {
                None => break,
                Some(entry) => self.ideal_slot(&entry.key),
            };
            // the entry may fill the gap unless its ideal slot lies cyclically in (gap, j]
            let reachable_without_gap = if gap <= j {
                gap < ideal && ideal <= j
            } else {
                gap < ideal || ideal <= j
            };
            if !reachable_without_gap {
                self.slots.swap(gap, j);
                gap = j;
            }
            j = (j + 1) % cap;
        }

        self.maybe_shrink();
        Some(removed.value)
    }

    fn maybe_shrink(&mut self) {
        let cap = self.capacity();
        // the halved table must still take the next insert without growing
        if !self.config.enable_shrink
            || self.count.saturating_mul(8) > cap
            || (self.count + 1).saturating_mul(4) >= cap
            || cap / 2 < self.config.initial_capacity
        {
            return;
        }
        // a failed shrink leaves a valid, larger table behind
        if let Err(e) = self.rehash(cap / 2) {
            log::warn!("HashTable shrink skipped: {}", e);
        }
    }

    /// Remove every entry; capacity is kept
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.count = 0;
    }

    /// Keys in slot order
    pub fn keys(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Values in slot order
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// `(key, value)` pairs in slot order
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            slots: self.slots.iter(),
        }
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the entries of a [`HashTable`]
pub struct Iter<'a, V> {
    slots: std::slice::Iter<'a, Option<Entry<V>>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a [u8], &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots
            .by_ref()
            .flatten()
            .next()
            .map(|entry| (&*entry.key, &entry.value))
    }
}

impl<'a, V> IntoIterator for &'a HashTable<V> {
    type Item = (&'a [u8], &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}

impl<V: fmt::Debug> fmt::Debug for HashTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(k, v)| (String::from_utf8_lossy(k), v)))
            .finish()
    }
}

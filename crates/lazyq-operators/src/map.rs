//! Hash map that also accepts the absent key.
//!
//! Keys are stored as `Option<K>`; `None` is boxed into the map like any other
//! key, hashed to `NULL_KEY_HASH` and equal only to itself. Real keys are
//! hashed and compared exclusively through the supplied `EqualityComparer`:
//! one `hash` per operation, one `equals` per stored key with the same hash.
//! Comparers may be instrumented, so those counts are part of the contract.
//!
//! Entries enumerate in insertion order; `remove` moves the last entry into
//! the vacated slot.

use std::collections::HashMap;

use lazyq_core::compare::{DefaultEquality, EqualityComparer, NULL_KEY_HASH};
use lazyq_core::error::{Error, Result};

#[derive(Debug, Clone)]
struct Slot<K, V> {
    hash: u64,
    key: Option<K>,
    value: V,
}

/// Outcome of hashing a key and scanning its bucket.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Probe {
    hash: u64,
    found: Option<usize>,
}

impl Probe {
    pub(crate) fn found(&self) -> Option<usize> {
        self.found
    }
}

#[derive(Debug, Clone)]
pub struct NullableKeyMap<K, V, C = DefaultEquality> {
    comparer: C,
    entries: Vec<Slot<K, V>>,
    buckets: HashMap<u64, Vec<usize>>,
}

impl<K, V> NullableKeyMap<K, V, DefaultEquality> {
    pub fn new() -> Self {
        Self::with_comparer(DefaultEquality)
    }
}

impl<K, V> Default for NullableKeyMap<K, V, DefaultEquality> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> NullableKeyMap<K, V, C> {
    pub fn with_comparer(comparer: C) -> Self {
        Self {
            comparer,
            entries: Vec::new(),
            buckets: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn comparer(&self) -> &C {
        &self.comparer
    }

    pub fn iter(&self) -> impl Iterator<Item = (Option<&K>, &V)> + '_ {
        self.entries.iter().map(|s| (s.key.as_ref(), &s.value))
    }

    pub(crate) fn value_at(&self, index: usize) -> &V {
        &self.entries[index].value
    }
}

impl<K, V, C: EqualityComparer<K>> NullableKeyMap<K, V, C> {
    /// Hash `key` once and look for a stored equal key. Never short-circuits
    /// on an empty map: the hash is paid either way.
    pub(crate) fn probe(&self, key: Option<&K>) -> Probe {
        let hash = match key {
            None => NULL_KEY_HASH,
            Some(k) => self.comparer.hash(k),
        };
        let found = self.buckets.get(&hash).and_then(|bucket| {
            bucket
                .iter()
                .copied()
                .find(|&i| self.matches(self.entries[i].key.as_ref(), key))
        });
        Probe { hash, found }
    }

    fn matches(&self, stored: Option<&K>, key: Option<&K>) -> bool {
        match (stored, key) {
            (None, None) => true,
            (Some(a), Some(b)) => self.comparer.equals(a, b),
            _ => false,
        }
    }

    /// Append an entry for a key the probe did not find. Returns its index.
    pub(crate) fn insert_probed(&mut self, probe: Probe, key: Option<K>, value: V) -> usize {
        debug_assert!(probe.found.is_none());
        let index = self.entries.len();
        self.entries.push(Slot {
            hash: probe.hash,
            key,
            value,
        });
        self.buckets.entry(probe.hash).or_default().push(index);
        index
    }

    /// Insert a new entry; an existing equal key is an invalid operation.
    pub fn add(&mut self, key: Option<K>, value: V) -> Result<()> {
        let probe = self.probe(key.as_ref());
        if probe.found.is_some() {
            return Err(Error::DuplicateKey);
        }
        self.insert_probed(probe, key, value);
        Ok(())
    }

    pub fn try_get(&self, key: Option<&K>) -> Option<&V> {
        self.probe(key).found.map(|i| &self.entries[i].value)
    }

    pub fn get_mut(&mut self, key: Option<&K>) -> Option<&mut V> {
        let found = self.probe(key).found?;
        Some(&mut self.entries[found].value)
    }

    pub fn contains_key(&self, key: Option<&K>) -> bool {
        self.probe(key).found.is_some()
    }

    /// Single-probe upsert: `make` runs only when the key is new.
    pub fn get_or_insert_with(&mut self, key: Option<K>, make: impl FnOnce() -> V) -> &mut V {
        let probe = self.probe(key.as_ref());
        let index = match probe.found {
            Some(i) => i,
            None => self.insert_probed(probe, key, make()),
        };
        &mut self.entries[index].value
    }

    pub fn remove(&mut self, key: Option<&K>) -> bool {
        let probe = self.probe(key);
        let Some(index) = probe.found else {
            return false;
        };

        self.unlink(probe.hash, index);
        let last = self.entries.len() - 1;
        self.entries.swap_remove(index);
        if index != last {
            // the former last entry now lives at `index`
            let moved_hash = self.entries[index].hash;
            if let Some(slot) = self
                .buckets
                .get_mut(&moved_hash)
                .and_then(|b| b.iter_mut().find(|i| **i == last))
            {
                *slot = index;
            }
        }
        true
    }

    fn unlink(&mut self, hash: u64, index: usize) {
        if let Some(bucket) = self.buckets.get_mut(&hash) {
            bucket.retain(|&i| i != index);
            if bucket.is_empty() {
                self.buckets.remove(&hash);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazyq_core::instrument::Instrumented;

    /// Every key lands in the same bucket.
    #[derive(Clone, Default)]
    struct Colliding;

    impl EqualityComparer<i32> for Colliding {
        fn equals(&self, a: &i32, b: &i32) -> bool {
            a == b
        }

        fn hash(&self, _value: &i32) -> u64 {
            7
        }
    }

    #[test]
    fn test_null_key_roundtrip() {
        let mut map: NullableKeyMap<&str, i32> = NullableKeyMap::new();
        map.add(None, 1).unwrap();
        map.add(Some("a"), 2).unwrap();

        assert_eq!(map.try_get(None), Some(&1));
        assert_eq!(map.try_get(Some(&"a")), Some(&2));
        assert!(map.contains_key(None));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_second_null_key_is_duplicate() {
        let mut map: NullableKeyMap<String, i32> = NullableKeyMap::new();
        map.add(None, 1).unwrap();
        let err = map.add(None, 2).unwrap_err();
        assert_eq!(err, Error::DuplicateKey);
        assert!(err.is_invalid_operation());
        assert_eq!(map.try_get(None), Some(&1));
    }

    #[test]
    fn test_duplicate_real_key() {
        let mut map = NullableKeyMap::new();
        map.add(Some(1), "one").unwrap();
        assert_eq!(map.add(Some(1), "uno"), Err(Error::DuplicateKey));
    }

    #[test]
    fn test_null_key_never_reaches_comparer() {
        let eq = Instrumented::new(DefaultEquality);
        let mut map: NullableKeyMap<i32, (), _> = NullableKeyMap::with_comparer(eq.clone());
        map.add(None, ()).unwrap();
        assert!(map.contains_key(None));
        assert!(map.remove(None));
        assert_eq!(eq.hash_calls(), 0);
        assert_eq!(eq.equals_calls(), 0);
    }

    #[test]
    fn test_one_hash_per_operation() {
        let eq = Instrumented::new(DefaultEquality);
        let mut map = NullableKeyMap::with_comparer(eq.clone());
        map.add(Some("a"), 1).unwrap();
        map.add(Some("b"), 2).unwrap();
        assert_eq!(eq.hash_calls(), 2);
        assert_eq!(eq.equals_calls(), 0);

        assert_eq!(map.try_get(Some(&"a")), Some(&1));
        assert_eq!(eq.hash_calls(), 3);
        assert_eq!(eq.equals_calls(), 1);
    }

    #[test]
    fn test_empty_map_still_hashes() {
        let eq = Instrumented::new(DefaultEquality);
        let map: NullableKeyMap<&str, i32, _> = NullableKeyMap::with_comparer(eq.clone());
        assert!(map.try_get(Some(&"x")).is_none());
        assert_eq!(eq.hash_calls(), 1);
    }

    #[test]
    fn test_collisions_resolved_by_equality() {
        let mut map = NullableKeyMap::with_comparer(Colliding);
        for k in 0..5 {
            map.add(Some(k), k * 10).unwrap();
        }
        map.add(None, -1).unwrap();
        for k in 0..5 {
            assert_eq!(map.try_get(Some(&k)), Some(&(k * 10)));
        }
        assert_eq!(map.try_get(None), Some(&-1));
    }

    #[test]
    fn test_remove_keeps_other_entries_reachable() {
        let mut map = NullableKeyMap::with_comparer(Colliding);
        for k in 0..4 {
            map.add(Some(k), k).unwrap();
        }
        assert!(map.remove(Some(&1)));
        assert!(!map.remove(Some(&1)));
        assert_eq!(map.len(), 3);
        for k in [0, 2, 3] {
            assert_eq!(map.try_get(Some(&k)), Some(&k));
        }
        // last entry moved into the vacated slot
        let keys: Vec<_> = map.iter().map(|(k, _)| k.copied()).collect();
        assert_eq!(keys, vec![Some(0), Some(3), Some(2)]);
    }

    #[test]
    fn test_comparer_shares_counters() {
        let eq = Instrumented::new(DefaultEquality);
        let mut map = NullableKeyMap::with_comparer(eq.clone());
        map.add(Some(1), "one").unwrap();
        assert!(map.contains_key(Some(&1)));
        assert_eq!(map.comparer().hash_calls(), 2);
        assert_eq!(eq.equals_calls(), 1);
    }

    #[test]
    fn test_get_or_insert_with_upserts() {
        let mut map: NullableKeyMap<&str, Vec<i32>> = NullableKeyMap::new();
        map.get_or_insert_with(Some("a"), Vec::new).push(1);
        map.get_or_insert_with(Some("a"), Vec::new).push(2);
        map.get_or_insert_with(None, Vec::new).push(3);
        assert_eq!(map.try_get(Some(&"a")), Some(&vec![1, 2]));
        assert_eq!(map.try_get(None), Some(&vec![3]));
        if let Some(v) = map.get_mut(None) {
            v.clear();
        }
        assert_eq!(map.try_get(None), Some(&vec![]));
    }
}

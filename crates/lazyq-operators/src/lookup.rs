//! Grouping and Lookup: the key-based aggregation engine.
//!
//! `Lookup::build` makes one pass over its source. Each element's key is
//! probed in a `NullableKeyMap` (one hash, plus one equality per stored key
//! with the same hash); a new key opens a new `Grouping` at the end of the
//! first-seen order. Once the pass returns, the Lookup is frozen: consumers
//! only get the read-only `List` surface of each Grouping and nothing ever
//! touches the source again.

use std::ops::Index;

use lazyq_core::compare::{DefaultEquality, EqualityComparer};
use lazyq_core::list::List;

use crate::map::NullableKeyMap;
use crate::metrics;
use crate::sort::KeySelector;

/// Elements sharing one key, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grouping<K, E> {
    key: K,
    elements: Vec<E>,
}

impl<K, E> Grouping<K, E> {
    fn new(key: K) -> Self {
        Self {
            key,
            elements: Vec::new(),
        }
    }

    /// Build-pass append; not part of the consumer surface.
    pub(crate) fn append(&mut self, element: E) {
        self.elements.push(element);
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&E> {
        self.elements.get(index)
    }

    pub fn elements(&self) -> &[E] {
        &self.elements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.elements.iter()
    }

    pub fn into_parts(self) -> (K, Vec<E>) {
        (self.key, self.elements)
    }
}

impl<K, E> List<E> for Grouping<K, E> {
    fn as_slice(&self) -> &[E] {
        &self.elements
    }
}

impl<K, E> Index<usize> for Grouping<K, E> {
    type Output = E;

    fn index(&self, index: usize) -> &E {
        &self.elements[index]
    }
}

impl<'a, K, E> IntoIterator for &'a Grouping<K, E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<K, E> IntoIterator for Grouping<K, E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

/// Immutable multi-map from key to `Grouping`, in first-seen key order.
#[derive(Debug, Clone)]
pub struct Lookup<K, E, C = DefaultEquality> {
    index: NullableKeyMap<K, usize, C>,
    groups: Vec<Grouping<K, E>>,
}

impl<K, E, C> Lookup<K, E, C>
where
    K: Clone,
    C: EqualityComparer<K>,
{
    /// Drain `source` once and group it.
    pub fn build<S, KS, EF>(source: S, key_selector: KS, element_selector: EF, comparer: C) -> Self
    where
        S: IntoIterator,
        KS: KeySelector<S::Item, Key = K>,
        EF: Fn(S::Item) -> E,
    {
        let mut index = NullableKeyMap::with_comparer(comparer);
        let mut groups: Vec<Grouping<K, E>> = Vec::new();
        let mut elements = 0usize;

        for item in source {
            let key = key_selector.select(&item);
            let probe = index.probe(Some(&key));
            let position = match probe.found() {
                Some(slot) => *index.value_at(slot),
                None => {
                    let position = groups.len();
                    index.insert_probed(probe, Some(key.clone()), position);
                    groups.push(Grouping::new(key));
                    position
                }
            };
            groups[position].append(element_selector(item));
            elements += 1;
        }

        metrics::emit(
            "lookup_built",
            &[("groups", groups.len()), ("elements", elements)],
        );

        Self { index, groups }
    }

    pub(crate) fn position(&self, key: &K) -> Option<usize> {
        self.index.try_get(Some(key)).copied()
    }

    /// Elements for `key`; an unseen key yields an empty slice.
    ///
    /// Costs one hash even when the lookup holds no groups at all.
    pub fn get(&self, key: &K) -> &[E] {
        match self.position(key) {
            Some(p) => self.groups[p].elements(),
            None => &[],
        }
    }

    pub fn grouping(&self, key: &K) -> Option<&Grouping<K, E>> {
        self.position(key).map(|p| &self.groups[p])
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(Some(key))
    }
}

impl<K, E, C> Lookup<K, E, C> {
    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub(crate) fn group_at(&self, position: usize) -> &Grouping<K, E> {
        &self.groups[position]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Grouping<K, E>> {
        self.groups.iter()
    }

    /// Lazily map every `(key, elements)` pair, in first-seen key order.
    pub fn apply_result_selector<'a, R, F>(&'a self, selector: F) -> impl Iterator<Item = R> + 'a
    where
        F: Fn(&K, &[E]) -> R + 'a,
    {
        self.groups
            .iter()
            .map(move |g| selector(g.key(), g.elements()))
    }
}

impl<K, E, C> IntoIterator for Lookup<K, E, C> {
    type Item = Grouping<K, E>;
    type IntoIter = std::vec::IntoIter<Grouping<K, E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

impl<'a, K, E, C> IntoIterator for &'a Lookup<K, E, C> {
    type Item = &'a Grouping<K, E>;
    type IntoIter = std::slice::Iter<'a, Grouping<K, E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

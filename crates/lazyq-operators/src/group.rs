//! Deferred group-by.
//!
//! `GroupBy` stores only its configuration; each pass builds a fresh
//! `Lookup` at the first pull and then hands out its Groupings in first-seen
//! key order.

use lazyq_core::compare::EqualityComparer;

use crate::lookup::{Grouping, Lookup};
use crate::sort::KeySelector;

#[derive(Clone)]
pub struct GroupBy<S, KS, EF, C> {
    source: S,
    keys: KS,
    elements: EF,
    comparer: C,
}

impl<S, KS, EF, C> GroupBy<S, KS, EF, C> {
    pub fn new(source: S, keys: KS, elements: EF, comparer: C) -> Self {
        Self {
            source,
            keys,
            elements,
            comparer,
        }
    }
}

pub struct GroupByIter<S, KS, EF, C, E>
where
    S: IntoIterator,
    KS: KeySelector<S::Item>,
{
    pending: Option<GroupBy<S, KS, EF, C>>,
    groups: Option<std::vec::IntoIter<Grouping<KS::Key, E>>>,
}

impl<S, KS, EF, C, E> Iterator for GroupByIter<S, KS, EF, C, E>
where
    S: IntoIterator,
    KS: KeySelector<S::Item>,
    KS::Key: Clone,
    EF: Fn(S::Item) -> E,
    C: EqualityComparer<KS::Key>,
{
    type Item = Grouping<KS::Key, E>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(config) = self.pending.take() {
            let GroupBy {
                source,
                keys,
                elements,
                comparer,
            } = config;
            let lookup = Lookup::build(source, keys, elements, comparer);
            self.groups = Some(lookup.into_iter());
        }
        self.groups.as_mut()?.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.groups {
            Some(groups) => groups.size_hint(),
            None => (0, None),
        }
    }
}

impl<S, KS, EF, C, E> IntoIterator for GroupBy<S, KS, EF, C>
where
    S: IntoIterator,
    KS: KeySelector<S::Item>,
    KS::Key: Clone,
    EF: Fn(S::Item) -> E,
    C: EqualityComparer<KS::Key>,
{
    type Item = Grouping<KS::Key, E>;
    type IntoIter = GroupByIter<S, KS, EF, C, E>;

    fn into_iter(self) -> Self::IntoIter {
        GroupByIter {
            pending: Some(self),
            groups: None,
        }
    }
}

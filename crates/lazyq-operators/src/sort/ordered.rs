//! `OrderedSequence`: deferred, stable, multi-key ordering.
//!
//! An ordered sequence is pure configuration (source, composite key
//! selector, composite comparer) until an iterator is asked for an element.
//! The first pull buffers the whole source, computes one composite key per
//! element, sorts original positions, and from then on each pull is a move
//! out of the buffer. Nothing is cached on the sequence itself: every pass
//! re-reads the source as it is at that moment.

use std::mem;

use lazyq_core::compare::{Comparer, DefaultComparer};
use lazyq_core::config::QueryConfig;
use lazyq_core::error::Result;
use lazyq_core::sequence::Sequence;
use lazyq_mem::Buffer;

use super::keys::{CompositeComparer, KeySelector, Level, ThenKey};
use super::quick;
use crate::metrics;

#[derive(Clone)]
pub struct OrderedSequence<S, KS, C> {
    source: S,
    keys: KS,
    comparer: C,
    config: QueryConfig,
}

impl<S, KS, C> OrderedSequence<S, KS, Level<C>> {
    /// First ordering level. `descending` negates `comparer`.
    pub fn new(source: S, keys: KS, comparer: C, descending: bool) -> Self {
        Self {
            source,
            keys,
            comparer: Level::new(comparer, descending),
            config: QueryConfig::default(),
        }
    }
}

impl<S, KS, C> OrderedSequence<S, KS, C>
where
    S: Sequence,
    KS: KeySelector<S::Item>,
    C: Comparer<KS::Key>,
{
    /// Buffering limits for every subsequent pass.
    pub fn with_config(mut self, config: QueryConfig) -> Self {
        self.config = config;
        self
    }

    pub fn then_by<F, K>(
        self,
        key: F,
    ) -> OrderedSequence<S, ThenKey<KS, F>, CompositeComparer<C, Level<DefaultComparer>>>
    where
        F: Fn(&S::Item) -> K,
        K: Ord,
    {
        self.then_by_with(key, DefaultComparer, false)
    }

    pub fn then_by_descending<F, K>(
        self,
        key: F,
    ) -> OrderedSequence<S, ThenKey<KS, F>, CompositeComparer<C, Level<DefaultComparer>>>
    where
        F: Fn(&S::Item) -> K,
        K: Ord,
    {
        self.then_by_with(key, DefaultComparer, true)
    }

    /// Add a level consulted only when every previous level ties.
    pub fn then_by_with<F, K, C2>(
        self,
        key: F,
        comparer: C2,
        descending: bool,
    ) -> OrderedSequence<S, ThenKey<KS, F>, CompositeComparer<C, Level<C2>>>
    where
        F: Fn(&S::Item) -> K,
        C2: Comparer<K>,
    {
        OrderedSequence {
            source: self.source,
            keys: ThenKey::new(self.keys, key),
            comparer: CompositeComparer::new(self.comparer, Level::new(comparer, descending)),
            config: self.config,
        }
    }

    /// Run one pass now and report buffering failures as errors.
    pub fn try_iter(&self) -> Result<Sorted<S::Item>> {
        sort_pass(self.source.clone(), &self.keys, &self.comparer, &self.config)
    }
}

fn sort_pass<S, KS, C>(
    source: S,
    keys: &KS,
    comparer: &C,
    config: &QueryConfig,
) -> Result<Sorted<S::Item>>
where
    S: IntoIterator,
    KS: KeySelector<S::Item>,
    C: Comparer<KS::Key>,
{
    let items = Buffer::with_config(source, config)?.into_vec();
    let key_values: Vec<KS::Key> = items.iter().map(|item| keys.select(item)).collect();
    let map = quick::sorted_map(&key_values, comparer);

    metrics::emit(
        "ordered",
        &[("elements", items.len()), ("sorted", usize::from(items.len() > 1))],
    );

    Ok(Sorted::new(items, map))
}

/// Elements of one completed pass, yielded in sorted order.
pub struct Sorted<T> {
    items: Vec<Option<T>>,
    order: std::vec::IntoIter<usize>,
}

impl<T> Sorted<T> {
    fn new(items: Vec<T>, map: Vec<usize>) -> Self {
        Self {
            items: items.into_iter().map(Some).collect(),
            order: map.into_iter(),
        }
    }
}

impl<T> Iterator for Sorted<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let position = self.order.next()?;
        self.items[position].take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<T> DoubleEndedIterator for Sorted<T> {
    fn next_back(&mut self) -> Option<T> {
        let position = self.order.next_back()?;
        self.items[position].take()
    }
}

impl<T> ExactSizeIterator for Sorted<T> {}

enum State<S, KS, C, T> {
    Pending {
        source: S,
        keys: KS,
        comparer: C,
        config: QueryConfig,
    },
    Ready(Sorted<T>),
    Taken,
}

/// Deferred iterator over an `OrderedSequence`.
///
/// # Panics
/// The first `next()` panics if buffering fails (configured ceiling or
/// platform capacity exceeded). Use `OrderedSequence::try_iter` to get the
/// error instead.
pub struct OrderedIter<S: IntoIterator, KS, C> {
    state: State<S, KS, C, S::Item>,
}

impl<S, KS, C> Iterator for OrderedIter<S, KS, C>
where
    S: IntoIterator,
    KS: KeySelector<S::Item>,
    C: Comparer<KS::Key>,
{
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        if let State::Pending { .. } = self.state {
            if let State::Pending {
                source,
                keys,
                comparer,
                config,
            } = mem::replace(&mut self.state, State::Taken)
            {
                match sort_pass(source, &keys, &comparer, &config) {
                    Ok(sorted) => self.state = State::Ready(sorted),
                    Err(err) => panic!("{err}"),
                }
            }
        }
        match &mut self.state {
            State::Ready(sorted) => sorted.next(),
            _ => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.state {
            State::Pending { .. } => (0, None),
            State::Ready(sorted) => sorted.size_hint(),
            State::Taken => (0, Some(0)),
        }
    }
}

impl<S, KS, C> IntoIterator for OrderedSequence<S, KS, C>
where
    S: IntoIterator,
    KS: KeySelector<S::Item>,
    C: Comparer<KS::Key>,
{
    type Item = S::Item;
    type IntoIter = OrderedIter<S, KS, C>;

    fn into_iter(self) -> Self::IntoIter {
        OrderedIter {
            state: State::Pending {
                source: self.source,
                keys: self.keys,
                comparer: self.comparer,
                config: self.config,
            },
        }
    }
}

impl<'a, S, KS, C> IntoIterator for &'a OrderedSequence<S, KS, C>
where
    S: IntoIterator + Clone,
    KS: KeySelector<S::Item> + Clone,
    C: Comparer<KS::Key> + Clone,
{
    type Item = S::Item;
    type IntoIter = OrderedIter<S, KS, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.clone().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazyq_core::error::Error;
    use lazyq_core::instrument::Instrumented;
    use std::cell::Cell;

    #[test]
    fn test_parity_order_is_stable() {
        let v = [1, 2, 3, 4, 5];
        let ordered =
            OrderedSequence::new(v.iter().copied(), |x: &i32| x % 2, DefaultComparer, false);
        assert_eq!(ordered.into_iter().collect::<Vec<_>>(), vec![2, 4, 1, 3, 5]);
    }

    #[test]
    fn test_descending_keeps_ties_in_source_order() {
        let v = [(1, 'a'), (2, 'b'), (1, 'c'), (2, 'd')];
        let ordered =
            OrderedSequence::new(v.iter().copied(), |p: &(i32, char)| p.0, DefaultComparer, true);
        let out: Vec<char> = ordered.into_iter().map(|p| p.1).collect();
        assert_eq!(out, vec!['b', 'd', 'a', 'c']);
    }

    #[test]
    fn test_then_by_breaks_ties() {
        let words = ["pear", "fig", "apple", "kiwi", "date", "plum"];
        let by_len = |w: &&str| w.len();
        let ordered = OrderedSequence::new(words.iter().copied(), by_len, DefaultComparer, false)
            .then_by_descending(|w: &&'static str| *w);
        let out: Vec<_> = ordered.into_iter().collect();
        assert_eq!(out, vec!["fig", "plum", "pear", "kiwi", "date", "apple"]);
    }

    #[test]
    fn test_nothing_happens_before_first_pull() {
        let pulls = Cell::new(0);
        let source = [3, 1, 2];
        let seq = OrderedSequence::new(
            source.iter().inspect(|_| pulls.set(pulls.get() + 1)),
            |x: &&i32| **x,
            DefaultComparer,
            false,
        );
        let mut iter = seq.into_iter();
        assert_eq!(pulls.get(), 0);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(pulls.get(), 3);
        assert_eq!(iter.size_hint(), (2, Some(2)));
    }

    #[test]
    fn test_empty_source_never_compares() {
        let cmp = Instrumented::new(DefaultComparer);
        let seq = OrderedSequence::new(Vec::<i32>::new(), |x: &i32| *x, cmp.clone(), false);
        assert_eq!(seq.into_iter().count(), 0);
        assert_eq!(cmp.compare_calls(), 0);
    }

    #[test]
    fn test_try_iter_reports_overflow() {
        let seq = OrderedSequence::new(vec![3, 2, 1], |x: &i32| *x, DefaultComparer, false)
            .with_config(QueryConfig::default().with_max_buffer_len(2));
        assert!(matches!(seq.try_iter(), Err(Error::Overflow(_))));
    }

    #[test]
    #[should_panic(expected = "Arithmetic overflow")]
    fn test_deferred_overflow_panics_on_first_pull() {
        let seq = OrderedSequence::new(vec![3, 2, 1], |x: &i32| *x, DefaultComparer, false)
            .with_config(QueryConfig::default().with_max_buffer_len(2));
        let mut iter = seq.into_iter();
        iter.next();
    }

    #[test]
    fn test_sorted_is_double_ended() {
        let seq = OrderedSequence::new(vec![2, 3, 1], |x: &i32| *x, DefaultComparer, false);
        let sorted = seq.try_iter().unwrap();
        assert_eq!(sorted.len(), 3);
        assert_eq!(sorted.rev().collect::<Vec<_>>(), vec![3, 2, 1]);
    }
}

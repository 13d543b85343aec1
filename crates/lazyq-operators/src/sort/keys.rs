//! Ordering levels and their composition.
//!
//! `thenBy` never re-sorts: it widens the key to `(previous, next)` and
//! widens the comparer so the new level is consulted only on a tie.

use std::cmp::Ordering;

use lazyq_core::compare::Comparer;

/// Extracts the sort/group key of an element.
pub trait KeySelector<T> {
    type Key;

    fn select(&self, item: &T) -> Self::Key;
}

impl<T, K, F> KeySelector<T> for F
where
    F: Fn(&T) -> K,
{
    type Key = K;

    fn select(&self, item: &T) -> K {
        self(item)
    }
}

/// Composite key selector producing `(primary, secondary)`.
#[derive(Debug, Clone, Copy)]
pub struct ThenKey<A, B> {
    primary: A,
    secondary: B,
}

impl<A, B> ThenKey<A, B> {
    pub fn new(primary: A, secondary: B) -> Self {
        Self { primary, secondary }
    }
}

impl<T, A, B> KeySelector<T> for ThenKey<A, B>
where
    A: KeySelector<T>,
    B: KeySelector<T>,
{
    type Key = (A::Key, B::Key);

    fn select(&self, item: &T) -> Self::Key {
        (self.primary.select(item), self.secondary.select(item))
    }
}

/// One ordering level: a comparer plus its direction.
#[derive(Debug, Clone, Copy)]
pub struct Level<C> {
    comparer: C,
    descending: bool,
}

impl<C> Level<C> {
    pub fn new(comparer: C, descending: bool) -> Self {
        Self {
            comparer,
            descending,
        }
    }

    pub fn is_descending(&self) -> bool {
        self.descending
    }
}

impl<K, C: Comparer<K>> Comparer<K> for Level<C> {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        let ord = self.comparer.compare(a, b);
        if self.descending {
            ord.reverse()
        } else {
            ord
        }
    }
}

/// Compares `(primary, secondary)` pairs; `secondary` breaks primary ties.
#[derive(Debug, Clone, Copy)]
pub struct CompositeComparer<P, S> {
    primary: P,
    secondary: S,
}

impl<P, S> CompositeComparer<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

impl<K1, K2, P, S> Comparer<(K1, K2)> for CompositeComparer<P, S>
where
    P: Comparer<K1>,
    S: Comparer<K2>,
{
    fn compare(&self, a: &(K1, K2), b: &(K1, K2)) -> Ordering {
        match self.primary.compare(&a.0, &b.0) {
            Ordering::Equal => self.secondary.compare(&a.1, &b.1),
            other => other,
        }
    }
}

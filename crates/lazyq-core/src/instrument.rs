//! Call-counting comparer wrapper.
//!
//! The number and order of comparer calls is observable (comparers may carry
//! side effects), so tests and diagnostics wrap comparers in `Instrumented`.
//! Clones share one set of counters.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Arc;

use crate::compare::{Comparer, EqualityComparer};

#[derive(Debug, Default)]
struct Counters {
    hash: AtomicUsize,
    equals: AtomicUsize,
    compare: AtomicUsize,
}

#[derive(Debug, Clone, Default)]
pub struct Instrumented<C> {
    inner: C,
    counters: Arc<Counters>,
}

impl<C> Instrumented<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            counters: Arc::new(Counters::default()),
        }
    }

    pub fn hash_calls(&self) -> usize {
        self.counters.hash.load(AtomicOrdering::Relaxed)
    }

    pub fn equals_calls(&self) -> usize {
        self.counters.equals.load(AtomicOrdering::Relaxed)
    }

    pub fn compare_calls(&self) -> usize {
        self.counters.compare.load(AtomicOrdering::Relaxed)
    }

    pub fn reset(&self) {
        self.counters.hash.store(0, AtomicOrdering::Relaxed);
        self.counters.equals.store(0, AtomicOrdering::Relaxed);
        self.counters.compare.store(0, AtomicOrdering::Relaxed);
    }

    fn bump(counter: &AtomicUsize, event: &'static str) {
        let _calls = counter.fetch_add(1, AtomicOrdering::Relaxed) + 1;
        #[cfg(feature = "tracing")]
        tracing::trace!(event, calls = _calls, "comparer call");
        #[cfg(not(feature = "tracing"))]
        let _ = event;
    }
}

impl<T: ?Sized, C: EqualityComparer<T>> EqualityComparer<T> for Instrumented<C> {
    fn equals(&self, a: &T, b: &T) -> bool {
        Self::bump(&self.counters.equals, "equals");
        self.inner.equals(a, b)
    }

    fn hash(&self, value: &T) -> u64 {
        Self::bump(&self.counters.hash, "hash");
        self.inner.hash(value)
    }
}

impl<T: ?Sized, C: Comparer<T>> Comparer<T> for Instrumented<C> {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        Self::bump(&self.counters.compare, "compare");
        self.inner.compare(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{DefaultComparer, DefaultEquality};

    #[test]
    fn test_counts_are_shared_between_clones() {
        let eq = Instrumented::new(DefaultEquality);
        let copy = eq.clone();
        copy.hash("a");
        copy.equals("a", "b");
        assert_eq!(eq.hash_calls(), 1);
        assert_eq!(eq.equals_calls(), 1);

        eq.reset();
        assert_eq!(copy.hash_calls(), 0);
    }

    #[test]
    fn test_counts_compare() {
        let cmp = Instrumented::new(DefaultComparer);
        assert_eq!(cmp.compare(&3, &1), Ordering::Greater);
        assert_eq!(cmp.compare_calls(), 1);
    }
}

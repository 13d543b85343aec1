//! The lazy-sequence capability.
//!
//! A sequence is anything that can hand out a fresh pull-based iterator on
//! demand: `IntoIterator + Clone`. Cloning the handle is how a pass restarts,
//! so borrowed collections, cloneable iterators and composed lazy operators
//! are all sequences. Nothing is pulled until the consumer calls `next()`.
//!
//! Releasing an iterator is `Drop`; every pass owns its upstream iterator and
//! lets it go when the pass completes, stops early or unwinds.

/// Restartable lazy sequence.
pub trait Sequence: IntoIterator + Clone {}

impl<S: IntoIterator + Clone> Sequence for S {}

/// Sequence whose every pass calls `f` for a fresh iterable.
///
/// Use it over shared, mutable state: each pass observes the state as it is
/// when iteration starts.
#[derive(Clone, Copy)]
pub struct Deferred<F> {
    produce: F,
}

pub fn defer<F, I>(produce: F) -> Deferred<F>
where
    F: Fn() -> I,
    I: IntoIterator,
{
    Deferred { produce }
}

impl<F, I> IntoIterator for Deferred<F>
where
    F: Fn() -> I,
    I: IntoIterator,
{
    type Item = I::Item;
    type IntoIter = I::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        (self.produce)().into_iter()
    }
}

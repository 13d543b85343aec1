//! Inner join: one result per (outer, matching inner) pair, in outer order
//! and then inner source order.

use lazyq_core::compare::EqualityComparer;

use crate::lookup::Lookup;
use crate::sort::KeySelector;

#[derive(Clone)]
pub struct InnerJoin<O, I, OK, IK, R, C> {
    outer: O,
    inner: I,
    outer_key: OK,
    inner_key: IK,
    result: R,
    comparer: C,
}

impl<O, I, OK, IK, R, C> InnerJoin<O, I, OK, IK, R, C> {
    pub fn new(outer: O, inner: I, outer_key: OK, inner_key: IK, result: R, comparer: C) -> Self {
        Self {
            outer,
            inner,
            outer_key,
            inner_key,
            result,
            comparer,
        }
    }
}

pub struct InnerJoinIter<O, I, OK, IK, R, C>
where
    O: IntoIterator,
    I: IntoIterator,
    OK: KeySelector<O::Item>,
{
    pending: Option<(O, I, IK, C)>,
    running: Option<(O::IntoIter, Lookup<OK::Key, I::Item, C>)>,
    /// Outer element being matched, its group, and the next inner offset.
    current: Option<(O::Item, usize, usize)>,
    outer_key: OK,
    result: R,
}

impl<O, I, OK, IK, R, C, T> Iterator for InnerJoinIter<O, I, OK, IK, R, C>
where
    O: IntoIterator,
    I: IntoIterator,
    OK: KeySelector<O::Item>,
    OK::Key: Clone,
    IK: KeySelector<I::Item, Key = OK::Key>,
    C: EqualityComparer<OK::Key>,
    R: Fn(&O::Item, &I::Item) -> T,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if let Some((outer, inner, inner_key, comparer)) = self.pending.take() {
            let lookup = Lookup::build(inner, inner_key, |item| item, comparer);
            self.running = Some((outer.into_iter(), lookup));
        }
        let (outer, lookup) = self.running.as_mut()?;

        loop {
            if let Some((item, position, next)) = self.current.as_mut() {
                if let Some(matched) = lookup.group_at(*position).get(*next) {
                    *next += 1;
                    return Some((self.result)(item, matched));
                }
                self.current = None;
            }

            let item = outer.next()?;
            let key = self.outer_key.select(&item);
            if let Some(position) = lookup.position(&key) {
                self.current = Some((item, position, 0));
            }
        }
    }
}

impl<O, I, OK, IK, R, C, T> IntoIterator for InnerJoin<O, I, OK, IK, R, C>
where
    O: IntoIterator,
    I: IntoIterator,
    OK: KeySelector<O::Item>,
    OK::Key: Clone,
    IK: KeySelector<I::Item, Key = OK::Key>,
    C: EqualityComparer<OK::Key>,
    R: Fn(&O::Item, &I::Item) -> T,
{
    type Item = T;
    type IntoIter = InnerJoinIter<O, I, OK, IK, R, C>;

    fn into_iter(self) -> Self::IntoIter {
        InnerJoinIter {
            pending: Some((self.outer, self.inner, self.inner_key, self.comparer)),
            running: None,
            current: None,
            outer_key: self.outer_key,
            result: self.result,
        }
    }
}

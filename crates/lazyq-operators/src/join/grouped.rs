//! Group join: exactly one result per outer element, paired with the slice
//! of matching inner elements (empty when nothing matches).

use lazyq_core::compare::EqualityComparer;

use crate::lookup::Lookup;
use crate::sort::KeySelector;

#[derive(Clone)]
pub struct GroupJoin<O, I, OK, IK, R, C> {
    outer: O,
    inner: I,
    outer_key: OK,
    inner_key: IK,
    result: R,
    comparer: C,
}

impl<O, I, OK, IK, R, C> GroupJoin<O, I, OK, IK, R, C> {
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

pub struct GroupJoinIter<O, I, OK, IK, R, C>
where
    O: IntoIterator,
    I: IntoIterator,
    OK: KeySelector<O::Item>,
{
    pending: Option<(O, I, IK, C)>,
    running: Option<(O::IntoIter, Lookup<OK::Key, I::Item, C>)>,
    outer_key: OK,
    result: R,
}

impl<O, I, OK, IK, R, C, T> Iterator for GroupJoinIter<O, I, OK, IK, R, C>
where
    O: IntoIterator,
    I: IntoIterator,
    OK: KeySelector<O::Item>,
    OK::Key: Clone,
    IK: KeySelector<I::Item, Key = OK::Key>,
    C: EqualityComparer<OK::Key>,
    R: Fn(O::Item, &[I::Item]) -> T,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if let Some((outer, inner, inner_key, comparer)) = self.pending.take() {
            let lookup = Lookup::build(inner, inner_key, |item| item, comparer);
            self.running = Some((outer.into_iter(), lookup));
        }
        let (outer, lookup) = self.running.as_mut()?;

        let item = outer.next()?;
        let key = self.outer_key.select(&item);
        Some((self.result)(item, lookup.get(&key)))
    }
}

impl<O, I, OK, IK, R, C, T> IntoIterator for GroupJoin<O, I, OK, IK, R, C>
where
    O: IntoIterator,
    I: IntoIterator,
    OK: KeySelector<O::Item>,
    OK::Key: Clone,
    IK: KeySelector<I::Item, Key = OK::Key>,
    C: EqualityComparer<OK::Key>,
    R: Fn(O::Item, &[I::Item]) -> T,
{
    type Item = T;
    type IntoIter = GroupJoinIter<O, I, OK, IK, R, C>;

    fn into_iter(self) -> Self::IntoIter {
        GroupJoinIter {
            pending: Some((self.outer, self.inner, self.inner_key, self.comparer)),
            running: None,
            outer_key: self.outer_key,
            result: self.result,
        }
    }
}

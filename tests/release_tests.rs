//! Upstream iterator release tests

use lazyq::prelude::*;
use std::cell::Cell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

/// Counts how many of its instances (clones included) have been dropped.
#[derive(Clone)]
struct Tracked {
    next: i32,
    end: i32,
    drops: Rc<Cell<usize>>,
}

impl Tracked {
    fn new(end: i32, drops: &Rc<Cell<usize>>) -> Self {
        Self {
            next: 0,
            end,
            drops: Rc::clone(drops),
        }
    }
}

impl Iterator for Tracked {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        if self.next == self.end {
            return None;
        }
        self.next += 1;
        Some(self.next - 1)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

#[test]
fn inner_join_releases_outer_after_early_stop() {
    let drops = Rc::new(Cell::new(0));
    let inner = vec![0, 1, 2, 3];
    let mut pairs = Tracked::new(4, &drops)
        .inner_join(inner.iter().copied(), |o| *o, |i| *i, |o, i| o + i)
        .into_iter();

    assert_eq!(pairs.next(), Some(0));
    assert_eq!(drops.get(), 0);
    drop(pairs);
    assert_eq!(drops.get(), 1);
}

#[test]
fn group_join_releases_outer_after_early_stop() {
    let drops = Rc::new(Cell::new(0));
    let inner = vec![1, 1];
    let mut counts = Tracked::new(4, &drops)
        .group_join(inner.iter().copied(), |o| *o, |i| *i, |o, m| (o, m.len()))
        .into_iter();

    assert_eq!(counts.next(), Some((0, 0)));
    assert_eq!(counts.next(), Some((1, 2)));
    assert_eq!(drops.get(), 0);
    drop(counts);
    assert_eq!(drops.get(), 1);
}

#[test]
fn inner_join_releases_outer_when_key_selector_panics() {
    let drops = Rc::new(Cell::new(0));
    let inner = vec![0, 1, 2];
    let join = Tracked::new(3, &drops).inner_join(
        inner.iter().copied(),
        |o| if *o == 1 { panic!("bad outer key") } else { *o },
        |i| *i,
        |o, i| o + i,
    );

    let result = catch_unwind(AssertUnwindSafe(|| join.into_iter().collect::<Vec<_>>()));
    assert!(result.is_err());
    assert_eq!(drops.get(), 1);
}

#[test]
fn order_by_releases_source_when_key_selector_panics() {
    let drops = Rc::new(Cell::new(0));
    let ordered = Tracked::new(3, &drops).order_by(|x| {
        if *x == 2 {
            panic!("bad sort key")
        }
        -*x
    });

    let result = catch_unwind(AssertUnwindSafe(|| ordered.into_iter().next()));
    assert!(result.is_err());
    assert_eq!(drops.get(), 1);
}

#[test]
fn order_by_releases_source_after_each_pass() {
    let drops = Rc::new(Cell::new(0));
    let ordered = Tracked::new(5, &drops).order_by_descending(|x| *x);

    let mut top = (&ordered).into_iter();
    assert_eq!(top.next(), Some(4));
    // the pass buffered and released its clone of the source
    assert_eq!(drops.get(), 1);
    drop(top);

    assert_eq!(ordered.into_iter().count(), 5);
    assert_eq!(drops.get(), 2);
}

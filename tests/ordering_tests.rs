//! Stable multi-key ordering tests

use lazyq::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn parity_key_keeps_source_order_within_ties() {
    let v = vec![1, 2, 3, 4, 5];
    let out: Vec<i32> = v.iter().copied().order_by(|x| x % 2).into_iter().collect();
    assert_eq!(out, vec![2, 4, 1, 3, 5]);
}

#[test]
fn descending_ties_keep_source_order() {
    let rows = vec![("a", 1), ("b", 2), ("c", 1), ("d", 2)];
    let out: Vec<&str> = rows
        .iter()
        .copied()
        .order_by_descending(|r| r.1)
        .into_iter()
        .map(|r| r.0)
        .collect();
    assert_eq!(out, vec!["b", "d", "a", "c"]);
}

#[test]
fn secondary_key_consulted_only_on_ties() {
    let comparer = Instrumented::new(DefaultComparer);
    let v = vec![(1, 'b'), (2, 'a'), (3, 'c')];
    let out: Vec<(i32, char)> = v
        .iter()
        .copied()
        .order_by(|p| p.0)
        .then_by_with(|p| p.1, comparer.clone(), false)
        .into_iter()
        .collect();
    assert_eq!(out, vec![(1, 'b'), (2, 'a'), (3, 'c')]);
    assert_eq!(comparer.compare_calls(), 0);
}

#[test]
fn then_by_descending_breaks_ties() {
    let v = vec![(1, 1), (0, 5), (1, 3), (0, 2)];
    let out: Vec<(i32, i32)> = v
        .iter()
        .copied()
        .order_by(|p| p.0)
        .then_by_descending(|p| p.1)
        .into_iter()
        .collect();
    assert_eq!(out, vec![(0, 5), (0, 2), (1, 3), (1, 1)]);
}

#[test]
fn custom_comparer_closure() {
    let v = vec!["b", "A", "c"];
    let by_lowercase = |a: &String, b: &String| a.cmp(b);
    let out: Vec<&str> = v
        .iter()
        .copied()
        .order_by_with(|s| s.to_lowercase(), by_lowercase, false)
        .into_iter()
        .collect();
    assert_eq!(out, vec!["A", "b", "c"]);

    let reversed: Vec<i32> = vec![1, 3, 2]
        .into_iter()
        .order_by_with(|x| *x, |a: &i32, b: &i32| b.cmp(a), false)
        .into_iter()
        .collect();
    assert_eq!(reversed, vec![3, 2, 1]);
}

#[test]
fn each_pass_sees_current_source() {
    let shared = Rc::new(RefCell::new(vec![3, 1, 2]));
    let handle = Rc::clone(&shared);
    let ordered = defer(move || handle.borrow().clone()).order_by(|x| *x);

    assert_eq!((&ordered).into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    shared.borrow_mut().push(0);
    assert_eq!((&ordered).into_iter().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
}

#[test]
fn repeated_passes_are_identical() {
    let v: Vec<u32> = (0..200).map(|i| (i * 37) % 11).collect();
    let ordered = v.iter().copied().order_by(|x| *x);
    let first: Vec<u32> = (&ordered).into_iter().collect();
    let second: Vec<u32> = ordered.into_iter().collect();
    assert_eq!(first, second);
    assert!(first.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn matches_std_stable_sort() {
    let mut state = 12345u64;
    let v: Vec<(u8, usize)> = (0..500)
        .map(|i| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (((state >> 33) % 7) as u8, i)
        })
        .collect();

    let mut expected = v.clone();
    expected.sort_by(|a, b| b.0.cmp(&a.0));

    let out: Vec<(u8, usize)> = v
        .iter()
        .copied()
        .order_by_descending(|p| p.0)
        .into_iter()
        .collect();
    assert_eq!(out, expected);
}

#[test]
fn buffering_limit_reported_by_try_iter() {
    let ordered = (0..10)
        .order_by(|x| *x)
        .with_config(QueryConfig::default().with_max_buffer_len(4));
    assert!(matches!(ordered.try_iter(), Err(Error::Overflow(_))));
}

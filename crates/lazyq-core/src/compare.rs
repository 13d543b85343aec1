//! Equality and ordering capabilities.
//!
//! Every grouping/ordering component accepts one of these as an optional,
//! pluggable parameter and falls back to the key type's natural `Hash + Eq` /
//! `Ord` when none is given.

use std::cmp::Ordering;
use std::hash::{DefaultHasher, Hash, Hasher};

/// Hash shared by every component for the absent (null) key.
///
/// It need not differ from real hashes; collisions are settled by equality.
pub const NULL_KEY_HASH: u64 = 0;

/// Equality capability: `equals` + `hash` must agree (equal values hash equal).
pub trait EqualityComparer<T: ?Sized> {
    fn equals(&self, a: &T, b: &T) -> bool;
    fn hash(&self, value: &T) -> u64;
}

/// Ordering capability: a three-way comparison.
pub trait Comparer<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Natural equality (`Eq`) hashed with the std SipHash hasher.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEquality;

impl<T: Hash + Eq + ?Sized> EqualityComparer<T> for DefaultEquality {
    fn equals(&self, a: &T, b: &T) -> bool {
        a == b
    }

    fn hash(&self, value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }
}

/// Natural order (`Ord`).
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultComparer;

impl<T: Ord + ?Sized> Comparer<T> for DefaultComparer {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Any `Fn(&T, &T) -> Ordering` is an ordering capability.
impl<T: ?Sized, F> Comparer<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Lifts an equality capability over `T` to `Option<T>`.
///
/// `None` hashes to [`NULL_KEY_HASH`] and is equal only to `None`; the inner
/// comparer never sees it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSafe<C>(pub C);

impl<T, C: EqualityComparer<T>> EqualityComparer<Option<T>> for NullSafe<C> {
    fn equals(&self, a: &Option<T>, b: &Option<T>) -> bool {
        match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => self.0.equals(a, b),
            _ => false,
        }
    }

    fn hash(&self, value: &Option<T>) -> u64 {
        match value {
            None => NULL_KEY_HASH,
            Some(v) => self.0.hash(v),
        }
    }
}

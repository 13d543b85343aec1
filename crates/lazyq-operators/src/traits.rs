//! `QueryExt`: operator entry points on every restartable sequence.
//!
//! Key selectors are bounded as plain `Fn(&Item) -> K` here so closure
//! parameter types are inferred at the call site.

use std::hash::Hash;

use lazyq_core::compare::{Comparer, DefaultComparer, DefaultEquality, EqualityComparer};
use lazyq_core::config::QueryConfig;
use lazyq_core::error::Result;
use lazyq_core::sequence::Sequence;
use lazyq_mem::Buffer;

use crate::group::GroupBy;
use crate::join::{GroupJoin, InnerJoin};
use crate::lookup::Lookup;
use crate::reverse::Reverse;
use crate::sort::{Level, OrderedSequence};

fn identity<T>(item: T) -> T {
    item
}

pub trait QueryExt: Sequence + Sized {
    /// Stable ascending order by `key`.
    fn order_by<F, K>(self, key: F) -> OrderedSequence<Self, F, Level<DefaultComparer>>
    where
        F: Fn(&Self::Item) -> K,
        K: Ord,
    {
        OrderedSequence::new(self, key, DefaultComparer, false)
    }

    /// Stable descending order by `key`; ties keep source order.
    fn order_by_descending<F, K>(self, key: F) -> OrderedSequence<Self, F, Level<DefaultComparer>>
    where
        F: Fn(&Self::Item) -> K,
        K: Ord,
    {
        OrderedSequence::new(self, key, DefaultComparer, true)
    }

    fn order_by_with<F, K, C>(
        self,
        key: F,
        comparer: C,
        descending: bool,
    ) -> OrderedSequence<Self, F, Level<C>>
    where
        F: Fn(&Self::Item) -> K,
        C: Comparer<K>,
    {
        OrderedSequence::new(self, key, comparer, descending)
    }

    /// Deferred grouping in first-seen key order.
    fn group_by<F, K>(
        self,
        key: F,
    ) -> GroupBy<Self, F, fn(Self::Item) -> Self::Item, DefaultEquality>
    where
        F: Fn(&Self::Item) -> K,
        K: Hash + Eq + Clone,
    {
        let elements: fn(Self::Item) -> Self::Item = identity;
        GroupBy::new(self, key, elements, DefaultEquality)
    }

    fn group_by_with<F, K, EF, E, C>(
        self,
        key: F,
        element: EF,
        comparer: C,
    ) -> GroupBy<Self, F, EF, C>
    where
        F: Fn(&Self::Item) -> K,
        K: Clone,
        EF: Fn(Self::Item) -> E,
        C: EqualityComparer<K>,
    {
        GroupBy::new(self, key, element, comparer)
    }

    /// Eager: drains the sequence once into a `Lookup`.
    fn to_lookup<F, K>(self, key: F) -> Lookup<K, Self::Item>
    where
        F: Fn(&Self::Item) -> K,
        K: Hash + Eq + Clone,
    {
        Lookup::build(self, key, identity, DefaultEquality)
    }

    fn to_lookup_with<F, K, EF, E, C>(self, key: F, element: EF, comparer: C) -> Lookup<K, E, C>
    where
        F: Fn(&Self::Item) -> K,
        K: Clone,
        EF: Fn(Self::Item) -> E,
        C: EqualityComparer<K>,
    {
        Lookup::build(self, key, element, comparer)
    }

    fn inner_join<I, OK, IK, K, R, T>(
        self,
        inner: I,
        outer_key: OK,
        inner_key: IK,
        result: R,
    ) -> InnerJoin<Self, I, OK, IK, R, DefaultEquality>
    where
        I: Sequence,
        OK: Fn(&Self::Item) -> K,
        IK: Fn(&I::Item) -> K,
        K: Hash + Eq + Clone,
        R: Fn(&Self::Item, &I::Item) -> T,
    {
        InnerJoin::new(self, inner, outer_key, inner_key, result, DefaultEquality)
    }

    fn inner_join_with<I, OK, IK, K, R, T, C>(
        self,
        inner: I,
        outer_key: OK,
        inner_key: IK,
        result: R,
        comparer: C,
    ) -> InnerJoin<Self, I, OK, IK, R, C>
    where
        I: Sequence,
        OK: Fn(&Self::Item) -> K,
        IK: Fn(&I::Item) -> K,
        K: Clone,
        R: Fn(&Self::Item, &I::Item) -> T,
        C: EqualityComparer<K>,
    {
        InnerJoin::new(self, inner, outer_key, inner_key, result, comparer)
    }

    fn group_join<I, OK, IK, K, R, T>(
        self,
        inner: I,
        outer_key: OK,
        inner_key: IK,
        result: R,
    ) -> GroupJoin<Self, I, OK, IK, R, DefaultEquality>
    where
        I: Sequence,
        OK: Fn(&Self::Item) -> K,
        IK: Fn(&I::Item) -> K,
        K: Hash + Eq + Clone,
        R: Fn(Self::Item, &[I::Item]) -> T,
    {
        GroupJoin::new(self, inner, outer_key, inner_key, result, DefaultEquality)
    }

    fn group_join_with<I, OK, IK, K, R, T, C>(
        self,
        inner: I,
        outer_key: OK,
        inner_key: IK,
        result: R,
        comparer: C,
    ) -> GroupJoin<Self, I, OK, IK, R, C>
    where
        I: Sequence,
        OK: Fn(&Self::Item) -> K,
        IK: Fn(&I::Item) -> K,
        K: Clone,
        R: Fn(Self::Item, &[I::Item]) -> T,
        C: EqualityComparer<K>,
    {
        GroupJoin::new(self, inner, outer_key, inner_key, result, comparer)
    }

    /// Deferred reverse; buffers the whole source at the first pull.
    fn reverse_buffered(self) -> Reverse<Self> {
        Reverse::new(self)
    }

    /// Eager: drain once into a `Buffer` with default growth.
    fn to_buffer(self) -> Result<Buffer<Self::Item>> {
        Buffer::new(self)
    }

    fn to_buffer_with(self, config: &QueryConfig) -> Result<Buffer<Self::Item>> {
        Buffer::with_config(self, config)
    }
}

impl<S: Sequence> QueryExt for S {}

#![forbid(unsafe_code)]
//! lazyq-operators: keyed and ordered operators over lazy sequences.
//!
//! - `map`: `NullableKeyMap`, a hash map that admits one absent key.
//! - `lookup`: `Lookup` / `Grouping`, one-to-many groups in first-seen order.
//! - `group`: deferred group-by built on `Lookup`.
//! - `sort`: deferred, stable, multi-key `OrderedSequence`.
//! - `join`: inner and group joins.
//! - `reverse`: buffered reverse.
//! - `traits`: `QueryExt`, the fluent entry points.

pub mod group;
pub mod join;
pub mod lookup;
pub mod map;
pub mod reverse;
pub mod sort;
pub mod traits;

pub(crate) mod metrics;

pub use group::GroupBy;
pub use join::{GroupJoin, InnerJoin};
pub use lookup::{Grouping, Lookup};
pub use map::NullableKeyMap;
pub use reverse::Reverse;
pub use sort::{
    CompositeComparer, KeySelector, Level, OrderedIter, OrderedSequence, Sorted, ThenKey,
};
pub use traits::QueryExt;

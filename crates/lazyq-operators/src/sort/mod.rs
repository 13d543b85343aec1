//! Stable multi-key ordering.
//!
//! - `keys`: key selectors, per-level comparers and their composition.
//! - `quick`: the partition-exchange sort over original positions.
//! - `ordered`: `OrderedSequence`, the deferred entry point.

pub mod keys;
pub mod ordered;
pub(crate) mod quick;

pub use keys::{CompositeComparer, KeySelector, Level, ThenKey};
pub use ordered::{OrderedIter, OrderedSequence, Sorted};

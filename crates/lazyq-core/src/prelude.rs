//! Convenient re-exports for downstream crates.

pub use crate::compare::{
    Comparer, DefaultComparer, DefaultEquality, EqualityComparer, NullSafe, NULL_KEY_HASH,
};
pub use crate::config::QueryConfig;
pub use crate::error::{Error, Result};
pub use crate::instrument::Instrumented;
pub use crate::list::List;
pub use crate::sequence::{defer, Deferred, Sequence};

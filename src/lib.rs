#![forbid(unsafe_code)]
//! lazyq: deferred, restartable query operators.
//!
//! Operators are configuration until iterated. Each pass re-reads its
//! source, so a query built over [`defer`]-wrapped state sees mutations made
//! between passes.
//!
//! ```
//! use lazyq::prelude::*;
//!
//! let words = ["pear", "fig", "apple", "kiwi"];
//! let sorted: Vec<&str> = words
//!     .iter()
//!     .copied()
//!     .order_by(|w| w.len())
//!     .then_by(|w| *w)
//!     .into_iter()
//!     .collect();
//! assert_eq!(sorted, ["fig", "kiwi", "pear", "apple"]);
//! ```

pub use lazyq_core;
pub use lazyq_mem;
pub use lazyq_operators;

pub use lazyq_core::sequence::defer;
pub use lazyq_core::{Error, Result};

pub mod prelude {
    pub use lazyq_core::prelude::*;
    pub use lazyq_mem::Buffer;
    pub use lazyq_operators::{
        GroupBy, GroupJoin, Grouping, InnerJoin, Lookup, NullableKeyMap, OrderedSequence, QueryExt,
        Reverse,
    };
}

//! Hash joins over a Lookup of the inner sequence.
//!
//! Both joins are deferred: the inner side is grouped at the first pull of
//! each pass, then the outer side streams through it.

pub mod grouped;
pub mod inner;

pub use grouped::{GroupJoin, GroupJoinIter};
pub use inner::{InnerJoin, InnerJoinIter};

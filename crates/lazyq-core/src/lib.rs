//! lazyq-core: contracts shared by every lazyq crate.
//!
//! - `error`: the single error taxonomy (invalid argument / invalid operation /
//!   not supported / overflow) and the crate-wide `Result`.
//! - `config`: `QueryConfig` (buffer growth knobs), env + JSON loading.
//! - `compare`: equality and ordering capabilities with natural defaults.
//! - `sequence`: the restartable lazy-sequence capability.
//! - `list`: the read-only list surface handed to consumers.
//! - `instrument`: call-counting comparer wrapper.

pub mod compare;
pub mod config;
pub mod error;
pub mod instrument;
pub mod list;
pub mod prelude;
pub mod sequence;

pub use error::{Error, Result};

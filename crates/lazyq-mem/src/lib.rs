#![forbid(unsafe_code)]
//! lazyq-mem: materialization of lazy sequences.
//!
//! Operators that need random access or an element count (ordering, reverse,
//! anything indexed) drain their source into a `Buffer` here. Every such
//! allocation goes through the checked growth path so the configured ceiling
//! is enforced and overflow is an error, never a truncation.

pub mod buffer;

pub use buffer::Buffer;

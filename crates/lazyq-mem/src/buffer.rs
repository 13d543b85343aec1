//! Buffer: a fully drained, immutable, indexable copy of a lazy sequence.
//!
//! Two construction paths:
//! - the source reports an exact length (`size_hint` lower == upper, as every
//!   concrete collection does): one allocation of exactly that size;
//! - otherwise: start at `QueryConfig::initial_buffer_capacity` and double on
//!   overflow, failing with `Error::Overflow` past the ceiling.

use std::mem;
use std::ops::Index;

use lazyq_core::config::QueryConfig;
use lazyq_core::error::{Error, Result};
use lazyq_core::list::List;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer<T> {
    items: Vec<T>,
}

impl<T> Buffer<T> {
    /// Drain `source` with the default configuration.
    pub fn new<I>(source: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        Self::with_config(source, &QueryConfig::default())
    }

    /// Drain `source` exactly once. The configuration is validated before the
    /// first element is pulled.
    pub fn with_config<I>(source: I, config: &QueryConfig) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        config.validate()?;
        let limit = config
            .max_buffer_len
            .unwrap_or(usize::MAX)
            .min(max_representable::<T>());

        let iter = source.into_iter();
        let mut items = Vec::new();
        match iter.size_hint() {
            (lower, Some(upper)) if lower == upper => {
                if lower > limit {
                    return Err(overflow(lower, limit));
                }
                items
                    .try_reserve_exact(lower)
                    .map_err(|e| Error::Overflow(e.to_string()))?;
            }
            _ => {}
        }

        // `iter` is owned by this loop and released when it ends or errors.
        for item in iter {
            let count = items.len();
            if count >= limit {
                return Err(overflow(count.saturating_add(1), limit));
            }
            if count == items.capacity() {
                grow(&mut items, config.initial_buffer_capacity, limit)?;
            }
            items.push(item);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(count = items.len(), capacity = items.capacity(), "buffer drained");

        Ok(Self { items })
    }

    /// Bulk copy of an already materialized slice: one allocation, no growth.
    pub fn from_slice(items: &[T]) -> Self
    where
        T: Clone,
    {
        Self {
            items: items.to_vec(),
        }
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Backing allocation size, in elements.
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    pub fn item(&self, index: usize) -> Result<&T> {
        self.items.get(index).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "index {index} out of range for buffer of {} elements",
                self.items.len()
            ))
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Exact-length copy of the contents.
    pub fn to_array(&self) -> Vec<T>
    where
        T: Clone,
    {
        if self.items.is_empty() {
            return Vec::new();
        }
        self.items.clone()
    }

    /// Exact-length backing vector; unused capacity is trimmed. An empty
    /// buffer yields a vector with no allocation.
    pub fn into_vec(mut self) -> Vec<T> {
        if self.items.is_empty() {
            return Vec::new();
        }
        self.items.shrink_to_fit();
        self.items
    }
}

fn grow<T>(items: &mut Vec<T>, initial: usize, limit: usize) -> Result<()> {
    let count = items.len();
    let target = if count == 0 {
        initial
    } else {
        count.saturating_mul(2)
    }
    .min(limit);

    items
        .try_reserve_exact(target - count)
        .map_err(|e| Error::Overflow(e.to_string()))?;

    #[cfg(feature = "tracing")]
    tracing::trace!(from = count, to = items.capacity(), "buffer grow");

    Ok(())
}

fn max_representable<T>() -> usize {
    match mem::size_of::<T>() {
        0 => usize::MAX,
        size => isize::MAX as usize / size,
    }
}

fn overflow(requested: usize, limit: usize) -> Error {
    Error::Overflow(format!(
        "buffer needs {requested} elements but at most {limit} are representable"
    ))
}

impl<T> List<T> for Buffer<T> {
    fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> Index<usize> for Buffer<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

/// Collects with the default configuration.
///
/// # Panics
/// Panics if the source exceeds the addressable capacity, like `Vec`.
impl<T> FromIterator<T> for Buffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(source: I) -> Self {
        match Self::new(source) {
            Ok(buffer) => buffer,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IntoIterator for Buffer<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Buffer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

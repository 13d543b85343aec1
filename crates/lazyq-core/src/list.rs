//! Read-only list surface.
//!
//! Consumers see groupings and buffers through `List`. The provided mutators
//! always fail with `NotSupported`; owners append through their own
//! crate-private paths while building.

use crate::error::{Error, Result};

pub trait List<T> {
    fn as_slice(&self) -> &[T];

    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    fn push(&mut self, _item: T) -> Result<()> {
        Err(Error::NotSupported("push"))
    }

    fn insert(&mut self, _index: usize, _item: T) -> Result<()> {
        Err(Error::NotSupported("insert"))
    }

    fn remove_at(&mut self, _index: usize) -> Result<T> {
        Err(Error::NotSupported("remove_at"))
    }

    fn clear(&mut self) -> Result<()> {
        Err(Error::NotSupported("clear"))
    }
}

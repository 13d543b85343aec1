//! Deferred reverse: buffers the source at the first pull.

use lazyq_core::config::QueryConfig;
use lazyq_core::error::Result;
use lazyq_mem::Buffer;

#[derive(Clone)]
pub struct Reverse<S> {
    source: S,
    config: QueryConfig,
}

impl<S: IntoIterator + Clone> Reverse<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            config: QueryConfig::default(),
        }
    }

    pub fn with_config(mut self, config: QueryConfig) -> Self {
        self.config = config;
        self
    }

    /// Run one pass now and report buffering failures as errors.
    pub fn try_iter(&self) -> Result<std::iter::Rev<std::vec::IntoIter<S::Item>>> {
        let buffer = Buffer::with_config(self.source.clone(), &self.config)?;
        Ok(buffer.into_vec().into_iter().rev())
    }
}

/// # Panics
/// The first `next()` panics if buffering fails; see `Reverse::try_iter`.
pub struct ReverseIter<S: IntoIterator> {
    pending: Option<(S, QueryConfig)>,
    items: Option<std::iter::Rev<std::vec::IntoIter<S::Item>>>,
}

impl<S: IntoIterator> Iterator for ReverseIter<S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        if let Some((source, config)) = self.pending.take() {
            match Buffer::with_config(source, &config) {
                Ok(buffer) => self.items = Some(buffer.into_vec().into_iter().rev()),
                Err(err) => panic!("{err}"),
            }
        }
        self.items.as_mut()?.next()
    }
}

impl<S: IntoIterator> IntoIterator for Reverse<S> {
    type Item = S::Item;
    type IntoIter = ReverseIter<S>;

    fn into_iter(self) -> Self::IntoIter {
        ReverseIter {
            pending: Some((self.source, self.config)),
            items: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazyq_core::error::Error;

    #[test]
    fn test_reverse() {
        let v = vec![1, 2, 3];
        let rev = Reverse::new(v.iter().copied());
        assert_eq!(rev.clone().into_iter().collect::<Vec<_>>(), vec![3, 2, 1]);
        assert_eq!(rev.into_iter().collect::<Vec<_>>(), vec![3, 2, 1]);
    }

    #[test]
    fn test_try_iter_overflow() {
        let config = QueryConfig::default().with_max_buffer_len(1);
        let rev = Reverse::new(vec![1, 2, 3]).with_config(config);
        assert!(matches!(rev.try_iter(), Err(Error::Overflow(_))));
    }
}

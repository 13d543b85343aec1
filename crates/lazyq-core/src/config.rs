//! Query configuration that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// First allocation (in elements) of a Buffer whose source does not report
    /// an exact length. Doubled on every overflow.
    pub initial_buffer_capacity: usize,

    /// Upper bound on buffered elements. `None` means the platform limit.
    /// Growing past it is an arithmetic overflow, not a silent truncation.
    pub max_buffer_len: Option<usize>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            initial_buffer_capacity: 4,
            max_buffer_len: None,
        }
    }
}

impl QueryConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `LAZYQ_INITIAL_BUFFER_CAPACITY`: first growable-buffer allocation
    /// - `LAZYQ_MAX_BUFFER_LEN`: buffered element ceiling
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("LAZYQ_INITIAL_BUFFER_CAPACITY") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.initial_buffer_capacity = v;
            }
        }

        if let Ok(s) = std::env::var("LAZYQ_MAX_BUFFER_LEN") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.max_buffer_len = Some(v);
            }
        }

        cfg
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.initial_buffer_capacity == 0 {
            return Err(Error::InvalidArgument(
                "initial_buffer_capacity must be at least 1".into(),
            ));
        }
        if self.max_buffer_len == Some(0) {
            return Err(Error::InvalidArgument(
                "max_buffer_len must be at least 1 when set".into(),
            ));
        }
        Ok(())
    }

    pub fn with_initial_buffer_capacity(mut self, capacity: usize) -> Self {
        self.initial_buffer_capacity = capacity;
        self
    }

    pub fn with_max_buffer_len(mut self, len: usize) -> Self {
        self.max_buffer_len = Some(len);
        self
    }
}

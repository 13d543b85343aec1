use thiserror::Error;

/// Canonical result for every lazyq crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A required argument is missing or out of range. Raised eagerly, before
    /// any iteration starts.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Invalid operation: an item with the same key has already been added")]
    DuplicateKey,

    /// Mutation of a frozen collection. Raised on every call.
    #[error("Not supported: {0} on a read-only collection")]
    NotSupported(&'static str),

    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Duplicate keys are reported as their own variant but belong to the
    /// invalid-operation class.
    pub fn is_invalid_operation(&self) -> bool {
        matches!(self, Error::InvalidOperation(_) | Error::DuplicateKey)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}

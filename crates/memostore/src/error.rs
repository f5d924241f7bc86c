//! Error types for memostore

use thiserror::Error;

/// Result type alias for memostore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Strict lookup of a key that is not stored
    #[error("Key not found")]
    KeyNotFound,

    /// Oldest/newest removal on a store with no entries
    #[error("Store is empty")]
    EmptyStore,
}

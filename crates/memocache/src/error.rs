//! Error types for memocache

use std::io;
use thiserror::Error;

/// Result type alias for memocache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache construction and lookup
#[derive(Debug, Error)]
pub enum Error {
    /// Error surfaced by the underlying store
    #[error(transparent)]
    Store(#[from] memostore::Error),

    /// Bounded cache built with a maximum size of 0
    #[error("Cache capacity must be greater than 0")]
    ZeroCapacity,

    /// I/O error while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration could not be parsed
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),
}

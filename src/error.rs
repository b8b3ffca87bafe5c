//! Error types for the task output cache
//!
//! Provides unified error handling using thiserror. A cache miss is never an
//! error; lookups report it as `Ok(None)`.

use std::io;

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache operations.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The backing store failed while looking up an entry
    #[error("Failed to read cache entry {key}: {source}")]
    StoreRead {
        key: String,
        #[source]
        source: io::Error,
    },

    /// The output writer failed while producing the payload
    #[error("Failed to write task output for cache entry {key}: {source}")]
    Writer {
        key: String,
        #[source]
        source: io::Error,
    },

    /// The backing store failed to install a fully buffered payload
    #[error("Failed to store cache entry {key}: {source}")]
    StoreWrite {
        key: String,
        #[source]
        source: io::Error,
    },
}

impl CacheError {
    /// Returns the hash string of the entry the failure concerns.
    pub fn key(&self) -> &str {
        match self {
            CacheError::StoreRead { key, .. }
            | CacheError::Writer { key, .. }
            | CacheError::StoreWrite { key, .. } => key,
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

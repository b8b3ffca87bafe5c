//! Cache Key Module
//!
//! Defines the opaque hash key that task outputs are stored under.

use std::fmt;

// == Task Cache Key ==
/// Content hash identifying one task's outputs.
///
/// The key is opaque to the cache: only its hash string is used, as the lookup
/// key into the backing store. Keys with equal hash strings are the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskCacheKey {
    hash: String,
}

impl TaskCacheKey {
    // == Constructors ==
    /// Creates a key from an already formatted hash string.
    pub fn new(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Creates a key from a raw digest, rendered as lowercase hex.
    pub fn from_hash_bytes(digest: &[u8]) -> Self {
        Self {
            hash: hex::encode(digest),
        }
    }

    // == Hash String ==
    /// Returns the string form of the hash used as the store key.
    pub fn hash_string(&self) -> &str {
        &self.hash
    }
}

impl fmt::Display for TaskCacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hash)
    }
}

impl From<&str> for TaskCacheKey {
    fn from(hash: &str) -> Self {
        Self::new(hash)
    }
}

impl From<String> for TaskCacheKey {
    fn from(hash: String) -> Self {
        Self::new(hash)
    }
}

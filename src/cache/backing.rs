//! Backing Store Module
//!
//! The narrow key/value contract the cache delegates storage to.

use std::io;

use bytes::Bytes;
use dashmap::DashMap;

// == Backing Store ==
/// Associative store mapping hash strings to immutable byte payloads.
///
/// Implementations must be safe to share between threads without external
/// locking, and a single-key `put` must be atomic: a concurrent `get` sees
/// either the previous payload or the new one.
pub trait BackingStore: Send + Sync {
    /// Returns the payload stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> io::Result<Option<Bytes>>;

    /// Stores `value` under `key`, replacing any previous payload.
    fn put(&self, key: String, value: Bytes) -> io::Result<()>;
}

/// In-memory store. Never fails.
impl BackingStore for DashMap<String, Bytes> {
    fn get(&self, key: &str) -> io::Result<Option<Bytes>> {
        // Clone out of the shard guard so no lock outlives the call
        Ok(DashMap::get(self, key).map(|entry| entry.value().clone()))
    }

    fn put(&self, key: String, value: Bytes) -> io::Result<()> {
        self.insert(key, value);
        Ok(())
    }
}

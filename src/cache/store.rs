//! Cache Store Module
//!
//! The task output cache contract and its map-backed implementation.

use std::sync::Arc;

use bytes::Bytes;
use dashmap::DashMap;
use tracing::{debug, info, warn};

use crate::cache::{
    BackingStore, CacheStats, CacheStatsSnapshot, TaskCacheKey, TaskOutputReader,
    TaskOutputWriter,
};
use crate::config::Config;
use crate::error::{CacheError, Result};

// == Task Output Cache ==
/// Stores and retrieves task output payloads by cache key.
pub trait TaskOutputCache: Send + Sync {
    /// Human-readable label identifying this cache.
    fn description(&self) -> &str;

    /// Looks up the output stored for `key`.
    ///
    /// A miss is `Ok(None)`; errors only come from the backing store.
    fn get(&self, key: &TaskCacheKey) -> Result<Option<TaskOutputReader>>;

    /// Runs `output` and stores what it writes under `key`.
    ///
    /// Nothing is stored if the writer fails.
    fn put(&self, key: &TaskCacheKey, output: &dyn TaskOutputWriter) -> Result<()>;
}

// == Map Based Task Output Cache ==
/// Task output cache over a shared key/value [`BackingStore`].
///
/// The cache holds no entries itself; it only translates keys to hash
/// strings and buffers writer output before handing it to the store.
#[derive(Debug)]
pub struct MapBasedTaskOutputCache<S = DashMap<String, Bytes>> {
    /// Label reported for diagnostics
    description: String,
    /// Shared backing store
    store: Arc<S>,
    /// Lookup and store counters
    stats: CacheStats,
}

impl<S: BackingStore> MapBasedTaskOutputCache<S> {
    // == Constructor ==
    /// Creates a cache bound to a shared backing store.
    ///
    /// # Arguments
    /// * `description` - Label reported by [`TaskOutputCache::description`]
    /// * `store` - Backing store, possibly shared with other caches
    pub fn new(description: impl Into<String>, store: Arc<S>) -> Self {
        Self {
            description: description.into(),
            store,
            stats: CacheStats::new(),
        }
    }

    /// Returns the shared backing store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStatsSnapshot {
        self.stats.snapshot()
    }
}

impl MapBasedTaskOutputCache {
    /// Creates a cache over a fresh, empty in-memory map.
    pub fn in_memory(description: impl Into<String>) -> Self {
        Self::new(description, Arc::new(DashMap::new()))
    }

    /// Creates an in-memory cache from configuration.
    pub fn from_config(config: &Config) -> Self {
        info!(
            "Creating task output cache '{}' with initial capacity {}",
            config.description, config.initial_capacity
        );
        Self::new(
            config.description.clone(),
            Arc::new(DashMap::with_capacity(config.initial_capacity)),
        )
    }
}

impl<S: BackingStore> TaskOutputCache for MapBasedTaskOutputCache<S> {
    fn description(&self) -> &str {
        &self.description
    }

    // == Get ==
    fn get(&self, key: &TaskCacheKey) -> Result<Option<TaskOutputReader>> {
        let hash = key.hash_string();

        let payload = self.store.get(hash).map_err(|source| {
            warn!(key = hash, error = %source, "Backing store lookup failed");
            CacheError::StoreRead {
                key: hash.to_string(),
                source,
            }
        })?;

        match payload {
            Some(bytes) => {
                self.stats.record_hit();
                debug!(key = hash, size = bytes.len(), "Task output cache hit");
                Ok(Some(TaskOutputReader::new(bytes)))
            }
            None => {
                self.stats.record_miss();
                debug!(key = hash, "Task output cache miss");
                Ok(None)
            }
        }
    }

    // == Put ==
    fn put(&self, key: &TaskCacheKey, output: &dyn TaskOutputWriter) -> Result<()> {
        let hash = key.hash_string();

        // Buffer the whole payload first so a failing writer never leaves a
        // truncated entry in the store
        let mut buffer = Vec::new();
        if let Err(source) = output.write_to(&mut buffer) {
            self.stats.record_store_failure();
            warn!(key = hash, error = %source, "Task output writer failed, discarding payload");
            return Err(CacheError::Writer {
                key: hash.to_string(),
                source,
            });
        }

        let size = buffer.len();
        if let Err(source) = self.store.put(hash.to_string(), Bytes::from(buffer)) {
            self.stats.record_store_failure();
            warn!(key = hash, error = %source, "Backing store rejected task output");
            return Err(CacheError::StoreWrite {
                key: hash.to_string(),
                source,
            });
        }

        self.stats.record_store(size);
        debug!(key = hash, size, "Stored task output");
        Ok(())
    }
}

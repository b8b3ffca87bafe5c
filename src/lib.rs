//! Task Output Cache - A pluggable cache for build-task outputs
//!
//! Stores task output payloads under a hash of the task inputs, backed by any
//! concurrent key/value byte store.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{
    BackingStore, CacheStats, CacheStatsSnapshot, MapBasedTaskOutputCache, TaskCacheKey,
    TaskOutputCache, TaskOutputReader, TaskOutputWriter,
};
pub use config::Config;
pub use error::{CacheError, Result};

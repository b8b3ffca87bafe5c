//! Cache Module
//!
//! Provides a task output cache over a pluggable concurrent byte store.

mod backing;
mod key;
mod output;
mod stats;
mod store;


// Re-export public types
pub use backing::BackingStore;
pub use key::TaskCacheKey;
pub use output::{TaskOutputReader, TaskOutputWriter};
pub use stats::{CacheStats, CacheStatsSnapshot};
pub use store::{MapBasedTaskOutputCache, TaskOutputCache};

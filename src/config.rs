//! Configuration Module
//!
//! Handles loading cache construction parameters from environment variables.

use std::env;

/// Default label for caches built without an explicit description.
pub const DEFAULT_DESCRIPTION: &str = "in-memory task output cache";

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Human-readable label reported by the cache
    pub description: String,
    /// Number of entries the in-memory store pre-allocates room for
    pub initial_capacity: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `TASK_CACHE_DESCRIPTION` - Cache label (default: "in-memory task output cache")
    /// - `TASK_CACHE_INITIAL_CAPACITY` - Initial map capacity (default: 0)
    pub fn from_env() -> Self {
        Self {
            description: env::var("TASK_CACHE_DESCRIPTION")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            initial_capacity: env::var("TASK_CACHE_INITIAL_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            description: DEFAULT_DESCRIPTION.to_string(),
            initial_capacity: 0,
        }
    }
}

//! Integration Tests for the Task Output Cache
//!
//! Exercises the public API the way a build engine would: shared stores,
//! concurrent callers and trait-object caches.

use std::io::{self, Read, Write};
use std::sync::{Arc, Once};
use std::thread;

use bytes::Bytes;
use dashmap::DashMap;
use task_output_cache::{
    BackingStore, CacheError, Config, MapBasedTaskOutputCache, TaskCacheKey, TaskOutputCache,
};

// == Helper Functions ==

static TRACING: Once = Once::new();

/// Routes cache logs to the test output, filtered by RUST_LOG.
fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "task_output_cache=debug".into()),
            )
            .with_test_writer()
            .try_init();
    });
}

fn put_bytes(cache: &dyn TaskOutputCache, key: &str, payload: &[u8]) {
    cache
        .put(&TaskCacheKey::new(key), &|sink: &mut dyn Write| sink.write_all(payload))
        .unwrap();
}

fn get_bytes(cache: &dyn TaskOutputCache, key: &str) -> Option<Vec<u8>> {
    cache.get(&TaskCacheKey::new(key)).unwrap().map(|reader| {
        let mut buf = Vec::new();
        reader.read().unwrap().read_to_end(&mut buf).unwrap();
        buf
    })
}

// == Lookup Tests ==

#[test]
fn test_get_on_empty_store_is_a_miss() {
    init_tracing();
    let cache = MapBasedTaskOutputCache::in_memory("empty");

    let result = cache.get(&TaskCacheKey::new("nonexistent"));

    assert!(matches!(result, Ok(None)));
}

#[test]
fn test_put_then_get_round_trip() {
    init_tracing();
    let cache = MapBasedTaskOutputCache::in_memory("round trip");

    put_bytes(&cache, "abc123", &[0x01, 0x02, 0x03]);

    assert_eq!(get_bytes(&cache, "abc123"), Some(vec![0x01, 0x02, 0x03]));
}

#[test]
fn test_key_from_digest_matches_hash_string() {
    init_tracing();
    let cache = MapBasedTaskOutputCache::in_memory("digest");
    let key = TaskCacheKey::from_hash_bytes(&[0xde, 0xad, 0xbe, 0xef]);

    cache
        .put(&key, &|sink: &mut dyn Write| sink.write_all(b"outputs"))
        .unwrap();

    assert_eq!(get_bytes(&cache, "deadbeef"), Some(b"outputs".to_vec()));
}

#[test]
fn test_reader_outlives_overwrite() {
    init_tracing();
    let cache = MapBasedTaskOutputCache::in_memory("snapshot");
    put_bytes(&cache, "k", b"old");

    let reader = cache.get(&TaskCacheKey::new("k")).unwrap().unwrap();
    put_bytes(&cache, "k", b"new");

    // The reader keeps the payload it was handed
    let mut buf = Vec::new();
    reader.read().unwrap().read_to_end(&mut buf).unwrap();
    assert_eq!(buf, b"old");
    assert_eq!(get_bytes(&cache, "k"), Some(b"new".to_vec()));
}

// == Shared Store Tests ==

#[test]
fn test_caches_sharing_a_store_see_each_others_entries() {
    init_tracing();
    let store: Arc<DashMap<String, Bytes>> = Arc::new(DashMap::new());
    let local = MapBasedTaskOutputCache::new("local", store.clone());
    let other = MapBasedTaskOutputCache::new("other", store.clone());

    put_bytes(&local, "shared", b"payload");

    assert_eq!(get_bytes(&other, "shared"), Some(b"payload".to_vec()));
    assert_eq!(local.description(), "local");
    assert_eq!(other.description(), "other");
}

#[test]
fn test_entries_written_directly_to_store_are_visible() {
    init_tracing();
    let store: Arc<DashMap<String, Bytes>> = Arc::new(DashMap::new());
    BackingStore::put(&*store, "seeded".to_string(), Bytes::from_static(b"seed")).unwrap();

    let cache = MapBasedTaskOutputCache::new("seeded", store);

    assert_eq!(get_bytes(&cache, "seeded"), Some(b"seed".to_vec()));
}

// == Concurrency Tests ==

#[test]
fn test_concurrent_puts_on_distinct_keys() {
    init_tracing();
    let cache = Arc::new(MapBasedTaskOutputCache::in_memory("concurrent"));

    let handles: Vec<_> = ["k1", "k2"]
        .into_iter()
        .map(|key| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || put_bytes(&*cache, key, key.as_bytes()))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(get_bytes(&*cache, "k1"), Some(b"k1".to_vec()));
    assert_eq!(get_bytes(&*cache, "k2"), Some(b"k2".to_vec()));
}

#[test]
fn test_racing_puts_never_mix_payloads() {
    init_tracing();
    let cache = MapBasedTaskOutputCache::in_memory("racing");
    let first = vec![0xAA; 4096];
    let second = vec![0x55; 4096];

    thread::scope(|scope| {
        for payload in [&first, &second] {
            let cache = &cache;
            scope.spawn(move || {
                for _ in 0..50 {
                    put_bytes(cache, "contended", payload);
                }
            });
        }
        scope.spawn(|| {
            for _ in 0..100 {
                if let Some(bytes) = get_bytes(&cache, "contended") {
                    assert!(bytes == first || bytes == second, "observed a torn entry");
                }
            }
        });
    });

    let stored = get_bytes(&cache, "contended").unwrap();
    assert!(stored == first || stored == second);
}

// == Failure Tests ==

#[test]
fn test_failed_writer_is_distinguishable_from_miss() {
    init_tracing();
    let cache = MapBasedTaskOutputCache::in_memory("failures");
    let key = TaskCacheKey::new("broken");

    let err = cache
        .put(&key, &|sink: &mut dyn Write| -> io::Result<()> {
            sink.write_all(b"partial")?;
            Err(io::Error::new(io::ErrorKind::UnexpectedEof, "task output truncated"))
        })
        .unwrap_err();

    assert!(matches!(err, CacheError::Writer { .. }));
    assert_eq!(err.key(), "broken");
    assert!(matches!(cache.get(&key), Ok(None)));
}

// == Configuration Tests ==

#[test]
fn test_cache_from_default_config() {
    init_tracing();
    let cache = MapBasedTaskOutputCache::from_config(&Config::default());

    assert_eq!(cache.description(), "in-memory task output cache");
    put_bytes(&cache, "k", b"v");
    assert_eq!(cache.stats().stores, 1);
}

//! Expiring key-value cache for API responses.
//!
//! Mirrors the contract of a browser localStorage cache: JSON payloads
//! under string keys, each with an expiry deadline. A read past the
//! deadline is a miss and drops the entry; an unreadable payload is a
//! miss and drops the entry. Capacity is bounded with LRU eviction.

use crate::Result;
use lru::LruCache;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry {
    payload: String,
    expires_at: Instant,
}

/// Shared in-memory cache with per-entry expiry and LRU eviction
#[derive(Debug)]
pub struct TtlCache {
    inner: Arc<Mutex<LruCache<String, CacheEntry>>>,
    default_ttl: Duration,
}

impl TtlCache {
    /// Create a cache holding at most `capacity` entries, expiring them
    /// `default_ttl` after insertion.
    pub fn new(capacity: usize, default_ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(256).unwrap());
        Self {
            inner: Arc::new(Mutex::new(LruCache::new(capacity))),
            default_ttl,
        }
    }

    /// Store a value under `key` with the default expiry
    pub fn insert<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.insert_with_ttl(key, value, self.default_ttl)
    }

    /// Store a value under `key`, expiring after `ttl`
    pub fn insert_with_ttl<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) -> Result<()> {
        let payload = serde_json::to_string(value)?;
        if let Ok(mut cache) = self.inner.lock() {
            cache.put(
                key.to_string(),
                CacheEntry {
                    payload,
                    expires_at: Instant::now() + ttl,
                },
            );
        }
        Ok(())
    }

    /// Fetch a value, treating expired or unparseable entries as misses
    /// and dropping them.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let mut cache = self.inner.lock().ok()?;

        let entry = cache.get(key)?.clone();
        if entry.expires_at <= Instant::now() {
            log::debug!("cache entry {:?} expired", key);
            cache.pop(key);
            return None;
        }

        match serde_json::from_str(&entry.payload) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("dropping unreadable cache entry {:?}: {}", key, e);
                cache.pop(key);
                None
            }
        }
    }

    /// Check for a live entry without refreshing its LRU position
    pub fn contains(&self, key: &str) -> bool {
        self.inner
            .lock()
            .ok()
            .and_then(|cache| {
                cache
                    .peek(key)
                    .map(|entry| entry.expires_at > Instant::now())
            })
            .unwrap_or(false)
    }

    /// Remove an entry, returning whether it was present
    pub fn remove(&self, key: &str) -> bool {
        self.inner
            .lock()
            .ok()
            .map(|mut cache| cache.pop(key).is_some())
            .unwrap_or(false)
    }

    /// Drop every entry
    pub fn clear(&self) {
        if let Ok(mut cache) = self.inner.lock() {
            cache.clear();
        }
    }

    /// Number of stored entries, live or expired
    pub fn len(&self) -> usize {
        self.inner.lock().ok().map(|cache| cache.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Clone for TtlCache {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            default_ttl: self.default_ttl,
        }
    }
}

impl Default for TtlCache {
    fn default() -> Self {
        Self::new(256, Duration::from_secs(30 * 60))
    }
}

/// Builds a normalized cache key: prefix plus the trimmed, lowercased
/// value, so "London " and "london" hit the same entry.
pub fn cache_key(prefix: &str, value: &str) -> String {
    format!("{}-{}", prefix, value.trim().to_lowercase())
}

//! Read-through cache in front of a store using moka
//!
//! Avoids re-reading large collections from slower backends. Writes go to
//! the inner store first; the cache only holds values the inner store
//! accepted.

use crate::{KeyValueStore, StorageResult};
use moka::sync::Cache;
use std::sync::Arc;
use std::time::Duration;

/// Statistics for cache performance monitoring
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    /// Number of entries in cache
    pub entry_count: u64,
}

/// Cache-fronted store
#[derive(Debug, Clone)]
pub struct CachedStore<S> {
    inner: S,
    cache: Cache<String, Arc<str>>,
}

impl<S: KeyValueStore> CachedStore<S> {
    /// Wrap `inner` with a cache holding up to `max_capacity` keys
    #[inline]
    #[must_use]
    pub fn new(inner: S, max_capacity: u64) -> Self {
        Self {
            inner,
            cache: Cache::new(max_capacity),
        }
    }

    /// Cache whose entries also expire after `ttl`
    #[inline]
    #[must_use]
    pub fn with_ttl(inner: S, max_capacity: u64, ttl: Duration) -> Self {
        Self {
            inner,
            cache: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Wrapped store
    #[inline]
    #[must_use]
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Drop every cached entry; the inner store is untouched
    #[inline]
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Whether `key` is currently served from the cache
    #[inline]
    #[must_use]
    pub fn is_cached(&self, key: &str) -> bool {
        self.cache.contains_key(key)
    }

    /// Get cache statistics
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.cache.run_pending_tasks();
        CacheStats {
            entry_count: self.cache.entry_count(),
        }
    }
}

impl<S: KeyValueStore> KeyValueStore for CachedStore<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        if let Some(hit) = self.cache.get(key) {
            return Ok(Some(hit.to_string()));
        }
        let value = self.inner.get(key)?;
        if let Some(v) = &value {
            self.cache.insert(key.to_string(), Arc::from(v.as_str()));
        }
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        if let Err(e) = self.inner.set(key, value) {
            self.cache.invalidate(key);
            return Err(e);
        }
        self.cache.insert(key.to_string(), Arc::from(value));
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.cache.invalidate(key);
        self.inner.remove(key)
    }
}

impl<S: KeyValueStore + Default> Default for CachedStore<S> {
    /// Cache with default capacity (64 keys)
    fn default() -> Self {
        Self::new(S::default(), 64)
    }
}

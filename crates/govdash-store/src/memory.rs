//! In-memory store
//!
//! Stands in for browser local storage, including its quota: with a limit
//! set, a write fails when the total stored bytes would exceed it.

use crate::error::StorageError;
use crate::{KeyValueStore, StorageResult};
use dashmap::DashMap;

/// Map-backed store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    /// Unbounded store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects writes past `quota_bytes` of keys plus values
    #[inline]
    #[must_use]
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: DashMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Bytes currently held, keys included
    #[must_use]
    pub fn used_bytes(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| entry.key().len() + entry.value().len())
            .sum()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        if let Some(limit) = self.quota_bytes {
            let current = self.entries.get(key).map_or(0, |entry| key.len() + entry.value().len());
            let requested = self.used_bytes() - current + key.len() + value.len();
            if requested > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    requested,
                    limit,
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

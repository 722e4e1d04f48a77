//! Storage port for the governance pipeline
//!
//! The pipeline only needs a synchronous string key-value store: one key for
//! the legacy collection, one for the enriched collection. [`KeyValueStore`]
//! is that seam, with three backends:
//!
//! - [`MemoryStore`]: in-process map, optional byte quota
//! - [`FileStore`]: one JSON file per key, atomic replace
//! - [`CachedStore`]: moka cache in front of any other store
//!
//! # Example
//!
//! ```rust
//! use govdash_store::{KeyValueStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! store.set("projects", "[]").unwrap();
//! assert_eq!(store.get("projects").unwrap().as_deref(), Some("[]"));
//! ```

#![warn(unreachable_pub)]

pub mod cache;
pub mod error;
pub mod file;
pub mod memory;

pub use cache::{CacheStats, CachedStore};
pub use error::StorageError;
pub use file::FileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Synchronous string key-value store
///
/// Writes replace the whole value under a key; there are no partial patches.
pub trait KeyValueStore: Send + Sync + std::fmt::Debug {
    /// Read the value under `key`, `None` if absent
    ///
    /// # Errors
    /// Returns error if the backend cannot be read
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the value under `key`
    ///
    /// # Errors
    /// Returns error if the backend rejects the write
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete `key`; deleting an absent key is not an error
    ///
    /// # Errors
    /// Returns error if the backend cannot be written
    fn remove(&self, key: &str) -> StorageResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

/// Shared handle used by the pipeline components
pub type SharedStore = Arc<dyn KeyValueStore>;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

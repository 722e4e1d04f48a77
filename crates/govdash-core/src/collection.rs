//! Whole-collection reads and writes against the storage port

use crate::error::{CacheReadError, CacheWriteError};
use govdash_model::{EnrichedProject, LegacyProject, ProjectRecord, SchemaV2};
use govdash_store::KeyValueStore;
use serde::Serialize;
use serde_json::Value;

/// Raw JSON array stored under `key`
fn read_raw(store: &dyn KeyValueStore, key: &str) -> Result<Vec<Value>, CacheReadError> {
    let payload = store.get(key)?.ok_or_else(|| CacheReadError::Missing {
        key: key.to_string(),
    })?;
    serde_json::from_str(&payload).map_err(|source| CacheReadError::Malformed {
        key: key.to_string(),
        source,
    })
}

/// Enriched collection whose first element carries `schemaVersion: 2`
///
/// Only the marker is checked; elements are left undecoded.
pub(crate) fn read_tagged(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Vec<Value>, CacheReadError> {
    let items = read_raw(store, key)?;
    let tag = match items.first() {
        Some(first) => first.get("schemaVersion").cloned(),
        None => {
            return Err(CacheReadError::Empty {
                key: key.to_string(),
            })
        }
    };
    match tag {
        Some(tag) if tag.as_u64() == Some(SchemaV2::VERSION) => Ok(items),
        other => Err(CacheReadError::VersionMismatch {
            key: key.to_string(),
            found: other.map_or_else(|| "absent".to_string(), |tag| tag.to_string()),
            expected: SchemaV2::VERSION,
        }),
    }
}

/// Fully decoded enriched collection
pub(crate) fn read_enriched(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Vec<EnrichedProject>, CacheReadError> {
    let items = read_tagged(store, key)?;
    serde_json::from_value(Value::Array(items)).map_err(|source| CacheReadError::Malformed {
        key: key.to_string(),
        source,
    })
}

/// Legacy collection; v2-tagged entries are read back as their v1 subset
pub(crate) fn read_legacy(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Vec<LegacyProject>, CacheReadError> {
    read_raw(store, key)?
        .into_iter()
        .map(|item| match ProjectRecord::from_value(item) {
            Ok(ProjectRecord::Legacy(project)) => Ok(project),
            Ok(ProjectRecord::Enriched(project)) => Ok(project.to_legacy()),
            Err(source) => Err(CacheReadError::InvalidRecord {
                key: key.to_string(),
                source,
            }),
        })
        .collect()
}

/// Replace the collection under `key`
pub(crate) fn write<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    items: &[T],
) -> Result<(), CacheWriteError> {
    let payload = serde_json::to_string(items).map_err(|source| CacheWriteError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &payload).map_err(|source| CacheWriteError::Storage {
        key: key.to_string(),
        source,
    })
}

/// Best-effort [`write`]: failures are logged and reported as `false`
pub(crate) fn persist<T: Serialize>(store: &dyn KeyValueStore, key: &str, items: &[T]) -> bool {
    match write(store, key, items) {
        Ok(()) => {
            tracing::debug!(key, count = items.len(), "collection persisted");
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, "collection not persisted; keeping in-memory result");
            false
        }
    }
}

//! Error types for storage backends

use std::path::PathBuf;

/// Errors raised by [`KeyValueStore`](crate::KeyValueStore) backends
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// IO error on a file-backed key
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Key contains characters the backend cannot address
    #[error("invalid storage key: '{0}'")]
    InvalidKey(String),

    /// Write would exceed the configured quota
    #[error("quota exceeded writing '{key}': {requested} bytes requested, {limit} allowed")]
    QuotaExceeded {
        key: String,
        requested: usize,
        limit: usize,
    },

    /// Backend not reachable at all
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

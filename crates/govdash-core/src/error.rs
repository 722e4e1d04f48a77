//! Error types for the project pipeline
//!
//! - [`GovError`]: surfaced to callers (unknown project, bad input)
//! - [`CacheReadError`]: recovered locally by re-migrating
//! - [`CacheWriteError`]: logged and swallowed; the in-memory result stands
//! - [`ConfigError`]: configuration loading

use govdash_model::{ModelError, ProjectId};
use govdash_store::StorageError;
use std::path::PathBuf;

/// Errors surfaced by pipeline operations
#[derive(Debug, thiserror::Error)]
pub enum GovError {
    /// No project with this id in the current collection
    #[error("project not found: {id}")]
    NotFound { id: ProjectId },

    /// A project with this id already exists
    #[error("project already exists: {id}")]
    DuplicateId { id: ProjectId },

    /// Legacy record without an identifier
    #[error("project id must not be empty")]
    EmptyProjectId,

    /// Bundled dataset could not be decoded
    #[error("invalid bundled dataset '{name}': {source}")]
    Dataset {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Record could not be rebuilt after applying a patch
    #[error("invalid update for {id}: {source}")]
    InvalidUpdate {
        id: ProjectId,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl GovError {
    /// Create not-found error
    #[inline]
    pub fn not_found(id: impl Into<ProjectId>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Check if the error names an unknown project
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Why a cached collection could not be used
#[derive(Debug, thiserror::Error)]
pub enum CacheReadError {
    /// Storage backend failed
    #[error("storage unavailable: {0}")]
    Storage(#[from] StorageError),

    /// Nothing stored under the key
    #[error("no collection stored under '{key}'")]
    Missing { key: String },

    /// Payload is not a valid collection
    #[error("malformed collection under '{key}': {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// An element could not be classified as a project record
    #[error("invalid record under '{key}': {source}")]
    InvalidRecord {
        key: String,
        #[source]
        source: ModelError,
    },

    /// Collection stored but empty
    #[error("empty collection under '{key}'")]
    Empty { key: String },

    /// First element is not tagged with the expected schema version
    #[error("collection under '{key}' has schema version {found}, expected {expected}")]
    VersionMismatch {
        key: String,
        found: String,
        expected: u64,
    },
}

/// Persisting a collection failed
#[derive(Debug, thiserror::Error)]
pub enum CacheWriteError {
    /// Backend rejected the write
    #[error("failed to persist '{key}': {source}")]
    Storage {
        key: String,
        #[source]
        source: StorageError,
    },

    /// Collection could not be encoded
    #[error("failed to encode '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML syntax or type error
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Value out of range
    #[error("invalid setting: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Create invalid-setting error
    #[inline]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

/// Result type alias for pipeline operations
pub type GovResult<T> = Result<T, GovError>;

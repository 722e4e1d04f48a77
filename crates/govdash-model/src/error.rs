//! Error types for record decoding

use serde_json::Value;

/// Errors while classifying or decoding project records
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// `schemaVersion` present but not 1 or 2
    #[error("unsupported schema version: {0}")]
    UnsupportedSchemaVersion(Value),

    /// Payload does not match the tagged shape
    #[error("invalid record: {0}")]
    Json(#[from] serde_json::Error),
}

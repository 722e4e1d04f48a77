//! Version-tagged project records
//!
//! Both shapes share most keys, so the variant is chosen from the explicit
//! `schemaVersion` tag rather than from which fields happen to be present.

use crate::enriched::{EnrichedProject, SchemaV2};
use crate::error::ModelError;
use crate::legacy::{LegacyProject, ProjectId};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Legacy record version number
pub const LEGACY_VERSION: u64 = 1;

/// A project in either schema
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectRecord {
    /// v1, flat
    Legacy(LegacyProject),
    /// v2, enriched
    Enriched(Box<EnrichedProject>),
}

impl ProjectRecord {
    /// Classify a raw JSON value by its `schemaVersion` tag
    ///
    /// A missing tag means v1.
    ///
    /// # Errors
    /// Returns error for unknown versions or payloads that do not match the
    /// tagged shape
    pub fn from_value(value: Value) -> Result<Self, ModelError> {
        match value.get("schemaVersion") {
            None => Ok(Self::Legacy(serde_json::from_value(value)?)),
            Some(tag) => match tag.as_u64() {
                Some(LEGACY_VERSION) => Ok(Self::Legacy(serde_json::from_value(value)?)),
                Some(SchemaV2::VERSION) => {
                    Ok(Self::Enriched(Box::new(serde_json::from_value(value)?)))
                }
                _ => Err(ModelError::UnsupportedSchemaVersion(tag.clone())),
            },
        }
    }

    /// Schema version of this record
    #[inline]
    #[must_use]
    pub fn schema_version(&self) -> u64 {
        match self {
            Self::Legacy(_) => LEGACY_VERSION,
            Self::Enriched(_) => SchemaV2::VERSION,
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> &ProjectId {
        match self {
            Self::Legacy(p) => &p.id,
            Self::Enriched(p) => p.id(),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_enriched(&self) -> bool {
        matches!(self, Self::Enriched(_))
    }

    /// Enriched record, if this is one
    #[must_use]
    pub fn into_enriched(self) -> Option<EnrichedProject> {
        match self {
            Self::Enriched(p) => Some(*p),
            Self::Legacy(_) => None,
        }
    }
}

impl Serialize for ProjectRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Legacy(p) => p.serialize(serializer),
            Self::Enriched(p) => p.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for ProjectRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(D::Error::custom)
    }
}

impl From<LegacyProject> for ProjectRecord {
    fn from(value: LegacyProject) -> Self {
        Self::Legacy(value)
    }
}

impl From<EnrichedProject> for ProjectRecord {
    fn from(value: EnrichedProject) -> Self {
        Self::Enriched(Box::new(value))
    }
}

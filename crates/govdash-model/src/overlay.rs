//! Curated enrichment overlays
//!
//! An overlay is hand-authored data for a single project. Only the
//! enrichment blocks are ever applied; every other key an overlay carries
//! lands in [`CuratedOverlay::ignored`] and is never merged.

use crate::audit::AuditEvent;
use crate::enriched::{Finance, Governance, Revenue};
use crate::legacy::ProjectId;
use crate::risk::RiskFlag;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Keys that always come from the legacy record, never from an overlay
pub const SOURCE_OF_TRUTH_FIELDS: &[&str] = &[
    "id",
    "nome",
    "codigo",
    "cliente",
    "status",
    "comite_id",
    "responsavel_id",
    "valor_total",
    "valor_executado",
    "progresso_percentual",
];

/// Hand-authored enrichment for one project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CuratedOverlay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finance: Option<Finance>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<Revenue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub governance: Option<Governance>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risks: Option<Vec<RiskFlag>>,

    /// Curated history, placed before the migration event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_log: Option<Vec<AuditEvent>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity_at: Option<DateTime<Utc>>,

    /// Keys that are never applied
    #[serde(flatten)]
    pub ignored: BTreeMap<String, Value>,
}

impl CuratedOverlay {
    /// Ignored keys that try to override a source-of-truth field
    pub fn shadowed_fields(&self) -> impl Iterator<Item = &str> {
        self.ignored
            .keys()
            .map(String::as_str)
            .filter(|key| SOURCE_OF_TRUTH_FIELDS.contains(key))
    }
}

/// Overlays keyed by project id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverlayCatalog {
    entries: HashMap<ProjectId, CuratedOverlay>,
}

impl OverlayCatalog {
    /// Catalog with no overlays
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a JSON object keyed by project id
    ///
    /// # Errors
    /// Returns error if the document is not a valid overlay map
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Register or replace an overlay
    pub fn insert(&mut self, id: impl Into<ProjectId>, overlay: CuratedOverlay) {
        self.entries.insert(id.into(), overlay);
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: &ProjectId) -> Option<&CuratedOverlay> {
        self.entries.get(id)
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

//! Enriched (v2) project records
//!
//! Superset of [`LegacyProject`] carrying finance, revenue, governance links,
//! risk flags, an audit trail and the derived health score. The legacy keys
//! are flattened into the same JSON object, next to `schemaVersion: 2`.

use crate::audit::AuditLog;
use crate::legacy::{LegacyProject, ProjectId};
use crate::risk::RiskFlag;
use chrono::{DateTime, Utc};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Schema marker that only ever (de)serialises as the literal `2`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SchemaV2;

impl SchemaV2 {
    /// Numeric schema version
    pub const VERSION: u64 = 2;
}

impl Serialize for SchemaV2 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(Self::VERSION)
    }
}

impl<'de> Deserialize<'de> for SchemaV2 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let version = u64::deserialize(deserializer)?;
        if version == Self::VERSION {
            Ok(Self)
        } else {
            Err(D::Error::custom(format!(
                "expected schemaVersion {}, found {version}",
                Self::VERSION
            )))
        }
    }
}

/// Confidence in the cost forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ForecastConfidence {
    Low,
    #[default]
    Medium,
    High,
}

/// Earned-value style cost block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Finance {
    /// Budget at completion
    pub bac: f64,
    /// Actual cost
    pub ac: f64,
    /// Estimate at completion
    pub eac: f64,
    /// Estimate to complete
    pub etc: f64,
    /// `bac - eac`; negative means over budget
    pub variance: f64,
    /// Variance as a percentage of `bac`
    pub variance_pct: f64,
    pub forecast_confidence: ForecastConfidence,
}

/// Billing and collection block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Revenue {
    pub total_contracted: f64,
    pub billed: f64,
    pub received: f64,
    pub to_bill: f64,
    pub to_receive: f64,
}

/// Links into the governance calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Governance {
    #[serde(default)]
    pub deliberation_ids: Vec<String>,
    #[serde(default)]
    pub meeting_ids: Vec<String>,
}

/// Enriched v2 project record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedProject {
    #[serde(rename = "schemaVersion")]
    pub schema_version: SchemaV2,

    /// Legacy fields, always sourced from the v1 record
    #[serde(flatten)]
    pub base: LegacyProject,

    pub finance: Finance,

    pub revenue: Revenue,

    #[serde(default)]
    pub governance: Governance,

    #[serde(default)]
    pub risks: Vec<RiskFlag>,

    pub audit_log: AuditLog,

    pub health_score: u8,

    #[serde(default)]
    pub health_reasons: Vec<String>,

    pub last_activity_at: DateTime<Utc>,
}

impl EnrichedProject {
    #[inline]
    #[must_use]
    pub fn id(&self) -> &ProjectId {
        &self.base.id
    }

    /// Legacy view of this record (the v1 subset)
    #[inline]
    #[must_use]
    pub fn to_legacy(&self) -> LegacyProject {
        self.base.clone()
    }
}

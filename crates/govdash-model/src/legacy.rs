//! Legacy (v1) project records
//!
//! The flat shape the dashboard persisted before the governance upgrade.
//! JSON keys follow the dashboard's storage format, so field names are
//! renamed on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Project identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ProjectId(pub String);

impl ProjectId {
    /// Create identifier from any string-like value
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow as str
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Empty or whitespace-only identifiers cannot be migrated
    #[inline]
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ProjectId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Project lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProjectStatus {
    /// Not started yet
    #[default]
    #[serde(rename = "planejamento")]
    Planning,
    /// Under execution
    #[serde(rename = "em_andamento")]
    InProgress,
    /// Temporarily halted
    #[serde(rename = "pausado")]
    Paused,
    /// Delivered
    #[serde(rename = "concluido")]
    Completed,
    /// Abandoned
    #[serde(rename = "cancelado")]
    Cancelled,
}

impl ProjectStatus {
    /// Wire representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "planejamento",
            Self::InProgress => "em_andamento",
            Self::Paused => "pausado",
            Self::Completed => "concluido",
            Self::Cancelled => "cancelado",
        }
    }

    /// Every status, in lifecycle order
    #[must_use]
    pub fn all() -> [Self; 5] {
        [
            Self::Planning,
            Self::InProgress,
            Self::Paused,
            Self::Completed,
            Self::Cancelled,
        ]
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown project status: '{s}'"))
    }
}

/// Financial impact tier assigned by the owning committee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FinancialImpact {
    #[default]
    #[serde(rename = "baixo")]
    Low,
    #[serde(rename = "medio")]
    Medium,
    #[serde(rename = "alto")]
    High,
    #[serde(rename = "critico")]
    Critical,
}

/// ERP integration flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ErpFlags {
    /// Project mirrored in the ERP
    #[serde(rename = "integrado", default)]
    pub integrated: bool,
    /// Local changes not yet pushed to the ERP
    #[serde(rename = "sincronizacao_pendente", default)]
    pub sync_pending: bool,
}

/// Flat v1 project record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LegacyProject {
    pub id: ProjectId,

    #[serde(rename = "nome", default)]
    pub name: String,

    #[serde(rename = "codigo", default)]
    pub code: String,

    #[serde(rename = "cliente", default)]
    pub client: String,

    #[serde(default)]
    pub status: ProjectStatus,

    /// Owning committee reference
    #[serde(rename = "comite_id", default, skip_serializing_if = "Option::is_none")]
    pub committee_id: Option<String>,

    /// Responsible party reference
    #[serde(rename = "responsavel_id", default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,

    #[serde(rename = "impacto_financeiro", default)]
    pub financial_impact: FinancialImpact,

    /// Total contracted value
    #[serde(rename = "valor_total", default, deserialize_with = "lenient_number")]
    pub total_value: f64,

    /// Value executed so far
    #[serde(rename = "valor_executado", default, deserialize_with = "lenient_number")]
    pub executed_value: f64,

    /// Physical completion, 0-100
    #[serde(rename = "progresso_percentual", default, deserialize_with = "lenient_number")]
    pub progress_pct: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub erp: Option<ErpFlags>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl LegacyProject {
    /// Create record with identity fields; everything else defaults
    #[must_use]
    pub fn new(id: impl Into<ProjectId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// With contracted and executed values
    #[must_use]
    pub fn with_values(mut self, total: f64, executed: f64) -> Self {
        self.total_value = total;
        self.executed_value = executed;
        self
    }

    /// With physical progress
    #[must_use]
    pub fn with_progress(mut self, progress_pct: f64) -> Self {
        self.progress_pct = progress_pct;
        self
    }

    /// With status
    #[must_use]
    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }
}

/// Accepts numbers and numeric strings; anything else reads as 0.
fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0),
        _ => 0.0,
    })
}

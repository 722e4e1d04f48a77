//! Risk flags linked to a project

use serde::{Deserialize, Serialize};

/// Risk severity as rated by the risk committee
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskSeverity {
    #[serde(rename = "baixa")]
    Low,
    #[serde(rename = "media")]
    Medium,
    #[serde(rename = "alta")]
    High,
    #[serde(rename = "critica")]
    Critical,
}

/// Treatment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RiskStatus {
    #[default]
    #[serde(rename = "aberto")]
    Open,
    #[serde(rename = "monitorando")]
    Monitoring,
    #[serde(rename = "encerrado")]
    Closed,
}

/// Risk entry attached to a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFlag {
    pub id: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "severidade")]
    pub severity: RiskSeverity,
    #[serde(default)]
    pub status: RiskStatus,
}

impl RiskFlag {
    /// Open risk
    #[must_use]
    pub fn open(id: impl Into<String>, title: impl Into<String>, severity: RiskSeverity) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            severity,
            status: RiskStatus::Open,
        }
    }

    /// Still being treated (open or monitored)
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status != RiskStatus::Closed
    }

    /// Active and rated high or critical
    #[inline]
    #[must_use]
    pub fn is_flagged(&self) -> bool {
        self.is_active() && self.severity >= RiskSeverity::High
    }
}

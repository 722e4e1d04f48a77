//! Audited partial updates of enriched projects
//!
//! A [`ProjectPatch`] names record keys and their new values. Every key
//! whose value actually changes produces one [`AuditEvent`]; the record is
//! then rescored, persisted and mirrored into the legacy collection.

use crate::error::{GovError, GovResult};
use crate::legacy::LegacySource;
use crate::migrator::SchemaMigrator;
use chrono::{DateTime, Utc};
use govdash_model::{
    AuditAction, AuditEvent, EnrichedProject, ErpFlags, Finance, FinancialImpact, Governance,
    ProjectId, ProjectStatus, Revenue, RiskFlag,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Partial update of a project
///
/// Serialises with the record's own keys, so patch keys and audit paths
/// match the stored JSON. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectPatch {
    #[serde(rename = "nome", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "codigo", skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(rename = "cliente", skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,

    #[serde(rename = "comite_id", skip_serializing_if = "Option::is_none")]
    pub committee_id: Option<String>,

    #[serde(rename = "responsavel_id", skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,

    #[serde(rename = "impacto_financeiro", skip_serializing_if = "Option::is_none")]
    pub financial_impact: Option<FinancialImpact>,

    #[serde(rename = "valor_total", skip_serializing_if = "Option::is_none")]
    pub total_value: Option<f64>,

    #[serde(rename = "valor_executado", skip_serializing_if = "Option::is_none")]
    pub executed_value: Option<f64>,

    #[serde(rename = "progresso_percentual", skip_serializing_if = "Option::is_none")]
    pub progress_pct: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub erp: Option<ErpFlags>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub finance: Option<Finance>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue: Option<Revenue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub governance: Option<Governance>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub risks: Option<Vec<RiskFlag>>,
}

impl ProjectPatch {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_total_value(mut self, value: f64) -> Self {
        self.total_value = Some(value);
        self
    }

    #[must_use]
    pub fn with_executed_value(mut self, value: f64) -> Self {
        self.executed_value = Some(value);
        self
    }

    #[must_use]
    pub fn with_progress(mut self, progress_pct: f64) -> Self {
        self.progress_pct = Some(progress_pct);
        self
    }

    #[must_use]
    pub fn with_finance(mut self, finance: Finance) -> Self {
        self.finance = Some(finance);
        self
    }

    #[must_use]
    pub fn with_governance(mut self, governance: Governance) -> Self {
        self.governance = Some(governance);
        self
    }

    #[must_use]
    pub fn with_risks(mut self, risks: Vec<RiskFlag>) -> Self {
        self.risks = Some(risks);
        self
    }

    /// Patch sets no field
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn to_fields(&self) -> Result<Map<String, Value>, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(fields) => Ok(fields),
            _ => Ok(Map::new()),
        }
    }
}

/// Apply a patch to one record, returning the changed record and its
/// audit events
///
/// Keys are compared as JSON values; equal values produce no event.
/// Events are ordered by key.
///
/// # Errors
/// Returns [`GovError::InvalidUpdate`] if the patched record no longer
/// decodes
pub fn apply_patch(
    project: &EnrichedProject,
    patch: &ProjectPatch,
    actor: &str,
    now: DateTime<Utc>,
) -> GovResult<(EnrichedProject, Vec<AuditEvent>)> {
    let invalid = |source| GovError::InvalidUpdate {
        id: project.id().clone(),
        source,
    };

    let mut record = match serde_json::to_value(project).map_err(invalid)? {
        Value::Object(fields) => fields,
        _ => Map::new(),
    };

    let mut events = Vec::new();
    for (key, after) in patch.to_fields().map_err(invalid)? {
        let before = record.get(&key).cloned().unwrap_or(Value::Null);
        if before == after {
            continue;
        }
        events.push(AuditEvent::field_change(
            key.as_str(),
            before.to_string(),
            after.to_string(),
            actor,
            AuditAction::Updated,
            now,
        ));
        record.insert(key, after);
    }

    let updated: EnrichedProject = serde_json::from_value(Value::Object(record)).map_err(invalid)?;
    Ok((updated, events))
}

/// Applies audited updates to the enriched collection
#[derive(Debug, Clone)]
pub struct ProjectUpdateService {
    migrator: SchemaMigrator,
    legacy: LegacySource,
}

impl ProjectUpdateService {
    #[must_use]
    pub fn new(migrator: SchemaMigrator, legacy: LegacySource) -> Self {
        Self { migrator, legacy }
    }

    /// Apply `patch` to project `id` on behalf of `actor`
    ///
    /// The returned record is authoritative even if persisting or mirroring
    /// fails; both are logged and otherwise ignored.
    ///
    /// # Errors
    /// Returns [`GovError::NotFound`] if `id` is not in the v2 collection
    pub fn update_project_v2(
        &self,
        id: &ProjectId,
        patch: &ProjectPatch,
        actor: &str,
    ) -> GovResult<EnrichedProject> {
        let mut projects = self.migrator.load_or_migrate(&self.legacy.load());
        let index = projects
            .iter()
            .position(|p| p.id() == id)
            .ok_or_else(|| GovError::not_found(id.clone()))?;

        let now = Utc::now();
        let (mut updated, events) = apply_patch(&projects[index], patch, actor, now)?;
        let changed = events.len();
        updated.audit_log.append_all(events);
        updated.last_activity_at = now;
        self.migrator.scorer().refresh(&mut updated);

        projects[index] = updated.clone();
        self.migrator.persist(&projects);
        self.legacy.mirror(&updated);

        tracing::info!(
            project = %id,
            actor,
            changed,
            health_score = updated.health_score,
            "project updated"
        );
        Ok(updated)
    }
}

//! v1 -> v2 schema migration
//!
//! [`SchemaMigrator`] upgrades legacy records into [`EnrichedProject`]s:
//!
//! 1. [`ComputedDefaults`] synthesises finance, revenue and the migration
//!    audit event from the legacy totals
//! 2. a [`CuratedOverlay`], when one exists for the id, replaces the
//!    enrichment blocks; identity and monetary fields stay legacy-sourced
//! 3. the [`HealthScorer`] fills in the score
//!
//! The enriched collection is cached under a fixed storage key and served
//! verbatim while it stays valid.

use crate::collection;
use crate::config::{GovConfig, MigrationPolicy, StorageKeys};
use crate::error::{CacheReadError, GovError, GovResult};
use crate::health::HealthScorer;
use chrono::{DateTime, Utc};
use govdash_model::{
    AuditEvent, AuditLog, CuratedOverlay, EnrichedProject, Finance, ForecastConfidence,
    Governance, LegacyProject, OverlayCatalog, Revenue, RiskFlag, SchemaV2,
};
use govdash_store::SharedStore;
use std::sync::Arc;

/// Round a monetary amount to cents
#[inline]
#[must_use]
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// v2 blocks synthesised from a legacy record alone
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedDefaults {
    pub finance: Finance,
    pub revenue: Revenue,
    pub governance: Governance,
    pub risks: Vec<RiskFlag>,
    pub migration_event: AuditEvent,
    pub last_activity_at: DateTime<Utc>,
}

impl ComputedDefaults {
    /// Derive the v2 blocks
    ///
    /// The estimate assumes the project lands on budget until told otherwise.
    #[must_use]
    pub fn synthesize(legacy: &LegacyProject, policy: &MigrationPolicy, now: DateTime<Utc>) -> Self {
        let total = legacy.total_value;
        let executed = legacy.executed_value;

        let finance = Finance {
            bac: total,
            ac: executed,
            eac: total,
            etc: round_cents(total - executed),
            variance: 0.0,
            variance_pct: 0.0,
            forecast_confidence: forecast_confidence(legacy.progress_pct),
        };

        let billed = executed;
        let received = round_cents(billed * policy.received_ratio);
        let revenue = Revenue {
            total_contracted: total,
            billed,
            received,
            to_bill: round_cents(total - billed),
            to_receive: round_cents(billed - received),
        };

        Self {
            finance,
            revenue,
            governance: Governance::default(),
            risks: Vec::new(),
            migration_event: AuditEvent::migration(&legacy.id, now),
            last_activity_at: legacy.created_at.unwrap_or(now),
        }
    }

    /// Build the enriched record, applying the overlay's enrichment blocks
    ///
    /// Legacy fields are copied from `legacy` as a whole; nothing in the
    /// overlay can reach them. The overlay's own audit history precedes the
    /// migration event.
    #[must_use]
    pub fn merge(self, legacy: &LegacyProject, overlay: Option<&CuratedOverlay>) -> EnrichedProject {
        let mut project = EnrichedProject {
            schema_version: SchemaV2,
            base: legacy.clone(),
            finance: self.finance,
            revenue: self.revenue,
            governance: self.governance,
            risks: self.risks,
            audit_log: AuditLog::new(),
            health_score: 0,
            health_reasons: Vec::new(),
            last_activity_at: self.last_activity_at,
        };

        if let Some(overlay) = overlay {
            for field in overlay.shadowed_fields() {
                tracing::debug!(
                    project = %legacy.id,
                    field,
                    "overlay value ignored; field is sourced from the legacy record"
                );
            }
            if let Some(finance) = overlay.finance {
                project.finance = finance;
            }
            if let Some(revenue) = overlay.revenue {
                project.revenue = revenue;
            }
            if let Some(governance) = &overlay.governance {
                project.governance = governance.clone();
            }
            if let Some(risks) = &overlay.risks {
                project.risks = risks.clone();
            }
            if let Some(events) = &overlay.audit_log {
                project.audit_log.append_all(events.iter().cloned());
            }
            if let Some(at) = overlay.last_activity_at {
                project.last_activity_at = at;
            }
        }

        project.audit_log.append(self.migration_event);
        project
    }
}

fn forecast_confidence(progress_pct: f64) -> ForecastConfidence {
    if progress_pct < 25.0 {
        ForecastConfidence::Low
    } else if progress_pct < 75.0 {
        ForecastConfidence::Medium
    } else {
        ForecastConfidence::High
    }
}

/// Upgrades legacy records and caches the enriched collection
#[derive(Debug, Clone)]
pub struct SchemaMigrator {
    store: SharedStore,
    overlays: Arc<OverlayCatalog>,
    policy: MigrationPolicy,
    scorer: HealthScorer,
    keys: StorageKeys,
}

impl SchemaMigrator {
    /// Migrator without overlays
    #[must_use]
    pub fn new(store: SharedStore, config: &GovConfig) -> Self {
        Self {
            store,
            overlays: Arc::new(OverlayCatalog::empty()),
            policy: config.migration,
            scorer: HealthScorer::new(config.health),
            keys: config.storage.clone(),
        }
    }

    /// With curated overlays
    #[must_use]
    pub fn with_overlays(mut self, overlays: OverlayCatalog) -> Self {
        self.overlays = Arc::new(overlays);
        self
    }

    #[inline]
    #[must_use]
    pub fn scorer(&self) -> &HealthScorer {
        &self.scorer
    }

    #[inline]
    #[must_use]
    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    #[inline]
    #[must_use]
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Whether a usable enriched collection is cached
    ///
    /// True only for a non-empty collection whose first element is tagged
    /// `schemaVersion: 2`.
    #[must_use]
    pub fn is_migrated(&self) -> bool {
        collection::read_tagged(self.store.as_ref(), &self.keys.enriched_key).is_ok()
    }

    /// Upgrade one record, timestamped now
    ///
    /// # Errors
    /// Returns [`GovError::EmptyProjectId`] for records without an id
    pub fn migrate_one(&self, legacy: &LegacyProject) -> GovResult<EnrichedProject> {
        self.migrate_one_at(legacy, Utc::now())
    }

    /// Upgrade one record with an explicit clock reading
    ///
    /// Same inputs and `now` always give the same record.
    ///
    /// # Errors
    /// Returns [`GovError::EmptyProjectId`] for records without an id
    pub fn migrate_one_at(
        &self,
        legacy: &LegacyProject,
        now: DateTime<Utc>,
    ) -> GovResult<EnrichedProject> {
        if legacy.id.is_blank() {
            return Err(GovError::EmptyProjectId);
        }
        let defaults = ComputedDefaults::synthesize(legacy, &self.policy, now);
        let mut project = defaults.merge(legacy, self.overlays.get(&legacy.id));
        self.scorer.refresh(&mut project);
        Ok(project)
    }

    /// Upgrade every record in order and overwrite the cached collection
    ///
    /// Records without an id are skipped. A failed write is logged; the
    /// migrated collection is returned regardless.
    pub fn migrate_all(&self, legacy: &[LegacyProject]) -> Vec<EnrichedProject> {
        let now = Utc::now();
        let projects: Vec<_> = legacy
            .iter()
            .enumerate()
            .filter_map(|(index, record)| match self.migrate_one_at(record, now) {
                Ok(project) => Some(project),
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping legacy record");
                    None
                }
            })
            .collect();

        collection::persist(self.store.as_ref(), &self.keys.enriched_key, &projects);
        tracing::info!(
            migrated = projects.len(),
            skipped = legacy.len() - projects.len(),
            "legacy projects migrated to v2"
        );
        projects
    }

    /// Cached enriched collection, or a fresh migration if the cache is unusable
    ///
    /// Never fails: every cache problem is treated as a miss.
    pub fn load_or_migrate(&self, legacy: &[LegacyProject]) -> Vec<EnrichedProject> {
        match self.read_cached() {
            Ok(projects) => {
                tracing::debug!(count = projects.len(), "serving cached v2 collection");
                projects
            }
            Err(CacheReadError::Missing { .. }) => {
                tracing::debug!("no cached v2 collection; migrating");
                self.migrate_all(legacy)
            }
            Err(e) => {
                tracing::warn!(error = %e, "cached v2 collection unusable; migrating");
                self.migrate_all(legacy)
            }
        }
    }

    /// Decode the cached enriched collection
    ///
    /// # Errors
    /// Returns why the cache cannot be used
    pub fn read_cached(&self) -> Result<Vec<EnrichedProject>, CacheReadError> {
        collection::read_enriched(self.store.as_ref(), &self.keys.enriched_key)
    }

    /// Overwrite the cached enriched collection (best effort)
    pub(crate) fn persist(&self, projects: &[EnrichedProject]) -> bool {
        collection::persist(self.store.as_ref(), &self.keys.enriched_key, projects)
    }
}

//! Project repository facade
//!
//! Composes the legacy source, migrator and update service over one shared
//! store. Callers go through [`ProjectRepository`] for every read and write.

use crate::config::GovConfig;
use crate::error::{GovError, GovResult};
use crate::health::HealthReport;
use crate::legacy::LegacySource;
use crate::migrator::SchemaMigrator;
use crate::seed;
use crate::update::{ProjectPatch, ProjectUpdateService};
use chrono::Utc;
use govdash_model::{
    AuditAction, AuditEvent, EnrichedProject, LegacyProject, OverlayCatalog, ProjectId,
};
use govdash_store::SharedStore;
use serde_json::Value;

/// Entry point for project reads and writes
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    legacy: LegacySource,
    migrator: SchemaMigrator,
    updates: ProjectUpdateService,
}

impl ProjectRepository {
    /// Repository over `store` with explicit overlays and seed
    #[must_use]
    pub fn new(
        store: SharedStore,
        config: &GovConfig,
        overlays: OverlayCatalog,
        seed: Vec<LegacyProject>,
    ) -> Self {
        let legacy = LegacySource::new(store.clone(), config.storage.legacy_key.clone(), seed);
        let migrator = SchemaMigrator::new(store, config).with_overlays(overlays);
        let updates = ProjectUpdateService::new(migrator.clone(), legacy.clone());
        Self {
            legacy,
            migrator,
            updates,
        }
    }

    /// Repository seeded with the bundled datasets
    ///
    /// # Errors
    /// Returns [`GovError::Dataset`] if a bundled dataset does not decode
    pub fn bundled(store: SharedStore, config: &GovConfig) -> GovResult<Self> {
        Ok(Self::new(
            store,
            config,
            seed::bundled_overlays()?,
            seed::bundled_projects()?,
        ))
    }

    #[inline]
    #[must_use]
    pub fn migrator(&self) -> &SchemaMigrator {
        &self.migrator
    }

    /// Legacy collection, seeded when storage has none
    pub fn load_legacy(&self) -> Vec<LegacyProject> {
        self.legacy.load()
    }

    /// Whether the cached v2 collection is usable
    #[must_use]
    pub fn is_migrated(&self) -> bool {
        self.migrator.is_migrated()
    }

    /// Enriched collection, migrating on a cache miss
    pub fn list(&self) -> Vec<EnrichedProject> {
        self.migrator.load_or_migrate(&self.load_legacy())
    }

    /// Discard the cached v2 collection and migrate again
    pub fn remigrate(&self) -> Vec<EnrichedProject> {
        self.migrator.migrate_all(&self.load_legacy())
    }

    /// One enriched project
    ///
    /// # Errors
    /// Returns [`GovError::NotFound`] for unknown ids
    pub fn get(&self, id: &ProjectId) -> GovResult<EnrichedProject> {
        self.list()
            .into_iter()
            .find(|p| p.id() == id)
            .ok_or_else(|| GovError::not_found(id.clone()))
    }

    /// Freshly computed health of one project
    ///
    /// # Errors
    /// Returns [`GovError::NotFound`] for unknown ids
    pub fn health(&self, id: &ProjectId) -> GovResult<HealthReport> {
        let project = self.get(id)?;
        Ok(self.migrator.scorer().score(&project))
    }

    /// Register a new project in both collections
    ///
    /// The enriched record carries the migration event followed by a
    /// creation event attributed to `actor`.
    ///
    /// # Errors
    /// Returns [`GovError::EmptyProjectId`] or [`GovError::DuplicateId`]
    pub fn create(&self, legacy: LegacyProject, actor: &str) -> GovResult<EnrichedProject> {
        if legacy.id.is_blank() {
            return Err(GovError::EmptyProjectId);
        }
        // v2 first: a cache miss here must not pick up the new record
        let mut projects = self.list();
        let mut legacy_projects = self.load_legacy();
        if projects.iter().any(|p| p.id() == &legacy.id)
            || legacy_projects.iter().any(|p| p.id == legacy.id)
        {
            return Err(GovError::DuplicateId { id: legacy.id });
        }

        let now = Utc::now();
        let mut project = self.migrator.migrate_one_at(&legacy, now)?;
        project.audit_log.append(AuditEvent::field_change(
            "id",
            Value::Null.to_string(),
            Value::String(legacy.id.to_string()).to_string(),
            actor,
            AuditAction::Created,
            now,
        ));

        legacy_projects.push(legacy);
        self.legacy.save(&legacy_projects);
        projects.push(project.clone());
        self.migrator.persist(&projects);

        tracing::info!(project = %project.id(), actor, "project created");
        Ok(project)
    }

    /// Remove a project from both collections
    ///
    /// # Errors
    /// Returns [`GovError::NotFound`] if neither collection holds `id`
    pub fn delete(&self, id: &ProjectId) -> GovResult<()> {
        let mut projects = self.list();
        let mut legacy_projects = self.load_legacy();

        let enriched_before = projects.len();
        projects.retain(|p| p.id() != id);
        let legacy_before = legacy_projects.len();
        legacy_projects.retain(|p| &p.id != id);

        let removed_enriched = projects.len() != enriched_before;
        let removed_legacy = legacy_projects.len() != legacy_before;
        if !removed_enriched && !removed_legacy {
            return Err(GovError::not_found(id.clone()));
        }
        if removed_legacy {
            self.legacy.save(&legacy_projects);
        }
        if removed_enriched {
            self.migrator.persist(&projects);
        }

        tracing::info!(project = %id, "project deleted");
        Ok(())
    }

    /// Apply an audited partial update
    ///
    /// # Errors
    /// Returns [`GovError::NotFound`] for unknown ids
    pub fn update(
        &self,
        id: &ProjectId,
        patch: &ProjectPatch,
        actor: &str,
    ) -> GovResult<EnrichedProject> {
        self.updates.update_project_v2(id, patch, actor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use govdash_model::{ProjectStatus, RiskSeverity};
    use govdash_store::KeyValueStore;
    use govdash_test_utils::{legacy_project, memory_store, overlay_catalog, overlay_with_risk, p1};

    fn repository() -> (std::sync::Arc<govdash_store::MemoryStore>, ProjectRepository) {
        let store = memory_store();
        let repo = ProjectRepository::new(
            store.clone(),
            &GovConfig::default(),
            OverlayCatalog::empty(),
            vec![p1(), legacy_project("p2", 10.0, 5.0, 50.0)],
        );
        (store, repo)
    }

    #[test]
    fn list_seeds_and_migrates() {
        let (store, repo) = repository();
        let projects = repo.list();
        assert_eq!(projects.len(), 2);
        assert!(repo.is_migrated());
        assert!(store.get("projects").unwrap().is_some());
    }

    #[test]
    fn get_unknown_is_not_found() {
        let (_, repo) = repository();
        assert!(repo.get(&ProjectId::new("nope")).unwrap_err().is_not_found());
        assert!(repo.health(&ProjectId::new("nope")).unwrap_err().is_not_found());
    }

    #[test]
    fn create_appends_to_both_collections() {
        let (_, repo) = repository();
        let created = repo
            .create(legacy_project("p3", 500.0, 100.0, 20.0), "ana")
            .unwrap();

        let actions: Vec<_> = created.audit_log.iter().map(AuditEvent::action).collect();
        assert_eq!(actions, [AuditAction::Migrated, AuditAction::Created]);
        assert_eq!(created.audit_log.last().unwrap().after(), "\"p3\"");

        assert_eq!(repo.list().len(), 3);
        assert!(repo.load_legacy().iter().any(|p| p.id.as_str() == "p3"));
        assert_eq!(repo.get(&ProjectId::new("p3")).unwrap(), created);
    }

    #[test]
    fn create_rejects_duplicates_and_blank_ids() {
        let (_, repo) = repository();
        let err = repo.create(p1(), "ana").unwrap_err();
        assert!(matches!(err, GovError::DuplicateId { .. }));

        let err = repo.create(legacy_project("", 1.0, 0.0, 0.0), "ana").unwrap_err();
        assert!(matches!(err, GovError::EmptyProjectId));
    }

    #[test]
    fn delete_removes_from_both() {
        let (_, repo) = repository();
        repo.delete(&ProjectId::new("p1")).unwrap();

        assert!(repo.get(&ProjectId::new("p1")).unwrap_err().is_not_found());
        assert!(repo.load_legacy().iter().all(|p| p.id.as_str() != "p1"));
        assert!(repo.delete(&ProjectId::new("p1")).unwrap_err().is_not_found());
    }

    #[test]
    fn update_is_visible_through_both_collections() {
        let (_, repo) = repository();
        let patch = ProjectPatch::new().with_status(ProjectStatus::Paused);
        let updated = repo.update(&ProjectId::new("p1"), &patch, "ana").unwrap();

        assert_eq!(repo.get(&ProjectId::new("p1")).unwrap(), updated);
        let legacy = repo.load_legacy();
        assert_eq!(legacy[0].status, ProjectStatus::Paused);
    }

    #[test]
    fn overlay_risks_lower_health() {
        let repo = ProjectRepository::new(
            memory_store(),
            &GovConfig::default(),
            overlay_catalog([("p1", overlay_with_risk(RiskSeverity::Critical))]),
            vec![p1()],
        );
        let id = ProjectId::new("p1");
        let project = repo.get(&id).unwrap();
        assert_eq!(project.health_score, 80);
        assert_eq!(project.governance.deliberation_ids, ["del-001"]);
        assert_eq!(repo.health(&id).unwrap().reasons, project.health_reasons);
    }

    #[test]
    fn bundled_repository_applies_overlays() {
        let repo = ProjectRepository::bundled(memory_store(), &GovConfig::default()).unwrap();
        let p2 = repo.get(&ProjectId::new("p2")).unwrap();
        assert_eq!(p2.base.name, "Linha de Transmissão LT-230kV Serra Azul");
        assert_eq!(p2.base.total_value, 2_500_000.0);
        assert_eq!(p2.health_score, 45);
        assert_eq!(p2.audit_log.len(), 2);
    }
}

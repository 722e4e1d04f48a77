//! Legacy (v1) collection access
//!
//! The v1 collection stays the record of identity. It is read on every
//! migration pass and kept in step with updates, creates and deletes.

use crate::collection;
use crate::error::CacheReadError;
use govdash_model::{EnrichedProject, LegacyProject, ProjectId};
use govdash_store::SharedStore;
use std::sync::Arc;

/// Reads and writes the legacy collection, falling back to a seed dataset
#[derive(Debug, Clone)]
pub struct LegacySource {
    store: SharedStore,
    key: String,
    seed: Arc<[LegacyProject]>,
}

impl LegacySource {
    #[must_use]
    pub fn new(store: SharedStore, key: impl Into<String>, seed: Vec<LegacyProject>) -> Self {
        Self {
            store,
            key: key.into(),
            seed: seed.into(),
        }
    }

    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    #[must_use]
    pub fn seed(&self) -> &[LegacyProject] {
        &self.seed
    }

    /// Stored legacy collection, or the seed when none is usable
    ///
    /// A missing collection is seeded and persisted. An unreadable one is
    /// left untouched in storage and the seed is served in its place.
    pub fn load(&self) -> Vec<LegacyProject> {
        match collection::read_legacy(self.store.as_ref(), &self.key) {
            Ok(projects) => projects,
            Err(CacheReadError::Missing { .. }) => {
                tracing::info!(key = %self.key, count = self.seed.len(), "seeding legacy collection");
                collection::persist(self.store.as_ref(), &self.key, &self.seed[..]);
                self.seed.to_vec()
            }
            Err(e) => {
                tracing::warn!(error = %e, "legacy collection unreadable; serving seed dataset");
                self.seed.to_vec()
            }
        }
    }

    /// Replace the stored legacy collection (best effort)
    pub fn save(&self, projects: &[LegacyProject]) -> bool {
        collection::persist(self.store.as_ref(), &self.key, projects)
    }

    /// Copy the v1-visible fields of an updated record back into the
    /// legacy collection
    ///
    /// Only name, status, values and progress are mirrored. Returns `false`
    /// when the id is not in the legacy collection or the write failed.
    pub fn mirror(&self, project: &EnrichedProject) -> bool {
        let mut projects = self.load();
        let Some(legacy) = projects.iter_mut().find(|p| &p.id == project.id()) else {
            tracing::debug!(project = %project.id(), "no legacy record to mirror into");
            return false;
        };
        legacy.name.clone_from(&project.base.name);
        legacy.status = project.base.status;
        legacy.total_value = project.base.total_value;
        legacy.executed_value = project.base.executed_value;
        legacy.progress_pct = project.base.progress_pct;
        self.save(&projects)
    }

    /// Whether an id is present in the legacy collection
    #[must_use]
    pub fn contains(&self, id: &ProjectId) -> bool {
        self.load().iter().any(|p| &p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use govdash_model::ProjectStatus;
    use govdash_store::KeyValueStore;
    use govdash_test_utils::{enriched_project, finance, legacy_project, memory_store, p1};

    #[test]
    fn missing_collection_is_seeded_and_persisted() {
        let store = memory_store();
        let source = LegacySource::new(store.clone(), "projects", vec![p1()]);

        let projects = source.load();
        assert_eq!(projects, vec![p1()]);
        assert!(store.get("projects").unwrap().is_some());
    }

    #[test]
    fn corrupt_collection_is_not_overwritten() {
        let store = memory_store();
        store.set("projects", "not json").unwrap();
        let source = LegacySource::new(store.clone(), "projects", vec![p1()]);

        assert_eq!(source.load(), vec![p1()]);
        assert_eq!(store.get("projects").unwrap().as_deref(), Some("not json"));
    }

    #[test]
    fn empty_collection_is_valid() {
        let store = memory_store();
        store.set("projects", "[]").unwrap();
        let source = LegacySource::new(store, "projects", vec![p1()]);
        assert!(source.load().is_empty());
    }

    #[test]
    fn mirror_copies_visible_fields_only() {
        let store = memory_store();
        let mut stored = p1();
        stored.client = "Cliente Original".to_string();
        let source = LegacySource::new(store, "projects", Vec::new());
        source.save(&[stored, legacy_project("p2", 1.0, 0.0, 0.0)]);

        let mut updated = enriched_project("p1", finance(150_000.0, 40_000.0, 150_000.0, 110_000.0), 55.0);
        updated.base.name = "Renomeado".to_string();
        updated.base.status = ProjectStatus::Paused;
        updated.base.client = "Outro Cliente".to_string();
        assert!(source.mirror(&updated));

        let projects = source.load();
        let first = &projects[0];
        assert_eq!(first.name, "Renomeado");
        assert_eq!(first.status, ProjectStatus::Paused);
        assert_eq!(first.total_value, 150_000.0);
        assert_eq!(first.progress_pct, 55.0);
        assert_eq!(first.client, "Cliente Original");
        assert_eq!(projects.len(), 2);
    }

    #[test]
    fn mirror_of_unknown_id_is_noop() {
        let source = LegacySource::new(memory_store(), "projects", Vec::new());
        source.save(&[p1()]);
        let other = enriched_project("zz", finance(1.0, 0.0, 1.0, 1.0), 0.0);
        assert!(!source.mirror(&other));
        assert!(!source.contains(&ProjectId::new("zz")));
        assert!(source.contains(&ProjectId::new("p1")));
    }
}

//! End-to-end pipeline scenarios over in-memory and mocked storage

use govdash_core::{GovConfig, ProjectPatch, ProjectRepository, SchemaMigrator};
use govdash_model::{AuditAction, OverlayCatalog, ProjectId, ProjectStatus};
use govdash_store::{KeyValueStore, StorageError, StorageResult};
use govdash_test_utils::{legacy_project, memory_store, p1};
use mockall::mock;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

mock! {
    pub Store {}

    impl KeyValueStore for Store {
        fn get(&self, key: &str) -> StorageResult<Option<String>>;
        fn set(&self, key: &str, value: &str) -> StorageResult<()>;
        fn remove(&self, key: &str) -> StorageResult<()>;
    }
}

impl std::fmt::Debug for MockStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockStore").finish()
    }
}

fn repository() -> (Arc<govdash_store::MemoryStore>, ProjectRepository) {
    let store = memory_store();
    let repo = ProjectRepository::new(
        store.clone(),
        &GovConfig::default(),
        OverlayCatalog::empty(),
        vec![p1()],
    );
    (store, repo)
}

#[test]
fn test_p1_migration_scenario() {
    let (_, repo) = repository();
    let project = repo.get(&ProjectId::new("p1")).unwrap();

    assert_eq!(project.finance.bac, 100_000.0);
    assert_eq!(project.finance.ac, 40_000.0);
    assert_eq!(project.finance.etc, 60_000.0);
    assert_eq!(project.revenue.billed, 40_000.0);
    assert_eq!(project.revenue.received, 32_000.0);
    assert_eq!(project.revenue.to_receive, 8_000.0);
    assert_eq!(project.audit_log.len(), 1);
    assert_eq!(project.audit_log.events()[0].after(), "2");
    assert_eq!(project.health_score, 100);
}

#[test]
fn test_status_update_scenario() {
    let (_, repo) = repository();
    let id = ProjectId::new("p1");
    let before = repo.get(&id).unwrap();

    let patch = ProjectPatch::new().with_status(ProjectStatus::Paused);
    let after = repo.update(&id, &patch, "secretaria").unwrap();

    assert_eq!(after.audit_log.len(), before.audit_log.len() + 1);
    let event = after.audit_log.last().unwrap();
    assert_eq!(event.path(), "status");
    assert_eq!(event.before(), "\"em_andamento\"");
    assert_eq!(event.after(), "\"pausado\"");
    assert_eq!(event.actor(), "secretaria");
    assert_eq!(event.action(), AuditAction::Updated);
    assert_eq!(after.finance, before.finance);
    assert_eq!(after.revenue, before.revenue);
    assert!(after.last_activity_at >= before.last_activity_at);
}

#[test]
fn test_repeated_update_adds_no_events() {
    let (_, repo) = repository();
    let id = ProjectId::new("p1");
    let patch = ProjectPatch::new().with_status(ProjectStatus::Paused);

    let first = repo.update(&id, &patch, "secretaria").unwrap();
    let second = repo.update(&id, &patch, "secretaria").unwrap();
    assert_eq!(second.audit_log, first.audit_log);
}

#[test]
fn test_repeated_fractional_progress_adds_no_events() {
    let (_, repo) = repository();
    let id = ProjectId::new("p1");
    let progress = 28.934_486_930_003_246;
    let patch = ProjectPatch::new().with_progress(progress);

    let first = repo.update(&id, &patch, "ana").unwrap();
    let second = repo.update(&id, &patch, "ana").unwrap();
    assert_eq!(second.audit_log.len(), first.audit_log.len());
    assert_eq!(repo.get(&id).unwrap().base.progress_pct.to_bits(), progress.to_bits());
}

#[test]
fn test_update_unknown_project_is_not_found() {
    let (store, repo) = repository();
    repo.list();
    let cached = store.get("projects_v2").unwrap();

    let err = repo
        .update(&ProjectId::new("ghost"), &ProjectPatch::new().with_name("x"), "ana")
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.get("projects_v2").unwrap(), cached);
}

#[test]
fn test_update_rescores_project() {
    let (_, repo) = repository();
    let id = ProjectId::new("p1");
    let mut finance = repo.get(&id).unwrap().finance;
    finance.eac = 130_000.0;
    finance.etc = 90_000.0;

    let updated = repo
        .update(&id, &ProjectPatch::new().with_finance(finance), "controladoria")
        .unwrap();
    assert_eq!(updated.health_score, 60);
    assert_eq!(updated.health_reasons.len(), 1);
    assert_eq!(repo.health(&id).unwrap().score, 60);
}

#[test]
fn test_corrupt_cache_falls_back_to_migration() {
    let (store, repo) = repository();
    store.set("projects_v2", "{definitely not json").unwrap();

    let projects = repo.list();
    assert_eq!(projects.len(), 1);
    assert!(repo.is_migrated());
}

#[test]
fn test_stale_schema_version_falls_back_to_migration() {
    let (store, repo) = repository();
    store
        .set("projects_v2", &json!([{ "id": "old", "schemaVersion": 1 }]).to_string())
        .unwrap();

    let projects = repo.list();
    assert_eq!(projects[0].id().as_str(), "p1");
}

#[test]
fn test_v2_records_in_legacy_key_are_downgraded() {
    let (store, repo) = repository();
    let enriched = repo.list();
    store
        .set("projects", &serde_json::to_string(&enriched).unwrap())
        .unwrap();

    let legacy = repo.load_legacy();
    assert_eq!(legacy, vec![p1()]);
}

#[test]
fn test_failed_writes_are_swallowed() {
    let mut store = MockStore::new();
    let seed = serde_json::to_string(&vec![p1()]).unwrap();
    store.expect_get().returning(move |key| match key {
        "projects" => Ok(Some(seed.clone())),
        _ => Ok(None),
    });
    store
        .expect_set()
        .returning(|_, _| Err(StorageError::Unavailable("quota exceeded".to_string())));

    let migrator = SchemaMigrator::new(Arc::new(store), &GovConfig::default());
    let projects = migrator.load_or_migrate(&[p1()]);
    assert_eq!(projects.len(), 1);
    assert!(!migrator.is_migrated());
}

#[test]
fn test_update_survives_failed_persistence() {
    let mut store = MockStore::new();
    let seed = serde_json::to_string(&vec![p1()]).unwrap();
    store.expect_get().returning(move |key| match key {
        "projects" => Ok(Some(seed.clone())),
        _ => Ok(None),
    });
    store
        .expect_set()
        .returning(|key, _| Err(StorageError::QuotaExceeded {
            key: key.to_string(),
            requested: 1,
            limit: 0,
        }));

    let repo = ProjectRepository::new(
        Arc::new(store),
        &GovConfig::default(),
        OverlayCatalog::empty(),
        Vec::new(),
    );
    let updated = repo
        .update(
            &ProjectId::new("p1"),
            &ProjectPatch::new().with_progress(55.0),
            "ana",
        )
        .unwrap();
    assert_eq!(updated.base.progress_pct, 55.0);
    assert_eq!(updated.audit_log.len(), 2);
}

#[test]
fn test_storage_read_failure_migrates_seed() {
    let mut store = MockStore::new();
    store
        .expect_get()
        .returning(|_| Err(StorageError::Unavailable("offline".to_string())));
    store.expect_set().returning(|_, _| Ok(()));

    let repo = ProjectRepository::new(
        Arc::new(store),
        &GovConfig::default(),
        OverlayCatalog::empty(),
        vec![p1(), legacy_project("p2", 1.0, 0.0, 0.0)],
    );
    assert_eq!(repo.list().len(), 2);
}

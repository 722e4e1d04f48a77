//! Property tests for migration, scoring and audited updates

use chrono::{DateTime, TimeZone, Utc};
use govdash_core::{compute_health_score, GovConfig, ProjectPatch, ProjectRepository, SchemaMigrator};
use govdash_model::{
    CuratedOverlay, LegacyProject, OverlayCatalog, ProjectId, ProjectStatus, RiskFlag,
    RiskSeverity, RiskStatus,
};
use govdash_test_utils::{enriched_project, finance, memory_store, shared_store};
use proptest::prelude::*;
use serde_json::json;

fn status() -> impl Strategy<Value = ProjectStatus> {
    prop::sample::select(ProjectStatus::all().to_vec())
}

fn severity() -> impl Strategy<Value = RiskSeverity> {
    prop::sample::select(vec![
        RiskSeverity::Low,
        RiskSeverity::Medium,
        RiskSeverity::High,
        RiskSeverity::Critical,
    ])
}

fn risk_status() -> impl Strategy<Value = RiskStatus> {
    prop::sample::select(vec![RiskStatus::Open, RiskStatus::Monitoring, RiskStatus::Closed])
}

fn risk() -> impl Strategy<Value = RiskFlag> {
    ("[a-z]{1,6}", severity(), risk_status()).prop_map(|(id, severity, status)| {
        let mut flag = RiskFlag::open(id.clone(), format!("Risco {id}"), severity);
        flag.status = status;
        flag
    })
}

fn legacy() -> impl Strategy<Value = LegacyProject> {
    (
        "[a-z][a-z0-9]{0,8}",
        0.0..10_000_000.0f64,
        0.0..10_000_000.0f64,
        0.0..=100.0f64,
        status(),
    )
        .prop_map(|(id, total, executed, progress, status)| {
            LegacyProject::new(id, "Projeto")
                .with_values(total, executed)
                .with_progress(progress)
                .with_status(status)
        })
}

fn clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

proptest! {
    #[test]
    fn prop_score_stays_within_bounds(
        bac in -1_000.0..1_000_000.0f64,
        ac in 0.0..1_000_000.0f64,
        eac in -1_000.0..2_000_000.0f64,
        etc in -1_000.0..2_000_000.0f64,
        progress in -50.0..150.0f64,
        risks in proptest::collection::vec(risk(), 0..12)
    ) {
        let mut project = enriched_project("p", finance(bac, ac, eac, etc), progress);
        project.risks = risks;
        let report = compute_health_score(&project);
        prop_assert!(report.score <= 100);
        prop_assert_eq!(report.score == 100, report.reasons.is_empty());
    }

    #[test]
    fn prop_migration_is_idempotent(record in legacy()) {
        let migrator = SchemaMigrator::new(shared_store(), &GovConfig::default());
        let first = migrator.migrate_one_at(&record, clock()).unwrap();
        let second = migrator.migrate_one_at(&record, clock()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_overlay_never_overrides_identity(
        record in legacy(),
        fake_name in "[A-Z][a-z]{2,10}",
        fake_total in 0.0..1_000.0f64,
        fake_status in status(),
        risks in proptest::collection::vec(risk(), 0..4)
    ) {
        let mut overlay: CuratedOverlay = serde_json::from_value(json!({
            "id": "outro",
            "nome": fake_name,
            "status": fake_status,
            "valor_total": fake_total,
            "valor_executado": fake_total,
            "progresso_percentual": 99,
        })).unwrap();
        overlay.risks = Some(risks.clone());

        let mut catalog = OverlayCatalog::empty();
        catalog.insert(record.id.clone(), overlay);
        let migrator = SchemaMigrator::new(shared_store(), &GovConfig::default()).with_overlays(catalog);

        let project = migrator.migrate_one_at(&record, clock()).unwrap();
        prop_assert_eq!(&project.base, &record);
        prop_assert_eq!(project.risks, risks);
        prop_assert_eq!(project.audit_log.last().unwrap().after(), "2");
    }

    #[test]
    fn prop_audit_log_is_append_only(
        steps in proptest::collection::vec((status(), 0.0..=100.0f64), 1..6)
    ) {
        let repo = ProjectRepository::new(
            memory_store(),
            &GovConfig::default(),
            OverlayCatalog::empty(),
            vec![LegacyProject::new("p1", "Projeto").with_values(1_000.0, 100.0)],
        );
        let id = ProjectId::new("p1");
        let mut previous = repo.get(&id).unwrap().audit_log;

        for (status, progress) in steps {
            let patch = ProjectPatch::new().with_status(status).with_progress(progress);
            let current = repo.update(&id, &patch, "prop").unwrap().audit_log;
            prop_assert!(current.len() >= previous.len());
            prop_assert_eq!(&current.events()[..previous.len()], previous.events());
            previous = current;
        }
    }
}

//! Testing utilities for the govdash workspace
//!
//! Shared fixtures: legacy and enriched project records, a fixed clock and
//! in-memory stores.

#![allow(missing_docs)]

use chrono::{DateTime, TimeZone, Utc};
use govdash_model::{
    AuditEvent, AuditLog, CuratedOverlay, EnrichedProject, Finance, ForecastConfidence,
    Governance, LegacyProject, OverlayCatalog, ProjectStatus, Revenue, RiskFlag, RiskSeverity,
    SchemaV2,
};
use govdash_store::{MemoryStore, SharedStore};
use std::sync::Arc;

/// 2024-03-01T12:00:00Z
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

pub fn legacy_project(id: &str, total: f64, executed: f64, progress: f64) -> LegacyProject {
    LegacyProject::new(id, format!("Projeto {id}"))
        .with_values(total, executed)
        .with_progress(progress)
        .with_status(ProjectStatus::InProgress)
}

/// Reference record: 100k contracted, 40k executed, 40% done
pub fn p1() -> LegacyProject {
    legacy_project("p1", 100_000.0, 40_000.0, 40.0)
}

/// Finance block with variance derived from `bac` and `eac`
pub fn finance(bac: f64, ac: f64, eac: f64, etc: f64) -> Finance {
    let variance = bac - eac;
    Finance {
        bac,
        ac,
        eac,
        etc,
        variance,
        variance_pct: if bac > 0.0 { variance / bac * 100.0 } else { 0.0 },
        forecast_confidence: ForecastConfidence::Medium,
    }
}

/// Enriched record with a migration event, no risks and a full score
pub fn enriched_project(id: &str, finance: Finance, progress: f64) -> EnrichedProject {
    let base = LegacyProject::new(id, format!("Projeto {id}"))
        .with_values(finance.bac, finance.ac)
        .with_progress(progress)
        .with_status(ProjectStatus::InProgress);
    let mut audit_log = AuditLog::new();
    audit_log.append(AuditEvent::migration(&base.id, fixed_time()));
    EnrichedProject {
        schema_version: SchemaV2,
        base,
        finance,
        revenue: Revenue::default(),
        governance: Governance::default(),
        risks: Vec::new(),
        audit_log,
        health_score: 100,
        health_reasons: Vec::new(),
        last_activity_at: fixed_time(),
    }
}

/// Overlay attaching governance links and one open risk
pub fn overlay_with_risk(severity: RiskSeverity) -> CuratedOverlay {
    CuratedOverlay {
        governance: Some(Governance {
            deliberation_ids: vec!["del-001".to_string()],
            meeting_ids: vec!["reu-001".to_string()],
        }),
        risks: Some(vec![RiskFlag::open("r1", "Atraso na licença", severity)]),
        ..CuratedOverlay::default()
    }
}

pub fn overlay_catalog(entries: impl IntoIterator<Item = (&'static str, CuratedOverlay)>) -> OverlayCatalog {
    let mut catalog = OverlayCatalog::empty();
    for (id, overlay) in entries {
        catalog.insert(id, overlay);
    }
    catalog
}

pub fn memory_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}

pub fn shared_store() -> SharedStore {
    memory_store()
}

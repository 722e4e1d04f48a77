//! Governance project pipeline
//!
//! Upgrades flat legacy project records to the enriched v2 shape, scores
//! their health and applies audited updates, all over a pluggable
//! [`KeyValueStore`](govdash_store::KeyValueStore).
//!
//! - [`SchemaMigrator`]: idempotent v1 -> v2 migration with a cached collection
//! - [`HealthScorer`]: 0-100 score with ordered reasons
//! - [`ProjectUpdateService`]: field-level audit events on every change
//! - [`ProjectRepository`]: the facade composing all of the above
//!
//! # Example
//!
//! ```rust
//! use govdash_core::{GovConfig, ProjectPatch, ProjectRepository};
//! use govdash_model::{ProjectId, ProjectStatus};
//! use govdash_store::MemoryStore;
//! use std::sync::Arc;
//!
//! let repo = ProjectRepository::bundled(Arc::new(MemoryStore::new()), &GovConfig::default()).unwrap();
//! let id = ProjectId::new("p1");
//!
//! let before = repo.get(&id).unwrap();
//! assert_eq!(before.health_score, 100);
//!
//! let patch = ProjectPatch::new().with_status(ProjectStatus::Paused);
//! let after = repo.update(&id, &patch, "secretaria").unwrap();
//! assert_eq!(after.audit_log.len(), before.audit_log.len() + 1);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod collection;
pub mod config;
pub mod error;
pub mod health;
pub mod legacy;
pub mod migrator;
pub mod repository;
pub mod seed;
pub mod update;

pub use config::{GovConfig, HealthThresholds, MigrationPolicy, StorageKeys};
pub use error::{CacheReadError, CacheWriteError, ConfigError, GovError, GovResult};
pub use health::{compute_health_score, HealthReport, HealthScorer, BASELINE_SCORE};
pub use legacy::LegacySource;
pub use migrator::{round_cents, ComputedDefaults, SchemaMigrator};
pub use repository::ProjectRepository;
pub use seed::{bundled_overlays, bundled_projects};
pub use update::{apply_patch, ProjectPatch, ProjectUpdateService};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

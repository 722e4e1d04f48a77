//! Governance project records
//!
//! Two shapes of the same project:
//!
//! - [`LegacyProject`]: the flat v1 record the dashboard stored originally
//! - [`EnrichedProject`]: the v2 record with finance, revenue, governance
//!   links, risks, an append-only [`AuditLog`] and a health score
//!
//! [`ProjectRecord`] tells them apart by the explicit `schemaVersion` tag.
//!
//! # Example
//!
//! ```rust
//! use govdash_model::{ProjectRecord, LegacyProject};
//!
//! let json = serde_json::json!({ "id": "p1", "nome": "Usina Solar", "valor_total": "1200" });
//! let record = ProjectRecord::from_value(json).unwrap();
//! assert_eq!(record.schema_version(), 1);
//!
//! let legacy: LegacyProject = serde_json::from_str(r#"{"id":"p1"}"#).unwrap();
//! assert_eq!(legacy.total_value, 0.0);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod audit;
pub mod enriched;
pub mod error;
pub mod legacy;
pub mod overlay;
pub mod record;
pub mod risk;

pub use audit::{AuditAction, AuditEvent, AuditEventId, AuditLog, SYSTEM_ACTOR};
pub use enriched::{EnrichedProject, Finance, ForecastConfidence, Governance, Revenue, SchemaV2};
pub use error::ModelError;
pub use legacy::{ErpFlags, FinancialImpact, LegacyProject, ProjectId, ProjectStatus};
pub use overlay::{CuratedOverlay, OverlayCatalog, SOURCE_OF_TRUTH_FIELDS};
pub use record::{ProjectRecord, LEGACY_VERSION};
pub use risk::{RiskFlag, RiskSeverity, RiskStatus};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Datasets compiled into the library
//!
//! `data/projects.json` seeds an empty legacy collection;
//! `data/overlays.json` holds the curated enrichment applied on migration.

use crate::error::{GovError, GovResult};
use govdash_model::{LegacyProject, OverlayCatalog};

const PROJECTS_JSON: &str = include_str!("../data/projects.json");
const OVERLAYS_JSON: &str = include_str!("../data/overlays.json");

/// Seed legacy collection
///
/// # Errors
/// Returns [`GovError::Dataset`] if the bundled file does not decode
pub fn bundled_projects() -> GovResult<Vec<LegacyProject>> {
    serde_json::from_str(PROJECTS_JSON).map_err(|source| GovError::Dataset {
        name: "projects.json",
        source,
    })
}

/// Curated overlays keyed by project id
///
/// # Errors
/// Returns [`GovError::Dataset`] if the bundled file does not decode
pub fn bundled_overlays() -> GovResult<OverlayCatalog> {
    OverlayCatalog::from_json(OVERLAYS_JSON).map_err(|source| GovError::Dataset {
        name: "overlays.json",
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use govdash_model::ProjectId;
    use std::collections::HashSet;

    #[test]
    fn bundled_projects_decode_with_unique_ids() {
        let projects = bundled_projects().unwrap();
        assert!(!projects.is_empty());
        let ids: HashSet<_> = projects.iter().map(|p| &p.id).collect();
        assert_eq!(ids.len(), projects.len());
        assert!(projects.iter().all(|p| !p.id.is_blank()));
    }

    #[test]
    fn numeric_strings_in_seed_are_parsed() {
        let projects = bundled_projects().unwrap();
        let p2 = projects.iter().find(|p| p.id.as_str() == "p2").unwrap();
        assert_eq!(p2.total_value, 2_500_000.0);
        assert_eq!(p2.executed_value, 1_750_000.0);
    }

    #[test]
    fn bundled_overlays_reference_seed_projects() {
        let projects = bundled_projects().unwrap();
        let overlays = bundled_overlays().unwrap();
        assert!(!overlays.is_empty());
        let p2 = overlays.get(&ProjectId::new("p2")).unwrap();
        assert!(p2.shadowed_fields().any(|field| field == "nome"));
        assert!(projects.iter().any(|p| overlays.get(&p.id).is_some()));
    }
}

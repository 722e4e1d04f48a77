//! Pipeline configuration
//!
//! Loaded from TOML; every section is optional and falls back to the
//! defaults the dashboard shipped with.
//!
//! ```toml
//! [storage]
//! legacy_key = "projects"
//! enriched_key = "projects_v2"
//!
//! [migration]
//! received_ratio = 0.8
//!
//! [health]
//! cost_overrun_threshold_pct = 5.0
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Full pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GovConfig {
    /// Storage keys of both collections
    pub storage: StorageKeys,
    /// Migration policy constants
    pub migration: MigrationPolicy,
    /// Health score thresholds and deductions
    pub health: HealthThresholds,
}

impl GovConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate TOML
    ///
    /// # Errors
    /// Returns error if the document is malformed or fails validation
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or is invalid
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// With storage keys
    #[inline]
    #[must_use]
    pub fn with_storage(mut self, storage: StorageKeys) -> Self {
        self.storage = storage;
        self
    }

    /// With received-of-billed ratio
    #[inline]
    #[must_use]
    pub fn with_received_ratio(mut self, ratio: f64) -> Self {
        self.migration.received_ratio = ratio;
        self
    }

    /// With health thresholds
    #[inline]
    #[must_use]
    pub fn with_health(mut self, health: HealthThresholds) -> Self {
        self.health = health;
        self
    }

    /// Check value ranges
    ///
    /// # Errors
    /// Returns the first invalid setting found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.legacy_key.is_empty() || self.storage.enriched_key.is_empty() {
            return Err(ConfigError::invalid("storage keys must not be empty"));
        }
        if self.storage.legacy_key == self.storage.enriched_key {
            return Err(ConfigError::invalid("legacy and enriched keys must differ"));
        }
        if !(0.0..=1.0).contains(&self.migration.received_ratio) {
            return Err(ConfigError::invalid(format!(
                "migration.received_ratio must be within [0, 1], got {}",
                self.migration.received_ratio
            )));
        }
        let h = &self.health;
        if h.cost_overrun_threshold_pct < 0.0 || h.schedule_slip_threshold_pct < 0.0 {
            return Err(ConfigError::invalid("health thresholds must be non-negative"));
        }
        Ok(())
    }
}

/// Storage keys of the two collections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    /// Legacy (v1) collection
    pub legacy_key: String,
    /// Enriched (v2) collection
    pub enriched_key: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            legacy_key: "projects".to_string(),
            enriched_key: "projects_v2".to_string(),
        }
    }
}

/// Policy constants used when synthesising v2 blocks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationPolicy {
    /// Share of billed value assumed received when no richer data exists
    pub received_ratio: f64,
}

impl Default for MigrationPolicy {
    fn default() -> Self {
        Self {
            received_ratio: 0.8,
        }
    }
}

/// Health score thresholds and deductions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthThresholds {
    /// Cost overrun (%) above which the first deduction applies
    pub cost_overrun_threshold_pct: f64,
    /// Deduction above the threshold
    pub cost_overrun_deduction: u8,
    /// Deduction above 10% overrun
    pub cost_overrun_major_deduction: u8,
    /// Deduction above 20% overrun
    pub cost_overrun_severe_deduction: u8,
    /// Consumed-versus-progress gap (percentage points) tolerated
    pub schedule_slip_threshold_pct: f64,
    /// Cap on the schedule deduction
    pub max_schedule_deduction: u8,
    /// Deduction per active high-severity risk
    pub high_risk_deduction: u8,
    /// Deduction per active critical risk
    pub critical_risk_deduction: u8,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            cost_overrun_threshold_pct: 5.0,
            cost_overrun_deduction: 15,
            cost_overrun_major_deduction: 25,
            cost_overrun_severe_deduction: 40,
            schedule_slip_threshold_pct: 10.0,
            max_schedule_deduction: 30,
            high_risk_deduction: 10,
            critical_risk_deduction: 20,
        }
    }
}

//! Append-only audit trail
//!
//! [`AuditEvent`]s are immutable once built: fields are private and only
//! readable. [`AuditLog`] exposes appends and reads, never edits or removals.

use crate::legacy::ProjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Actor recorded on machine-generated events
pub const SYSTEM_ACTOR: &str = "system";

/// Audit event identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditEventId(pub String);

impl AuditEventId {
    /// Fresh, time-sortable identifier
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Deterministic identifier of a project's v1 to v2 migration event
    #[inline]
    #[must_use]
    pub fn migration(project: &ProjectId) -> Self {
        Self(format!("{project}:migration:v2"))
    }
}

impl fmt::Display for AuditEventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What produced the event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    /// Schema upgrade
    Migrated,
    /// Field changed through an update
    Updated,
    /// Project registered
    Created,
}

/// One field-level change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    id: AuditEventId,
    path: String,
    before: String,
    after: String,
    timestamp: DateTime<Utc>,
    actor: String,
    action: AuditAction,
}

impl AuditEvent {
    /// Schema version transition 1 -> 2, attributed to the system actor
    #[must_use]
    pub fn migration(project: &ProjectId, at: DateTime<Utc>) -> Self {
        Self {
            id: AuditEventId::migration(project),
            path: "schemaVersion".to_string(),
            before: "1".to_string(),
            after: "2".to_string(),
            timestamp: at,
            actor: SYSTEM_ACTOR.to_string(),
            action: AuditAction::Migrated,
        }
    }

    /// Field change with already-serialised before/after values
    #[must_use]
    pub fn field_change(
        path: impl Into<String>,
        before: impl Into<String>,
        after: impl Into<String>,
        actor: impl Into<String>,
        action: AuditAction,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AuditEventId::generate(),
            path: path.into(),
            before: before.into(),
            after: after.into(),
            timestamp: at,
            actor: actor.into(),
            action,
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> &AuditEventId {
        &self.id
    }

    /// Record key that changed
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// JSON-serialised previous value
    #[inline]
    #[must_use]
    pub fn before(&self) -> &str {
        &self.before
    }

    /// JSON-serialised new value
    #[inline]
    #[must_use]
    pub fn after(&self) -> &str {
        &self.after
    }

    #[inline]
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    #[inline]
    #[must_use]
    pub fn actor(&self) -> &str {
        &self.actor
    }

    #[inline]
    #[must_use]
    pub fn action(&self) -> AuditAction {
        self.action
    }
}

/// Ordered, append-only sequence of audit events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct AuditLog(Vec<AuditEvent>);

impl AuditLog {
    /// Empty log
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one event
    #[inline]
    pub fn append(&mut self, event: AuditEvent) {
        self.0.push(event);
    }

    /// Append events preserving their order
    #[inline]
    pub fn append_all(&mut self, events: impl IntoIterator<Item = AuditEvent>) {
        self.0.extend(events);
    }

    #[inline]
    #[must_use]
    pub fn events(&self) -> &[AuditEvent] {
        &self.0
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Most recent event
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&AuditEvent> {
        self.0.last()
    }

    /// Iterate oldest first
    pub fn iter(&self) -> impl Iterator<Item = &AuditEvent> {
        self.0.iter()
    }
}

impl From<Vec<AuditEvent>> for AuditLog {
    fn from(events: Vec<AuditEvent>) -> Self {
        Self(events)
    }
}

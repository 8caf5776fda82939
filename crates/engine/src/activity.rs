//! Activity stream interface.
//!
//! The activity stream itself is an external collaborator; the engine only
//! emits records through this narrow sink and never waits on the result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};

/// One recorded activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Acting user or system identity.
    pub actor: String,
    /// What happened (e.g., "Posted").
    pub verb: String,
    /// What it happened to (e.g., a transaction number).
    pub target: String,
    /// When the record was captured.
    pub recorded_at: DateTime<Utc>,
}

/// Sink for activity records, fire-and-forget from the engine's perspective.
pub trait ActivitySink: Send + Sync {
    /// Records a single activity.
    fn record(&self, actor: &str, verb: &str, target: &str);
}

/// Activity sink that keeps records in memory, mainly for tests and audits.
#[derive(Debug, Default)]
pub struct MemoryActivityLog {
    records: Mutex<Vec<ActivityRecord>>,
}

impl MemoryActivityLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all recorded activities.
    #[must_use]
    pub fn records(&self) -> Vec<ActivityRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ActivitySink for MemoryActivityLog {
    fn record(&self, actor: &str, verb: &str, target: &str) {
        let record = ActivityRecord {
            actor: actor.to_string(),
            verb: verb.to_string(),
            target: target.to_string(),
            recorded_at: Utc::now(),
        };
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }
}

/// Activity sink that drops every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopActivity;

impl ActivitySink for NoopActivity {
    fn record(&self, _actor: &str, _verb: &str, _target: &str) {}
}

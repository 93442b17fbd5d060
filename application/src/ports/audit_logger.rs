//! Port for the structured audit trail.
//!
//! Defines the [`AuditLogger`] trait for recording engine activity
//! (lifecycle commands, completed rounds, decisions, config changes) to a
//! structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures machine-readable
//! records (JSONL).

use serde_json::Value;

/// A structured audit record.
///
/// Each record has a type string and a JSON payload. The adapter adds the
/// timestamp when it writes the record.
pub struct AuditRecord {
    /// Record type identifier (e.g., "lifecycle", "decision", "round_completed").
    pub record_type: &'static str,
    /// JSON payload with record-specific data.
    pub payload: Value,
}

impl AuditRecord {
    pub fn new(record_type: &'static str, payload: Value) -> Self {
        Self {
            record_type,
            payload,
        }
    }
}

/// Port for writing audit records.
///
/// `log` is synchronous and infallible; adapters swallow write failures so
/// that auditing never disturbs a round.
pub trait AuditLogger: Send + Sync {
    fn log(&self, record: AuditRecord);
}

/// No-op implementation for tests and when auditing is disabled.
pub struct NoAuditLogger;

impl AuditLogger for NoAuditLogger {
    fn log(&self, _record: AuditRecord) {}
}

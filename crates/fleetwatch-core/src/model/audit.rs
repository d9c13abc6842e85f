// ── Audit log entry ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One operator-visible mutation, appended to the audit table.
///
/// Sync runs are not audited (they are wholesale replaces, not
/// operator actions); today the only producer is alert resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub action: String,
    pub entity_type: String,
    pub entity_uid: String,
    pub details: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl AuditEntry {
    /// Entry for a resolved alert.
    pub fn alert_resolved(alert_uid: &str, now: DateTime<Utc>) -> Self {
        Self {
            action: "resolve".to_owned(),
            entity_type: "alert".to_owned(),
            entity_uid: alert_uid.to_owned(),
            details: serde_json::json!({ "status": "resolved" }),
            created_at: now,
        }
    }
}

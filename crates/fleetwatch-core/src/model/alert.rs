// ── Alert domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Alert severity as reported by the source.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AlertSeverity {
    #[default]
    Low,
    Medium,
    High,
    Critical,
    Info,
    Warning,
}

/// Alert lifecycle status. `Resolved` is terminal -- no further
/// transition is modeled.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AlertStatus {
    #[default]
    New,
    Active,
    Resolved,
}

/// A monitoring alert raised against one device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub uid: String,
    pub device_uid: Option<String>,
    pub alert_type: String,
    pub severity: AlertSeverity,
    pub status: AlertStatus,
    pub message: Option<String>,
    /// Source event time, passed through unchanged (authoritative --
    /// unlike the other entities this is NOT the collection stamp).
    pub created_at: Option<DateTime<Utc>>,
}

impl Alert {
    pub fn is_resolved(&self) -> bool {
        self.status == AlertStatus::Resolved
    }
}

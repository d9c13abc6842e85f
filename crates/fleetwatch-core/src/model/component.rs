// ── Device component domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Component health as reported by the source.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ComponentStatus {
    Healthy,
    Warning,
    Critical,
    #[default]
    Unknown,
}

/// A hardware/logical component of one device (CPU, disk, NIC, ...).
///
/// The source payload carries no owning-device reference; `device_uid`
/// is injected by the normalizer from the fetch context. The whole
/// component slice of a device is recomputed on every sync of that
/// device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub uid: String,
    pub device_uid: String,
    pub name: String,
    #[serde(rename = "type")]
    pub component_type: String,
    pub status: ComponentStatus,
    pub details: Option<String>,
    /// Collection-run stamp, not true creation time.
    pub created_at: DateTime<Utc>,
}

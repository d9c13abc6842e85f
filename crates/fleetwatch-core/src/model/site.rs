// ── Site domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Site operational status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SiteStatus {
    #[default]
    Active,
    Inactive,
}

/// A customer site: the physical location devices are grouped under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    pub uid: String,
    pub name: String,
    pub address: Option<String>,
    pub status: SiteStatus,
    /// Device count as reported by the source (not derived locally).
    pub device_count: u32,
    /// Collection-run stamp, not true creation time.
    pub created_at: DateTime<Utc>,
}

impl Site {
    pub fn is_active(&self) -> bool {
        self.status == SiteStatus::Active
    }
}

// ── Device domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Device operational status.
///
/// Anything the source reports that is neither `online` nor `offline`
/// normalizes to `Unknown`; the dashboard's offline count is derived
/// as `total - online`, so unknown devices are absorbed there.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DeviceStatus {
    Online,
    Offline,
    #[default]
    Unknown,
}

impl DeviceStatus {
    pub fn is_online(self) -> bool {
        self == Self::Online
    }
}

/// A managed endpoint belonging to one site.
///
/// The `site_uid` link is by value only -- never referentially
/// enforced, since each entity kind is replaced independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub uid: String,
    pub hostname: String,
    pub site_uid: Option<String>,
    pub status: DeviceStatus,
    pub ip_address: Option<String>,
    pub last_seen: Option<DateTime<Utc>>,
    pub os: Option<String>,
    pub memory: Option<String>,
    pub cpu: Option<String>,
    /// Collection-run stamp, not true creation time.
    pub created_at: DateTime<Utc>,
}

impl Device {
    pub fn is_online(&self) -> bool {
        self.status.is_online()
    }
}

// Raw wire records from the RMM inventory API.
//
// Fields use `#[serde(default)]` liberally because the hosted API is
// inconsistent about field presence across tenants and versions; the
// normalizer in `fleetwatch-core` fills documented defaults. Anything
// undocumented lands in `extra`.

use serde::{Deserialize, Serialize};

/// Site record from `GET /sites`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSite {
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub device_count: Option<u32>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Device record from `GET /devices`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDevice {
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub site_uid: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    /// RFC 3339 timestamp of the device's last check-in.
    #[serde(default)]
    pub last_seen: Option<String>,
    #[serde(default)]
    pub os: Option<String>,
    #[serde(default)]
    pub memory: Option<String>,
    #[serde(default)]
    pub cpu: Option<String>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Alert record from `GET /alerts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAlert {
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub device_uid: Option<String>,
    #[serde(default)]
    pub alert_type: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Source event time -- authoritative, passed through unchanged.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Component record from `GET /devices/{uid}/components`.
///
/// Carries no owning-device reference; callers must track which device
/// the collection was fetched for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawComponent {
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub component_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── List-query filters ──

use std::str::FromStr;

use crate::model::{Alert, AlertSeverity, AlertStatus, Device, DeviceStatus};

/// Row filter for device list queries. `None` fields match everything.
#[derive(Debug, Clone, Default)]
pub struct DeviceFilter {
    pub site_uid: Option<String>,
    pub status: Option<DeviceStatus>,
}

impl DeviceFilter {
    pub fn matches(&self, device: &Device) -> bool {
        let site_ok = self
            .site_uid
            .as_deref()
            .is_none_or(|want| device.site_uid.as_deref() == Some(want));
        site_ok && self.status.is_none_or(|s| device.status == s)
    }
}

/// Row filter for alert list queries. `None` fields match everything.
#[derive(Debug, Clone, Default)]
pub struct AlertFilter {
    pub status: Option<AlertStatus>,
    pub severity: Option<AlertSeverity>,
}

impl AlertFilter {
    pub fn matches(&self, alert: &Alert) -> bool {
        self.status.is_none_or(|s| alert.status == s)
            && self.severity.is_none_or(|s| alert.severity == s)
    }
}

/// Map a free-form status argument to a typed filter. The sentinel
/// `"all"` (and empty/absent input) means "no filter"; unparseable
/// values also degrade to no filter rather than erroring.
pub fn parse_status_filter<T: FromStr>(raw: Option<&str>) -> Option<T> {
    let raw = raw?.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
        return None;
    }
    raw.parse().ok()
}

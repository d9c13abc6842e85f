//! Raw record → canonical record conversion.
//!
//! One pure function per entity kind. There is no error state:
//! missing or malformed optional fields degrade to the documented
//! defaults (site `active`, device `unknown`, alert `new`, component
//! `unknown`). Records without a uid cannot be keyed or looked up and
//! are skipped with a debug log.
//!
//! `collected_at` is the single stamp of the current collection run;
//! it lands on site/device/component records. Alert timestamps are
//! authoritative source event times and pass through unchanged.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use tracing::debug;

use fleetwatch_api::{RawAlert, RawComponent, RawDevice, RawSite};

use crate::model::{Alert, Component, Device, Site};

/// Normalize one site record.
pub fn site(raw: RawSite, collected_at: DateTime<Utc>) -> Option<Site> {
    let Some(uid) = raw.uid else {
        debug!(kind = "site", "skipping record without uid");
        return None;
    };

    Some(Site {
        uid,
        name: raw.name.unwrap_or_default(),
        address: raw.address,
        status: parse_or_default(raw.status),
        device_count: raw.device_count.unwrap_or(0),
        created_at: collected_at,
    })
}

/// Normalize one device record.
pub fn device(raw: RawDevice, collected_at: DateTime<Utc>) -> Option<Device> {
    let Some(uid) = raw.uid else {
        debug!(kind = "device", "skipping record without uid");
        return None;
    };

    Some(Device {
        uid,
        hostname: raw.hostname.unwrap_or_default(),
        site_uid: raw.site_uid,
        status: parse_or_default(raw.status),
        ip_address: raw.ip_address,
        last_seen: parse_timestamp(raw.last_seen.as_deref()),
        os: raw.os,
        memory: raw.memory,
        cpu: raw.cpu,
        created_at: collected_at,
    })
}

/// Normalize one alert record. `created_at` passes through from the
/// source rather than being stamped.
pub fn alert(raw: RawAlert) -> Option<Alert> {
    let Some(uid) = raw.uid else {
        debug!(kind = "alert", "skipping record without uid");
        return None;
    };

    Some(Alert {
        uid,
        device_uid: raw.device_uid,
        alert_type: raw.alert_type.unwrap_or_default(),
        severity: parse_or_default(raw.severity),
        status: parse_or_default(raw.status),
        message: raw.message,
        created_at: parse_timestamp(raw.created_at.as_deref()),
    })
}

/// Normalize one component record, injecting the owning `device_uid`
/// from the fetch context (the source payload does not carry it).
pub fn component(
    raw: RawComponent,
    device_uid: &str,
    collected_at: DateTime<Utc>,
) -> Option<Component> {
    let Some(uid) = raw.uid else {
        debug!(kind = "component", device_uid, "skipping record without uid");
        return None;
    };

    Some(Component {
        uid,
        device_uid: device_uid.to_owned(),
        name: raw.name.unwrap_or_default(),
        component_type: raw.component_type.unwrap_or_default(),
        status: parse_or_default(raw.status),
        details: raw.details,
        created_at: collected_at,
    })
}

// ── Field helpers ────────────────────────────────────────────────────

/// Parse an enum-like field, degrading unparseable or absent values to
/// the type's documented default.
fn parse_or_default<T: FromStr + Default>(value: Option<String>) -> T {
    value
        .and_then(|s| s.parse().ok())
        .unwrap_or_default()
}

/// Lenient RFC 3339 parse; malformed values degrade to `None`.
fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(value?).ok()?;
    Some(parsed.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AlertSeverity, AlertStatus, ComponentStatus, DeviceStatus, SiteStatus};
    use fleetwatch_api::sample;

    fn now() -> DateTime<Utc> {
        "2024-06-01T12:00:00Z"
            .parse()
            .expect("valid test timestamp")
    }

    #[test]
    fn device_without_status_defaults_to_unknown() {
        let raw = RawDevice {
            uid: Some("dev-9".into()),
            hostname: Some("mystery".into()),
            site_uid: None,
            status: None,
            ip_address: None,
            last_seen: None,
            os: None,
            memory: None,
            cpu: None,
            extra: serde_json::Map::new(),
        };

        let dev = device(raw, now()).expect("uid present");
        assert_eq!(dev.status, DeviceStatus::Unknown);
        assert_eq!(dev.created_at, now());
    }

    #[test]
    fn garbage_status_degrades_not_fails() {
        let mut raw = sample::devices().remove(0);
        raw.status = Some("rebooting???".into());
        let dev = device(raw, now()).expect("uid present");
        assert_eq!(dev.status, DeviceStatus::Unknown);
    }

    #[test]
    fn site_defaults_to_active() {
        let raw = RawSite {
            uid: Some("site-9".into()),
            name: None,
            address: None,
            status: None,
            device_count: None,
            extra: serde_json::Map::new(),
        };

        let site = site(raw, now()).expect("uid present");
        assert_eq!(site.status, SiteStatus::Active);
        assert_eq!(site.device_count, 0);
        assert_eq!(site.name, "");
    }

    #[test]
    fn alert_keeps_source_event_time() {
        let raw = sample::alerts().remove(0);
        let alert = alert(raw).expect("uid present");
        assert_eq!(
            alert.created_at,
            Some("2024-01-15T09:45:00Z".parse().expect("valid")),
        );
        assert_eq!(alert.status, AlertStatus::New);
        assert_eq!(alert.severity, AlertSeverity::High);
    }

    #[test]
    fn alert_with_malformed_event_time_gets_none() {
        let mut raw = sample::alerts().remove(0);
        raw.created_at = Some("yesterday-ish".into());
        let alert = alert(raw).expect("uid present");
        assert_eq!(alert.created_at, None);
    }

    #[test]
    fn component_injects_owning_device() {
        let raw = sample::components().remove(2);
        let comp = component(raw, "dev-42", now()).expect("uid present");
        assert_eq!(comp.device_uid, "dev-42");
        assert_eq!(comp.status, ComponentStatus::Warning);
        assert_eq!(comp.component_type, "storage");
    }

    #[test]
    fn uid_less_records_are_skipped() {
        let raw = RawSite {
            uid: None,
            name: Some("orphan".into()),
            address: None,
            status: None,
            device_count: None,
            extra: serde_json::Map::new(),
        };
        assert!(site(raw, now()).is_none());
    }

    #[test]
    fn status_parse_is_case_insensitive() {
        let mut raw = sample::devices().remove(0);
        raw.status = Some("ONLINE".into());
        let dev = device(raw, now()).expect("uid present");
        assert_eq!(dev.status, DeviceStatus::Online);
    }
}

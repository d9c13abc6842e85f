//! Dashboard aggregation.
//!
//! Statistics come from store counts on the preferred path and from a
//! fixed placeholder set on the degraded path. Nothing here returns an
//! error to the caller: a dashboard render must always have numbers,
//! even when the store does not.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::{Alert, AlertStatus, Device, DeviceStatus};
use crate::store::{RecordStore, StoreError};

/// Summary counts shown on the dashboard.
///
/// `offline_devices` is always derived as `total - online`, so devices
/// whose status is neither online nor offline (i.e. `unknown`) land in
/// the offline bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_devices: u64,
    pub online_devices: u64,
    pub offline_devices: u64,
    pub total_alerts: u64,
    pub new_alerts: u64,
    pub total_sites: u64,
}

impl DashboardStats {
    /// Fixed statistics served when the store cannot be read.
    pub const PLACEHOLDER: Self = Self {
        total_devices: 25,
        online_devices: 18,
        offline_devices: 7,
        total_alerts: 5,
        new_alerts: 2,
        total_sites: 3,
    };

    fn derive(
        total_devices: u64,
        online_devices: u64,
        total_alerts: u64,
        new_alerts: u64,
        total_sites: u64,
    ) -> Self {
        Self {
            total_devices,
            online_devices,
            offline_devices: total_devices.saturating_sub(online_devices),
            total_alerts,
            new_alerts,
            total_sites,
        }
    }

    /// Compute from freshly collected records, store not involved.
    #[must_use]
    pub fn from_collections(sites: &[crate::model::Site], devices: &[Device], alerts: &[Alert]) -> Self {
        let online = devices.iter().filter(|d| d.is_online()).count();
        let new = alerts
            .iter()
            .filter(|a| a.status == AlertStatus::New)
            .count();
        Self::derive(
            devices.len() as u64,
            online as u64,
            alerts.len() as u64,
            new as u64,
            sites.len() as u64,
        )
    }
}

/// Dashboard payload: counts plus the recency lists.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub stats: DashboardStats,
    pub recent_devices: Vec<Device>,
    pub recent_alerts: Vec<Alert>,
}

/// Rows shown in each dashboard recency list.
const RECENT_LIMIT: usize = 5;

/// Count-based statistics from the store, degrading to
/// [`DashboardStats::PLACEHOLDER`] if any read fails.
pub async fn compute_stats<S: RecordStore>(store: &S) -> DashboardStats {
    match try_compute_stats(store).await {
        Ok(stats) => stats,
        Err(err) => {
            warn!(error = %err, "store unavailable; serving placeholder statistics");
            DashboardStats::PLACEHOLDER
        }
    }
}

/// Stats plus recent device/alert lists. Lists degrade to empty
/// independently of the counts.
pub async fn summary<S: RecordStore>(store: &S) -> DashboardSummary {
    let stats = compute_stats(store).await;
    let recent_devices = store.recent_devices(RECENT_LIMIT).await.unwrap_or_else(|err| {
        warn!(error = %err, "recent devices unavailable");
        Vec::new()
    });
    let recent_alerts = store.recent_alerts(RECENT_LIMIT).await.unwrap_or_else(|err| {
        warn!(error = %err, "recent alerts unavailable");
        Vec::new()
    });
    DashboardSummary {
        stats,
        recent_devices,
        recent_alerts,
    }
}

async fn try_compute_stats<S: RecordStore>(store: &S) -> Result<DashboardStats, StoreError> {
    let total_sites = store.count_sites().await?;
    let total_devices = store.count_devices(None).await?;
    let online_devices = store.count_devices(Some(DeviceStatus::Online)).await?;
    let total_alerts = store.count_alerts(None).await?;
    let new_alerts = store.count_alerts(Some(AlertStatus::New)).await?;
    Ok(DashboardStats::derive(
        total_devices,
        online_devices,
        total_alerts,
        new_alerts,
        total_sites,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AlertSeverity, Site, SiteStatus};
    use chrono::{DateTime, Utc};

    fn stamp() -> DateTime<Utc> {
        "2024-06-01T00:00:00Z".parse().expect("valid test timestamp")
    }

    fn device(uid: &str, status: DeviceStatus) -> Device {
        Device {
            uid: uid.to_owned(),
            hostname: String::new(),
            site_uid: None,
            status,
            ip_address: None,
            last_seen: None,
            os: None,
            memory: None,
            cpu: None,
            created_at: stamp(),
        }
    }

    #[test]
    fn offline_is_derived_and_absorbs_unknown() {
        let sites = vec![Site {
            uid: "s1".into(),
            name: String::new(),
            address: None,
            status: SiteStatus::Active,
            device_count: 0,
            created_at: stamp(),
        }];
        let devices = vec![
            device("d1", DeviceStatus::Online),
            device("d2", DeviceStatus::Offline),
            device("d3", DeviceStatus::Unknown),
        ];
        let alerts = vec![Alert {
            uid: "a1".into(),
            device_uid: None,
            alert_type: String::new(),
            severity: AlertSeverity::Low,
            status: AlertStatus::New,
            message: None,
            created_at: None,
        }];

        let stats = DashboardStats::from_collections(&sites, &devices, &alerts);
        assert_eq!(stats.total_devices, 3);
        assert_eq!(stats.online_devices, 1);
        assert_eq!(stats.offline_devices, 2, "unknown counts as not-online");
        assert_eq!(stats.new_alerts, 1);
        assert_eq!(stats.total_sites, 1);
    }

    #[test]
    fn placeholder_is_internally_consistent() {
        let p = DashboardStats::PLACEHOLDER;
        assert_eq!(p.offline_devices, p.total_devices - p.online_devices);
    }
}

//! File-backed local store.
//!
//! Tables are in-memory `IndexMap`s (uid-keyed, insertion-ordered so
//! list queries replay collector order) behind a single `RwLock`.
//! With a backing path every mutation is flushed to one JSON document
//! via a temp-file-and-rename write; without one the store is purely
//! in-memory, which is also the test double.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{LockResult, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{Alert, AlertStatus, AuditEntry, Component, Device, DeviceStatus, Site};

use super::{AlertFilter, DeviceFilter, RecordStore, StoreError};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Tables {
    #[serde(default)]
    sites: IndexMap<String, Site>,
    #[serde(default)]
    devices: IndexMap<String, Device>,
    #[serde(default)]
    alerts: IndexMap<String, Alert>,
    /// Keyed by `{device_uid}/{uid}`: component uids are only unique
    /// within a device, not across the fleet.
    #[serde(default)]
    components: IndexMap<String, Component>,
    #[serde(default)]
    audit: Vec<AuditEntry>,
}

/// Local [`RecordStore`] backend.
#[derive(Debug)]
pub struct LocalStore {
    path: Option<PathBuf>,
    tables: RwLock<Tables>,
}

impl LocalStore {
    /// Volatile store with no backing file.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            path: None,
            tables: RwLock::new(Tables::default()),
        }
    }

    /// Store backed by a JSON document at `path`. A missing file is an
    /// empty store; it is created on first write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_owned();
        let tables = if path.exists() {
            let raw = fs::read_to_string(&path)
                .map_err(|e| StoreError::read("store", e.to_string()))?;
            serde_json::from_str(&raw).map_err(|e| StoreError::read("store", e.to_string()))?
        } else {
            Tables::default()
        };
        debug!(path = %path.display(), "opened local store");
        Ok(Self {
            path: Some(path),
            tables: RwLock::new(tables),
        })
    }

    fn read(&self, table: &'static str) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        unpoison(self.tables.read()).map_err(|m| StoreError::read(table, m))
    }

    fn write(&self, table: &'static str) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        unpoison(self.tables.write()).map_err(|m| StoreError::write(table, m))
    }

    /// Flush the full document to disk. No-op for in-memory stores.
    fn persist(&self, tables: &Tables) -> Result<(), String> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let body = serde_json::to_vec_pretty(tables).map_err(|e| e.to_string())?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, body).map_err(|e| e.to_string())?;
        fs::rename(&tmp, path).map_err(|e| e.to_string())?;
        Ok(())
    }

    /// Delete-then-insert swap of a whole table.
    ///
    /// The delete half failing leaves the previous generation intact;
    /// the insert half failing after a committed delete leaves the
    /// table empty, matching the two-step contract on [`RecordStore`].
    fn generation_swap<T>(
        &self,
        table: &'static str,
        records: Vec<T>,
        select: impl Fn(&mut Tables) -> &mut IndexMap<String, T>,
        key: impl Fn(&T) -> String,
    ) -> Result<(), StoreError> {
        let mut tables = self.write(table)?;

        let previous = std::mem::take(select(&mut tables));
        if let Err(message) = self.persist(&tables) {
            *select(&mut tables) = previous;
            return Err(StoreError::write(table, message));
        }

        *select(&mut tables) = records.into_iter().map(|r| (key(&r), r)).collect();
        if let Err(message) = self.persist(&tables) {
            select(&mut tables).clear();
            let _ = self.persist(&tables);
            return Err(StoreError::write(table, message));
        }

        debug!(table, rows = select(&mut tables).len(), "table replaced");
        Ok(())
    }
}

fn unpoison<G>(result: LockResult<G>) -> Result<G, String> {
    result.map_err(|_| "store lock poisoned".to_owned())
}

fn count(len: usize) -> u64 {
    len as u64
}

fn by_recency<T>(
    rows: impl Iterator<Item = T>,
    stamp: impl Fn(&T) -> Option<DateTime<Utc>>,
    limit: usize,
) -> Vec<T> {
    let mut rows: Vec<T> = rows.collect();
    rows.sort_by(|a, b| stamp(b).cmp(&stamp(a)));
    rows.truncate(limit);
    rows
}

#[async_trait]
impl RecordStore for LocalStore {
    async fn sites(&self, limit: usize) -> Result<Vec<Site>, StoreError> {
        let tables = self.read("sites")?;
        Ok(tables.sites.values().take(limit).cloned().collect())
    }

    async fn devices(
        &self,
        filter: &DeviceFilter,
        limit: usize,
    ) -> Result<Vec<Device>, StoreError> {
        let tables = self.read("devices")?;
        Ok(tables
            .devices
            .values()
            .filter(|d| filter.matches(d))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn device(&self, uid: &str) -> Result<Option<Device>, StoreError> {
        let tables = self.read("devices")?;
        Ok(tables.devices.get(uid).cloned())
    }

    async fn alerts(&self, filter: &AlertFilter, limit: usize) -> Result<Vec<Alert>, StoreError> {
        let tables = self.read("alerts")?;
        Ok(tables
            .alerts
            .values()
            .filter(|a| filter.matches(a))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn alert(&self, uid: &str) -> Result<Option<Alert>, StoreError> {
        let tables = self.read("alerts")?;
        Ok(tables.alerts.get(uid).cloned())
    }

    async fn components_for_device(
        &self,
        device_uid: &str,
    ) -> Result<Vec<Component>, StoreError> {
        let tables = self.read("device_components")?;
        Ok(tables
            .components
            .values()
            .filter(|c| c.device_uid == device_uid)
            .cloned()
            .collect())
    }

    async fn replace_sites(&self, records: Vec<Site>) -> Result<(), StoreError> {
        self.generation_swap("sites", records, |t| &mut t.sites, |r| r.uid.clone())
    }

    async fn replace_devices(&self, records: Vec<Device>) -> Result<(), StoreError> {
        self.generation_swap("devices", records, |t| &mut t.devices, |r| r.uid.clone())
    }

    async fn replace_alerts(&self, records: Vec<Alert>) -> Result<(), StoreError> {
        self.generation_swap("alerts", records, |t| &mut t.alerts, |r| r.uid.clone())
    }

    async fn replace_device_components(
        &self,
        device_uid: &str,
        records: Vec<Component>,
    ) -> Result<(), StoreError> {
        const TABLE: &str = "device_components";
        let mut tables = self.write(TABLE)?;

        // Scoped delete: only this device's slice is touched, so
        // concurrent per-device syncs cannot clobber each other.
        let previous = tables.components.clone();
        tables.components.retain(|_, c| c.device_uid != device_uid);
        if let Err(message) = self.persist(&tables) {
            tables.components = previous;
            return Err(StoreError::write(TABLE, message));
        }

        tables.components.extend(
            records
                .into_iter()
                .map(|r| (format!("{}/{}", r.device_uid, r.uid), r)),
        );
        if let Err(message) = self.persist(&tables) {
            tables.components.retain(|_, c| c.device_uid != device_uid);
            let _ = self.persist(&tables);
            return Err(StoreError::write(TABLE, message));
        }

        Ok(())
    }

    async fn resolve_alert(&self, uid: &str) -> Result<u64, StoreError> {
        let mut tables = self.write("alerts")?;
        let Some(alert) = tables.alerts.get_mut(uid) else {
            return Ok(0);
        };

        let before = alert.status;
        alert.status = AlertStatus::Resolved;
        if let Err(message) = self.persist(&tables) {
            if let Some(alert) = tables.alerts.get_mut(uid) {
                alert.status = before;
            }
            return Err(StoreError::write("alerts", message));
        }
        Ok(1)
    }

    async fn count_sites(&self) -> Result<u64, StoreError> {
        let tables = self.read("sites")?;
        Ok(count(tables.sites.len()))
    }

    async fn count_devices(&self, status: Option<DeviceStatus>) -> Result<u64, StoreError> {
        let tables = self.read("devices")?;
        Ok(match status {
            None => count(tables.devices.len()),
            Some(status) => count(
                tables
                    .devices
                    .values()
                    .filter(|d| d.status == status)
                    .count(),
            ),
        })
    }

    async fn count_alerts(&self, status: Option<AlertStatus>) -> Result<u64, StoreError> {
        let tables = self.read("alerts")?;
        Ok(match status {
            None => count(tables.alerts.len()),
            Some(status) => count(
                tables
                    .alerts
                    .values()
                    .filter(|a| a.status == status)
                    .count(),
            ),
        })
    }

    async fn recent_devices(&self, limit: usize) -> Result<Vec<Device>, StoreError> {
        let tables = self.read("devices")?;
        Ok(by_recency(
            tables.devices.values().cloned(),
            |d| d.last_seen,
            limit,
        ))
    }

    async fn recent_alerts(&self, limit: usize) -> Result<Vec<Alert>, StoreError> {
        let tables = self.read("alerts")?;
        Ok(by_recency(
            tables.alerts.values().cloned(),
            |a| a.created_at,
            limit,
        ))
    }

    async fn append_audit(&self, entry: AuditEntry) -> Result<(), StoreError> {
        let mut tables = self.write("audit_log")?;
        tables.audit.push(entry);
        if let Err(message) = self.persist(&tables) {
            tables.audit.pop();
            return Err(StoreError::write("audit_log", message));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SiteStatus;
    use crate::store::DEFAULT_LIMIT;
    use pretty_assertions::assert_eq;

    fn stamp(s: &str) -> DateTime<Utc> {
        s.parse().expect("valid test timestamp")
    }

    fn site(uid: &str) -> Site {
        Site {
            uid: uid.to_owned(),
            name: format!("Site {uid}"),
            address: None,
            status: SiteStatus::Active,
            device_count: 0,
            created_at: stamp("2024-06-01T00:00:00Z"),
        }
    }

    fn device(uid: &str, status: DeviceStatus, last_seen: Option<&str>) -> Device {
        Device {
            uid: uid.to_owned(),
            hostname: format!("host-{uid}"),
            site_uid: Some("site-001".to_owned()),
            status,
            ip_address: None,
            last_seen: last_seen.map(stamp),
            os: None,
            memory: None,
            cpu: None,
            created_at: stamp("2024-06-01T00:00:00Z"),
        }
    }

    fn alert(uid: &str, status: AlertStatus, created_at: Option<&str>) -> Alert {
        Alert {
            uid: uid.to_owned(),
            device_uid: Some("dev-001".to_owned()),
            alert_type: "cpu".to_owned(),
            severity: crate::model::AlertSeverity::High,
            status,
            message: None,
            created_at: created_at.map(stamp),
        }
    }

    fn component(uid: &str, device_uid: &str) -> Component {
        Component {
            uid: uid.to_owned(),
            device_uid: device_uid.to_owned(),
            name: format!("comp {uid}"),
            component_type: "cpu".to_owned(),
            status: crate::model::ComponentStatus::Healthy,
            details: None,
            created_at: stamp("2024-06-01T00:00:00Z"),
        }
    }

    #[tokio::test]
    async fn replace_is_wholesale_not_merge() {
        let store = LocalStore::in_memory();
        store
            .replace_sites(vec![site("a"), site("b")])
            .await
            .expect("first generation");
        store
            .replace_sites(vec![site("c")])
            .await
            .expect("second generation");

        let rows = store.sites(DEFAULT_LIMIT).await.expect("query");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].uid, "c");
    }

    #[tokio::test]
    async fn list_order_is_insertion_order() {
        let store = LocalStore::in_memory();
        store
            .replace_sites(vec![site("z"), site("a"), site("m")])
            .await
            .expect("replace");

        let uids: Vec<_> = store
            .sites(DEFAULT_LIMIT)
            .await
            .expect("query")
            .into_iter()
            .map(|s| s.uid)
            .collect();
        assert_eq!(uids, vec!["z", "a", "m"]);
    }

    #[tokio::test]
    async fn device_filters_compose() {
        let store = LocalStore::in_memory();
        let mut other_site = device("d3", DeviceStatus::Online, None);
        other_site.site_uid = Some("site-002".to_owned());
        store
            .replace_devices(vec![
                device("d1", DeviceStatus::Online, None),
                device("d2", DeviceStatus::Offline, None),
                other_site,
            ])
            .await
            .expect("replace");

        let filter = DeviceFilter {
            site_uid: Some("site-001".to_owned()),
            status: Some(DeviceStatus::Online),
        };
        let rows = store.devices(&filter, DEFAULT_LIMIT).await.expect("query");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].uid, "d1");
    }

    #[tokio::test]
    async fn component_replace_is_scoped_to_one_device() {
        let store = LocalStore::in_memory();
        store
            .replace_device_components("dev-1", vec![component("c1", "dev-1")])
            .await
            .expect("dev-1 slice");
        store
            .replace_device_components("dev-2", vec![component("c2", "dev-2")])
            .await
            .expect("dev-2 slice");
        store
            .replace_device_components("dev-1", vec![component("c3", "dev-1")])
            .await
            .expect("dev-1 second generation");

        let dev1 = store.components_for_device("dev-1").await.expect("query");
        let dev2 = store.components_for_device("dev-2").await.expect("query");
        assert_eq!(dev1.len(), 1);
        assert_eq!(dev1[0].uid, "c3");
        assert_eq!(dev2.len(), 1, "other device's slice untouched");
    }

    #[tokio::test]
    async fn resolve_alert_reports_row_count() {
        let store = LocalStore::in_memory();
        store
            .replace_alerts(vec![alert("a1", AlertStatus::New, None)])
            .await
            .expect("replace");

        assert_eq!(store.resolve_alert("a1").await.expect("resolve"), 1);
        assert_eq!(store.resolve_alert("missing").await.expect("resolve"), 0);

        let rows = store
            .alerts(&AlertFilter::default(), DEFAULT_LIMIT)
            .await
            .expect("query");
        assert_eq!(rows[0].status, AlertStatus::Resolved);
    }

    #[tokio::test]
    async fn counts_are_zero_on_empty_store() {
        let store = LocalStore::in_memory();
        assert_eq!(store.count_sites().await.expect("count"), 0);
        assert_eq!(store.count_devices(None).await.expect("count"), 0);
        assert_eq!(
            store
                .count_alerts(Some(AlertStatus::Active))
                .await
                .expect("count"),
            0,
        );
    }

    #[tokio::test]
    async fn recent_devices_orders_by_last_seen_desc() {
        let store = LocalStore::in_memory();
        store
            .replace_devices(vec![
                device("old", DeviceStatus::Online, Some("2024-01-01T00:00:00Z")),
                device("fresh", DeviceStatus::Online, Some("2024-06-01T00:00:00Z")),
                device("never", DeviceStatus::Unknown, None),
            ])
            .await
            .expect("replace");

        let uids: Vec<_> = store
            .recent_devices(2)
            .await
            .expect("query")
            .into_iter()
            .map(|d| d.uid)
            .collect();
        assert_eq!(uids, vec!["fresh", "old"], "unknown last_seen sorts last");
    }

    #[tokio::test]
    async fn persists_and_reloads_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");

        let store = LocalStore::open(&path).expect("open fresh");
        store
            .replace_sites(vec![site("a"), site("b")])
            .await
            .expect("replace");
        store
            .append_audit(AuditEntry::alert_resolved(
                "a1",
                stamp("2024-06-01T00:00:00Z"),
            ))
            .await
            .expect("audit");
        drop(store);

        let reopened = LocalStore::open(&path).expect("reopen");
        let rows = reopened.sites(DEFAULT_LIMIT).await.expect("query");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].uid, "a");
    }

    #[tokio::test]
    async fn missing_backing_file_is_empty_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalStore::open(dir.path().join("absent.json")).expect("open");
        assert_eq!(store.count_sites().await.expect("count"), 0);
    }
}

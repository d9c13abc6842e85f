//! Presentation facade.
//!
//! The one surface a hosting layer (CLI, web) talks to. Wraps the
//! collector and store behind operation-shaped methods so callers
//! never compose store queries themselves.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::dashboard::{self, DashboardStats, DashboardSummary};
use crate::error::CoreError;
use crate::model::{Alert, AuditEntry, Component, Device, Site};
use crate::store::{AlertFilter, DEFAULT_LIMIT, DeviceFilter, RecordStore};
use crate::sync::{Collector, SyncReport};

/// Operations exposed to the presentation layer.
pub struct Portal<S> {
    collector: Collector<S>,
    store: Arc<S>,
}

impl<S: RecordStore> Portal<S> {
    pub fn new(collector: Collector<S>, store: Arc<S>) -> Self {
        Self { collector, store }
    }

    /// Trigger a full synchronization run.
    pub async fn run_sync(&self) -> SyncReport {
        self.collector.run().await
    }

    /// Dashboard counts from the store (placeholder on store failure).
    pub async fn stats(&self) -> DashboardStats {
        dashboard::compute_stats(self.store.as_ref()).await
    }

    /// Dashboard counts recomputed from a fresh fetch.
    pub async fn live_stats(&self) -> Result<DashboardStats, CoreError> {
        self.collector.live_stats().await
    }

    /// Counts plus recent device/alert lists.
    pub async fn dashboard(&self) -> DashboardSummary {
        dashboard::summary(self.store.as_ref()).await
    }

    pub async fn list_sites(&self) -> Result<Vec<Site>, CoreError> {
        Ok(self.store.sites(DEFAULT_LIMIT).await?)
    }

    pub async fn list_devices(&self, filter: &DeviceFilter) -> Result<Vec<Device>, CoreError> {
        Ok(self.store.devices(filter, DEFAULT_LIMIT).await?)
    }

    pub async fn list_alerts(&self, filter: &AlertFilter) -> Result<Vec<Alert>, CoreError> {
        Ok(self.store.alerts(filter, DEFAULT_LIMIT).await?)
    }

    /// One device with its component slice. A miss is an empty state,
    /// not an error.
    pub async fn get_device(
        &self,
        uid: &str,
    ) -> Result<Option<(Device, Vec<Component>)>, CoreError> {
        let Some(device) = self.store.device(uid).await? else {
            return Ok(None);
        };
        let components = self.store.components_for_device(uid).await?;
        Ok(Some((device, components)))
    }

    /// Resolve an alert. `Ok(true)` when a row transitioned (an audit
    /// entry is appended), `Ok(false)` when the uid matched nothing.
    pub async fn resolve_alert(&self, uid: &str) -> Result<bool, CoreError> {
        let updated = self.store.resolve_alert(uid).await?;
        if updated == 0 {
            return Ok(false);
        }
        self.store
            .append_audit(AuditEntry::alert_resolved(uid, Utc::now()))
            .await?;
        info!(alert_uid = uid, "alert resolved");
        Ok(true)
    }
}

//! Record store gateway.
//!
//! [`RecordStore`] is the seam between the sync pipeline and whatever
//! backend actually holds the tables. [`LocalStore`] is the provided
//! backend (in-memory tables with optional JSON-file persistence);
//! hosted SQL backends stay behind the same trait.
//!
//! Replace semantics are a *generation swap*: delete-all then
//! insert-all for the entity kind, never a diff or merge. The one
//! exception is the components table, where the delete is scoped to
//! the owning device uid so per-device syncs can run in parallel
//! without clobbering each other's slices.

mod filter;
mod local;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{
    Alert, AlertStatus, AuditEntry, Component, Device, DeviceStatus, Site,
};

pub use filter::{AlertFilter, DeviceFilter, parse_status_filter};
pub use local::LocalStore;

/// Default row cap for list queries.
pub const DEFAULT_LIMIT: usize = 100;

/// Store failure, split by direction so callers can apply the right
/// degrade policy (reads degrade to placeholders, writes fail the
/// sync step).
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("store read failed on '{table}': {message}")]
    ReadFailed { table: &'static str, message: String },

    #[error("store write failed on '{table}': {message}")]
    WriteFailed { table: &'static str, message: String },
}

impl StoreError {
    pub fn read(table: &'static str, message: impl Into<String>) -> Self {
        Self::ReadFailed {
            table,
            message: message.into(),
        }
    }

    pub fn write(table: &'static str, message: impl Into<String>) -> Self {
        Self::WriteFailed {
            table,
            message: message.into(),
        }
    }
}

/// Table-level gateway to the persistent store.
///
/// List queries return rows in insertion order (which, under
/// generation swaps, is the order the collector produced); `recent_*`
/// queries order by the table's natural timestamp instead. Point
/// lookups surface absence as `Ok(None)`, never as an error. Counts
/// return 0 on empty tables.
///
/// `replace_*` contract: the delete and insert halves are distinct
/// steps. A failed delete aborts before any insert (the previous
/// generation survives intact); a failed insert after a successful
/// delete leaves the table empty and surfaces
/// [`StoreError::WriteFailed`].
#[async_trait]
pub trait RecordStore: Send + Sync {
    // ── Queries ──────────────────────────────────────────────────────

    async fn sites(&self, limit: usize) -> Result<Vec<Site>, StoreError>;

    async fn devices(&self, filter: &DeviceFilter, limit: usize)
    -> Result<Vec<Device>, StoreError>;

    async fn device(&self, uid: &str) -> Result<Option<Device>, StoreError>;

    async fn alerts(&self, filter: &AlertFilter, limit: usize) -> Result<Vec<Alert>, StoreError>;

    async fn alert(&self, uid: &str) -> Result<Option<Alert>, StoreError>;

    async fn components_for_device(&self, device_uid: &str)
    -> Result<Vec<Component>, StoreError>;

    // ── Generation swaps ─────────────────────────────────────────────

    async fn replace_sites(&self, records: Vec<Site>) -> Result<(), StoreError>;

    async fn replace_devices(&self, records: Vec<Device>) -> Result<(), StoreError>;

    async fn replace_alerts(&self, records: Vec<Alert>) -> Result<(), StoreError>;

    /// Replace only the given device's component slice.
    async fn replace_device_components(
        &self,
        device_uid: &str,
        records: Vec<Component>,
    ) -> Result<(), StoreError>;

    // ── Field updates ────────────────────────────────────────────────

    /// Transition an alert to `resolved`. Returns the updated row
    /// count: 0 (not found, store untouched) or 1.
    async fn resolve_alert(&self, uid: &str) -> Result<u64, StoreError>;

    // ── Aggregates ───────────────────────────────────────────────────

    async fn count_sites(&self) -> Result<u64, StoreError>;

    async fn count_devices(&self, status: Option<DeviceStatus>) -> Result<u64, StoreError>;

    async fn count_alerts(&self, status: Option<AlertStatus>) -> Result<u64, StoreError>;

    // ── Recency views ────────────────────────────────────────────────

    /// Most recently seen devices first (`last_seen` desc, unknown last).
    async fn recent_devices(&self, limit: usize) -> Result<Vec<Device>, StoreError>;

    /// Most recent alerts first (`created_at` desc, unknown last).
    async fn recent_alerts(&self, limit: usize) -> Result<Vec<Alert>, StoreError>;

    // ── Audit ────────────────────────────────────────────────────────

    async fn append_audit(&self, entry: AuditEntry) -> Result<(), StoreError>;
}

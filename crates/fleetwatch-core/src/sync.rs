//! Synchronization orchestrator.
//!
//! One run walks the entity kinds in dependency order — sites,
//! devices, alerts, then per-device components — and generation-swaps
//! each table. Steps tolerate each other's failures: a failed sites
//! fetch does not stop the devices step, and one device's component
//! failure never touches another device's slice. There is no retry
//! anywhere; a fetch gets exactly one attempt and either lands,
//! substitutes the sample set (when the policy allows), or records the
//! step failed.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures_util::{StreamExt, stream};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use fleetwatch_api::{RmmClient, sample};

use crate::dashboard::DashboardStats;
use crate::error::CoreError;
use crate::model::{Alert, Component, Device, Site};
use crate::normalize;
use crate::store::RecordStore;

/// Bound on concurrent per-device component cycles.
pub const DEFAULT_COMPONENT_WORKERS: usize = 4;

/// What to do when a fetch fails.
///
/// Sample substitution is opt-in and always alarmed with a `warn!`;
/// the default is to record the step failed and keep the previous
/// generation in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    #[default]
    Deny,
    SampleData,
}

/// Result of one entity-kind step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum StepOutcome {
    /// Table swapped to a fresh generation of `count` rows.
    Replaced { count: usize },
    /// Fetch or store write failed; previous generation retained
    /// (unless the insert half of the swap is what failed).
    Failed { reason: String },
    /// Step never ran (cancellation, or its prerequisite failed).
    Skipped,
}

impl StepOutcome {
    pub fn is_replaced(&self) -> bool {
        matches!(self, Self::Replaced { .. })
    }
}

/// Per-run report handed back to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub started_at: DateTime<Utc>,
    pub sites: StepOutcome,
    pub devices: StepOutcome,
    pub alerts: StepOutcome,
    /// Aggregate over all per-device component cycles; `count` is the
    /// total component rows stored.
    pub components: StepOutcome,
    /// Devices whose component cycle failed, with the reason. Never
    /// fatal to the run.
    pub component_failures: Vec<(String, String)>,
    pub cancelled: bool,
}

impl SyncReport {
    fn skipped(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            sites: StepOutcome::Skipped,
            devices: StepOutcome::Skipped,
            alerts: StepOutcome::Skipped,
            components: StepOutcome::Skipped,
            component_failures: Vec::new(),
            cancelled: false,
        }
    }

    /// `true` when the three table-wide steps all replaced their
    /// generation. Component failures are advisory and do not flip
    /// this.
    pub fn success(&self) -> bool {
        self.sites.is_replaced() && self.devices.is_replaced() && self.alerts.is_replaced()
    }
}

/// Drives sync runs against one source and one store.
pub struct Collector<S> {
    client: RmmClient,
    store: Arc<S>,
    fallback: FallbackPolicy,
    component_workers: usize,
    cancel: CancellationToken,
}

impl<S: RecordStore> Collector<S> {
    pub fn new(client: RmmClient, store: Arc<S>) -> Self {
        Self {
            client,
            store,
            fallback: FallbackPolicy::default(),
            component_workers: DEFAULT_COMPONENT_WORKERS,
            cancel: CancellationToken::new(),
        }
    }

    #[must_use]
    pub fn with_fallback(mut self, policy: FallbackPolicy) -> Self {
        self.fallback = policy;
        self
    }

    #[must_use]
    pub fn with_component_workers(mut self, workers: usize) -> Self {
        self.component_workers = workers.max(1);
        self
    }

    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Execute one full run. Never errors: every failure lands in the
    /// report instead.
    pub async fn run(&self) -> SyncReport {
        let started_at = Utc::now();
        let mut report = SyncReport::skipped(started_at);
        info!(%started_at, "sync run started");

        if self.check_cancelled(&mut report) {
            return report;
        }
        report.sites = self.step_sites(started_at).await;

        if self.check_cancelled(&mut report) {
            return report;
        }
        let (devices_outcome, device_uids) = self.step_devices(started_at).await;
        report.devices = devices_outcome;

        if self.check_cancelled(&mut report) {
            return report;
        }
        report.alerts = self.step_alerts().await;

        if self.check_cancelled(&mut report) {
            return report;
        }
        // Component cycles walk the fetched device list, not the
        // stored one, so a failed devices table write does not block
        // them. Only a failed fetch leaves nothing to walk.
        if let Some(uids) = device_uids {
            let (outcome, failures, cancelled) = self.step_components(&uids, started_at).await;
            report.components = outcome;
            report.component_failures = failures;
            report.cancelled = cancelled;
        } else {
            report.components = StepOutcome::Skipped;
        }

        info!(
            success = report.success(),
            cancelled = report.cancelled,
            component_failures = report.component_failures.len(),
            "sync run finished"
        );
        report
    }

    /// Dashboard statistics from a fresh fetch, bypassing the store.
    pub async fn live_stats(&self) -> Result<DashboardStats, CoreError> {
        let collected_at = Utc::now();
        let sites = self
            .collect_sites(collected_at)
            .await
            .map_err(CoreError::source)?;
        let devices = self
            .collect_devices(collected_at)
            .await
            .map_err(CoreError::source)?;
        let alerts = self.collect_alerts().await.map_err(CoreError::source)?;
        Ok(DashboardStats::from_collections(&sites, &devices, &alerts))
    }

    fn check_cancelled(&self, report: &mut SyncReport) -> bool {
        if self.cancel.is_cancelled() {
            report.cancelled = true;
            warn!("sync run cancelled; remaining steps skipped");
            return true;
        }
        false
    }

    // ── Table-wide steps ─────────────────────────────────────────────

    async fn step_sites(&self, collected_at: DateTime<Utc>) -> StepOutcome {
        let rows = match self.collect_sites(collected_at).await {
            Ok(rows) => rows,
            Err(err) => return failed("sites", &err),
        };
        let count = rows.len();
        match self.store.replace_sites(rows).await {
            Ok(()) => replaced("sites", count),
            Err(err) => failed("sites", &err),
        }
    }

    /// Returns the fetched device uids whenever the fetch landed,
    /// even if the table write then failed; `None` only when there
    /// was no fetch result at all.
    async fn step_devices(
        &self,
        collected_at: DateTime<Utc>,
    ) -> (StepOutcome, Option<Vec<String>>) {
        let rows = match self.collect_devices(collected_at).await {
            Ok(rows) => rows,
            Err(err) => return (failed("devices", &err), None),
        };
        let uids: Vec<String> = rows.iter().map(|d| d.uid.clone()).collect();
        let count = rows.len();
        let outcome = match self.store.replace_devices(rows).await {
            Ok(()) => replaced("devices", count),
            Err(err) => failed("devices", &err),
        };
        (outcome, Some(uids))
    }

    async fn step_alerts(&self) -> StepOutcome {
        let rows = match self.collect_alerts().await {
            Ok(rows) => rows,
            Err(err) => return failed("alerts", &err),
        };
        let count = rows.len();
        match self.store.replace_alerts(rows).await {
            Ok(()) => replaced("alerts", count),
            Err(err) => failed("alerts", &err),
        }
    }

    // ── Component step ───────────────────────────────────────────────

    async fn step_components(
        &self,
        device_uids: &[String],
        collected_at: DateTime<Utc>,
    ) -> (StepOutcome, Vec<(String, String)>, bool) {
        let mut cycles = stream::iter(device_uids)
            .map(|uid| async move {
                let result = self.sync_device_components(uid, collected_at).await;
                (uid.clone(), result)
            })
            .buffer_unordered(self.component_workers);

        let mut stored = 0usize;
        let mut failures = Vec::new();
        let mut cancelled = false;
        loop {
            tokio::select! {
                () = self.cancel.cancelled() => {
                    cancelled = true;
                    warn!("component step cancelled mid-flight");
                    break;
                }
                next = cycles.next() => match next {
                    Some((_, Ok(count))) => stored += count,
                    Some((uid, Err(reason))) => {
                        warn!(device_uid = %uid, %reason, "component sync failed for device");
                        failures.push((uid, reason));
                    }
                    None => break,
                },
            }
        }

        (replaced("components", stored), failures, cancelled)
    }

    /// One device's fetch → normalize → scoped replace cycle.
    async fn sync_device_components(
        &self,
        device_uid: &str,
        collected_at: DateTime<Utc>,
    ) -> Result<usize, String> {
        let raw = match self.client.list_device_components(device_uid).await {
            Ok(raw) => raw,
            Err(err) => match self.fallback {
                FallbackPolicy::SampleData => {
                    warn!(device_uid, error = %err, "source unavailable; using sample components");
                    sample::components()
                }
                FallbackPolicy::Deny => return Err(err.to_string()),
            },
        };

        let components: Vec<Component> = raw
            .into_iter()
            .filter_map(|r| normalize::component(r, device_uid, collected_at))
            .collect();
        let count = components.len();
        self.store
            .replace_device_components(device_uid, components)
            .await
            .map_err(|e| e.to_string())?;
        Ok(count)
    }

    // ── Fetch + normalize ────────────────────────────────────────────

    async fn collect_sites(&self, collected_at: DateTime<Utc>) -> Result<Vec<Site>, String> {
        let raw = match self.client.list_sites(&[]).await {
            Ok(raw) => raw,
            Err(err) => match self.fallback {
                FallbackPolicy::SampleData => {
                    warn!(error = %err, "source unavailable; using sample sites");
                    sample::sites()
                }
                FallbackPolicy::Deny => return Err(err.to_string()),
            },
        };
        Ok(raw
            .into_iter()
            .filter_map(|r| normalize::site(r, collected_at))
            .collect())
    }

    async fn collect_devices(&self, collected_at: DateTime<Utc>) -> Result<Vec<Device>, String> {
        let raw = match self.client.list_devices(&[]).await {
            Ok(raw) => raw,
            Err(err) => match self.fallback {
                FallbackPolicy::SampleData => {
                    warn!(error = %err, "source unavailable; using sample devices");
                    sample::devices()
                }
                FallbackPolicy::Deny => return Err(err.to_string()),
            },
        };
        Ok(raw
            .into_iter()
            .filter_map(|r| normalize::device(r, collected_at))
            .collect())
    }

    async fn collect_alerts(&self) -> Result<Vec<Alert>, String> {
        let raw = match self.client.list_alerts(&[]).await {
            Ok(raw) => raw,
            Err(err) => match self.fallback {
                FallbackPolicy::SampleData => {
                    warn!(error = %err, "source unavailable; using sample alerts");
                    sample::alerts()
                }
                FallbackPolicy::Deny => return Err(err.to_string()),
            },
        };
        Ok(raw.into_iter().filter_map(normalize::alert).collect())
    }
}

fn replaced(step: &'static str, count: usize) -> StepOutcome {
    info!(step, count, "table replaced");
    StepOutcome::Replaced { count }
}

fn failed(step: &'static str, reason: &impl ToString) -> StepOutcome {
    let reason = reason.to_string();
    warn!(step, %reason, "sync step failed");
    StepOutcome::Failed { reason }
}

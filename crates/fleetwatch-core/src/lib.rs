//! Data layer between `fleetwatch-api` and presentation consumers.
//!
//! This crate owns the domain model, record store, and synchronization
//! pipeline for the fleetwatch workspace:
//!
//! - **[`Portal`]** — Facade exposing the operations a presentation
//!   layer consumes: trigger a sync run, read dashboard statistics,
//!   list and look up records, resolve alerts.
//!
//! - **[`Collector`]** — Synchronization orchestrator. One
//!   [`run()`](Collector::run) walks sites → devices → alerts →
//!   per-device components, generation-swapping each table and
//!   tolerating per-step failures.
//!
//! - **[`RecordStore`]** / **[`LocalStore`]** — Typed table gateway and
//!   its file-backed local implementation. Hosted backends stay behind
//!   the trait.
//!
//! - **[`normalize`]** — Pure raw→canonical conversion with documented
//!   status defaults and collection-run timestamp stamping.
//!
//! - **Domain model** ([`model`]) — Canonical types (`Site`, `Device`,
//!   `Alert`, `Component`) with typed status enums.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod identity;
pub mod model;
pub mod normalize;
pub mod portal;
pub mod store;
pub mod sync;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::SourceConfig;
pub use dashboard::{DashboardStats, DashboardSummary};
pub use error::CoreError;
pub use identity::{Identity, IdentityProvider, Session, SignInOutcome};
pub use portal::Portal;
pub use store::{AlertFilter, DeviceFilter, LocalStore, RecordStore, StoreError};
pub use sync::{Collector, FallbackPolicy, StepOutcome, SyncReport};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Alert, AlertSeverity, AlertStatus, AuditEntry, Component, ComponentStatus, Device,
    DeviceStatus, Site, SiteStatus,
};

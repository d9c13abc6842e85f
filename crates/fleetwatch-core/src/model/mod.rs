//! Canonical domain types.
//!
//! Every entity is identified by an opaque string uid assigned by the
//! remote source. Records are replaced wholesale each sync generation;
//! `created_at` on site/device/component marks the collection run, not
//! true entity creation time. Alert timestamps are authoritative event
//! times passed through from the source.

mod alert;
mod audit;
mod component;
mod device;
mod site;

pub use alert::{Alert, AlertSeverity, AlertStatus};
pub use audit::AuditEntry;
pub use component::{Component, ComponentStatus};
pub use device::{Device, DeviceStatus};
pub use site::{Site, SiteStatus};

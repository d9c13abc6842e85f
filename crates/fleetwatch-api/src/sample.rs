//! The documented fallback dataset.
//!
//! A fixed set of illustrative records the sync orchestrator may
//! substitute when the remote source is unreachable or unconfigured
//! (opt-in, and always logged -- substitution is never silent). The
//! shapes mirror what the live API returns; the uids are stable so
//! repeated fallback runs reconcile identically.

use serde::de::DeserializeOwned;
use serde_json::json;

use crate::raw::{RawAlert, RawComponent, RawDevice, RawSite};

/// Three illustrative sites.
pub fn sites() -> Vec<RawSite> {
    collection(json!([
        {
            "uid": "site-001",
            "name": "Headquarters",
            "address": "123 Flower St, Springfield",
            "status": "active",
            "device_count": 15
        },
        {
            "uid": "site-002",
            "name": "Branch Office - North",
            "address": "456 Seaside Ave, Rivermouth",
            "status": "active",
            "device_count": 8
        },
        {
            "uid": "site-003",
            "name": "Branch Office - West",
            "address": "789 Liberty Rd, Hillcrest",
            "status": "active",
            "device_count": 12
        }
    ]))
}

/// Five illustrative devices spread across the sample sites.
pub fn devices() -> Vec<RawDevice> {
    collection(json!([
        {
            "uid": "dev-001",
            "hostname": "server-hq-01",
            "site_uid": "site-001",
            "status": "online",
            "ip_address": "192.168.1.100",
            "last_seen": "2024-01-15T10:30:00Z",
            "os": "Windows Server 2019",
            "memory": "16GB",
            "cpu": "Intel Xeon"
        },
        {
            "uid": "dev-002",
            "hostname": "workstation-north-01",
            "site_uid": "site-002",
            "status": "online",
            "ip_address": "192.168.2.50",
            "last_seen": "2024-01-15T10:25:00Z",
            "os": "Windows 11",
            "memory": "8GB",
            "cpu": "Intel i5"
        },
        {
            "uid": "dev-003",
            "hostname": "server-west-01",
            "site_uid": "site-003",
            "status": "offline",
            "ip_address": "192.168.3.75",
            "last_seen": "2024-01-15T09:45:00Z",
            "os": "Ubuntu 20.04",
            "memory": "32GB",
            "cpu": "AMD EPYC"
        },
        {
            "uid": "dev-004",
            "hostname": "workstation-hq-02",
            "site_uid": "site-001",
            "status": "online",
            "ip_address": "192.168.1.101",
            "last_seen": "2024-01-15T10:28:00Z",
            "os": "Windows 10",
            "memory": "16GB",
            "cpu": "Intel i7"
        },
        {
            "uid": "dev-005",
            "hostname": "server-north-01",
            "site_uid": "site-002",
            "status": "online",
            "ip_address": "192.168.2.100",
            "last_seen": "2024-01-15T10:32:00Z",
            "os": "Windows Server 2022",
            "memory": "64GB",
            "cpu": "Intel Xeon"
        }
    ]))
}

/// Four illustrative alerts referencing the sample devices.
pub fn alerts() -> Vec<RawAlert> {
    collection(json!([
        {
            "uid": "alert-001",
            "device_uid": "dev-003",
            "alert_type": "device_offline",
            "severity": "high",
            "status": "new",
            "message": "Device server-west-01 has been offline for more than 30 minutes",
            "created_at": "2024-01-15T09:45:00Z"
        },
        {
            "uid": "alert-002",
            "device_uid": "dev-001",
            "alert_type": "high_cpu_usage",
            "severity": "medium",
            "status": "new",
            "message": "CPU usage above 90% on server-hq-01",
            "created_at": "2024-01-15T10:15:00Z"
        },
        {
            "uid": "alert-003",
            "device_uid": "dev-004",
            "alert_type": "low_disk_space",
            "severity": "low",
            "status": "resolved",
            "message": "Low disk space on workstation-hq-02",
            "created_at": "2024-01-15T09:30:00Z"
        },
        {
            "uid": "alert-004",
            "device_uid": "dev-002",
            "alert_type": "security_update",
            "severity": "medium",
            "status": "new",
            "message": "Pending security updates on workstation-north-01",
            "created_at": "2024-01-15T10:00:00Z"
        }
    ]))
}

/// Four illustrative components, returned for any sample device.
pub fn components() -> Vec<RawComponent> {
    collection(json!([
        {
            "uid": "comp-001",
            "name": "CPU",
            "type": "processor",
            "status": "healthy",
            "details": "Intel Xeon E5-2680 v4 @ 2.40GHz"
        },
        {
            "uid": "comp-002",
            "name": "Memory",
            "type": "memory",
            "status": "healthy",
            "details": "16GB DDR4"
        },
        {
            "uid": "comp-003",
            "name": "Disk C:",
            "type": "storage",
            "status": "warning",
            "details": "500GB SSD - 85% used"
        },
        {
            "uid": "comp-004",
            "name": "Network Interface",
            "type": "network",
            "status": "healthy",
            "details": "Gigabit Ethernet"
        }
    ]))
}

/// The sample records are static literals; a parse failure here would
/// be a bug, so degrade to empty rather than panic.
fn collection<T: DeserializeOwned>(value: serde_json::Value) -> Vec<T> {
    serde_json::from_value(value).unwrap_or_default()
}

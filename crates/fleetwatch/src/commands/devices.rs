//! Device command handlers: list and single-device detail.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tabled::Tabled;

use fleetwatch_core::store::parse_status_filter;
use fleetwatch_core::{Component, Device, DeviceFilter, LocalStore, Portal};

use crate::cli::{DeviceArgs, DevicesArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "UID")]
    uid: String,
    #[tabled(rename = "Hostname")]
    hostname: String,
    #[tabled(rename = "Site")]
    site: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Last seen")]
    last_seen: String,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            uid: d.uid.clone(),
            hostname: d.hostname.clone(),
            site: d.site_uid.clone().unwrap_or_default(),
            status: d.status.to_string(),
            ip: d.ip_address.clone().unwrap_or_default(),
            last_seen: d.last_seen.map(fmt_time).unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct ComponentRow {
    #[tabled(rename = "UID")]
    uid: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Details")]
    details: String,
}

impl From<&Component> for ComponentRow {
    fn from(c: &Component) -> Self {
        Self {
            uid: c.uid.clone(),
            name: c.name.clone(),
            kind: c.component_type.clone(),
            status: c.status.to_string(),
            details: c.details.clone().unwrap_or_default(),
        }
    }
}

fn fmt_time(t: DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M").to_string()
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn list(
    portal: &Portal<LocalStore>,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let filter = DeviceFilter {
        site_uid: args.site,
        status: parse_status_filter(args.status.as_deref()),
    };
    let devices = portal.list_devices(&filter).await?;
    let out = output::render_list(&global.output, &devices, |d| DeviceRow::from(d), |d| d.uid.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Detail view payload so the structured formats carry both halves.
#[derive(Serialize)]
struct DeviceDetail {
    device: Device,
    components: Vec<Component>,
}

pub async fn show(
    portal: &Portal<LocalStore>,
    args: DeviceArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let Some((device, components)) = portal.get_device(&args.uid).await? else {
        // A miss is an empty state, not an error.
        if !global.quiet {
            eprintln!("Device '{}' not in the store. Run: fleetwatch sync", args.uid);
        }
        return Ok(());
    };

    let detail = DeviceDetail { device, components };
    let out = output::render_single(
        &global.output,
        &detail,
        render_detail,
        |d| d.device.uid.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

fn render_detail(detail: &DeviceDetail) -> String {
    let d = &detail.device;
    let mut out = format!(
        "Device {uid}\n\
         Hostname:  {hostname}\n\
         Site:      {site}\n\
         Status:    {status}\n\
         IP:        {ip}\n\
         OS:        {os}\n\
         Last seen: {last_seen}\n",
        uid = d.uid,
        hostname = d.hostname,
        site = d.site_uid.clone().unwrap_or_default(),
        status = d.status,
        ip = d.ip_address.clone().unwrap_or_default(),
        os = d.os.clone().unwrap_or_default(),
        last_seen = d.last_seen.map(fmt_time).unwrap_or_default(),
    );

    if detail.components.is_empty() {
        out.push_str("\nNo components recorded.");
    } else {
        let rows: Vec<ComponentRow> = detail.components.iter().map(ComponentRow::from).collect();
        out.push('\n');
        out.push_str(&output::table(rows));
    }
    out
}

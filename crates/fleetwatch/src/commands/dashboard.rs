//! Dashboard command handler: counts plus recency lists.

use fleetwatch_core::{LocalStore, Portal};
use tabled::Tabled;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::stats;

#[derive(Tabled)]
struct RecentDeviceRow {
    #[tabled(rename = "UID")]
    uid: String,
    #[tabled(rename = "Hostname")]
    hostname: String,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Tabled)]
struct RecentAlertRow {
    #[tabled(rename = "UID")]
    uid: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Raised")]
    raised: String,
}

pub async fn handle(portal: &Portal<LocalStore>, global: &GlobalOpts) -> Result<(), CliError> {
    let summary = portal.dashboard().await;

    // Structured formats get the whole summary document.
    if !matches!(global.output, OutputFormat::Table) {
        let out = output::render_single(
            &global.output,
            &summary,
            |_| String::new(),
            |s| format!("{} devices", s.stats.total_devices),
        );
        output::print_output(&out, global.quiet);
        return Ok(());
    }

    let mut out = stats::render(&summary.stats, global);

    if !summary.recent_devices.is_empty() {
        let rows: Vec<RecentDeviceRow> = summary
            .recent_devices
            .iter()
            .map(|d| RecentDeviceRow {
                uid: d.uid.clone(),
                hostname: d.hostname.clone(),
                status: d.status.to_string(),
            })
            .collect();
        out.push_str("\n\nRecently seen devices\n");
        out.push_str(&output::table(rows));
    }

    if !summary.recent_alerts.is_empty() {
        let rows: Vec<RecentAlertRow> = summary
            .recent_alerts
            .iter()
            .map(|a| RecentAlertRow {
                uid: a.uid.clone(),
                severity: a.severity.to_string(),
                status: a.status.to_string(),
                raised: a
                    .created_at
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default(),
            })
            .collect();
        out.push_str("\n\nRecent alerts\n");
        out.push_str(&output::table(rows));
    }

    output::print_output(&out, global.quiet);
    Ok(())
}

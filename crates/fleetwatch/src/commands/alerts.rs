//! Alert command handlers: list and resolve.

use owo_colors::OwoColorize;
use tabled::Tabled;

use fleetwatch_core::store::parse_status_filter;
use fleetwatch_core::{Alert, AlertFilter, AlertSeverity, LocalStore, Portal};

use crate::cli::{AlertsArgs, GlobalOpts, ResolveArgs};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct AlertRow {
    #[tabled(rename = "UID")]
    uid: String,
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Message")]
    message: String,
}

fn to_row(a: &Alert, color: bool) -> AlertRow {
    let severity = if color {
        match a.severity {
            AlertSeverity::Critical | AlertSeverity::High => a.severity.red().to_string(),
            AlertSeverity::Medium | AlertSeverity::Warning => a.severity.yellow().to_string(),
            AlertSeverity::Low | AlertSeverity::Info => a.severity.to_string(),
        }
    } else {
        a.severity.to_string()
    };
    AlertRow {
        uid: a.uid.clone(),
        device: a.device_uid.clone().unwrap_or_default(),
        kind: a.alert_type.clone(),
        severity,
        status: a.status.to_string(),
        message: a.message.clone().unwrap_or_default(),
    }
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn list(
    portal: &Portal<LocalStore>,
    args: AlertsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let filter = AlertFilter {
        status: parse_status_filter(args.status.as_deref()),
        severity: parse_status_filter(args.severity.as_deref()),
    };
    let alerts = portal.list_alerts(&filter).await?;
    let color = output::should_color(&global.color);
    let out = output::render_list(
        &global.output,
        &alerts,
        |a| to_row(a, color),
        |a| a.uid.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn resolve(
    portal: &Portal<LocalStore>,
    args: ResolveArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if !portal.resolve_alert(&args.uid).await? {
        return Err(CliError::NotFound {
            resource_type: "alert".into(),
            identifier: args.uid,
            list_command: "alerts".into(),
        });
    }
    if !global.quiet {
        eprintln!("Alert '{}' resolved", args.uid);
    }
    Ok(())
}

//! Sync command handler.

use owo_colors::OwoColorize;

use fleetwatch_core::{LocalStore, Portal, StepOutcome, SyncReport};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

pub async fn handle(portal: &Portal<LocalStore>, global: &GlobalOpts) -> Result<(), CliError> {
    let report = portal.run_sync().await;

    let out = match global.output {
        OutputFormat::Table | OutputFormat::Plain => {
            render_report(&report, output::should_color(&global.color))
        }
        _ => output::render_single(&global.output, &report, |_| String::new(), |_| String::new()),
    };
    output::print_output(&out, global.quiet);

    if report.success() {
        Ok(())
    } else if report.cancelled {
        Err(CliError::SyncFailed {
            failed_steps: "cancelled".into(),
        })
    } else {
        Err(CliError::SyncFailed {
            failed_steps: failed_step_names(&report).join(", "),
        })
    }
}

fn failed_step_names(report: &SyncReport) -> Vec<&'static str> {
    let steps = [
        ("sites", &report.sites),
        ("devices", &report.devices),
        ("alerts", &report.alerts),
        ("components", &report.components),
    ];
    steps
        .into_iter()
        .filter(|(_, outcome)| matches!(outcome, StepOutcome::Failed { .. }))
        .map(|(name, _)| name)
        .collect()
}

fn render_report(report: &SyncReport, color: bool) -> String {
    let mut lines = vec![format!("Sync started {}", report.started_at.to_rfc3339())];
    for (name, outcome) in [
        ("sites", &report.sites),
        ("devices", &report.devices),
        ("alerts", &report.alerts),
        ("components", &report.components),
    ] {
        lines.push(format!("  {name:<12} {}", render_outcome(outcome, color)));
    }
    for (device_uid, reason) in &report.component_failures {
        lines.push(format!("  ! components for {device_uid}: {reason}"));
    }
    if report.cancelled {
        lines.push("  run cancelled".to_owned());
    }
    lines.join("\n")
}

fn render_outcome(outcome: &StepOutcome, color: bool) -> String {
    match outcome {
        StepOutcome::Replaced { count } => {
            let label = format!("replaced ({count} records)");
            if color { label.green().to_string() } else { label }
        }
        StepOutcome::Failed { reason } => {
            let label = format!("failed: {reason}");
            if color { label.red().to_string() } else { label }
        }
        StepOutcome::Skipped => {
            let label = "skipped".to_owned();
            if color { label.yellow().to_string() } else { label }
        }
    }
}

//! Stats command handler.

use tabled::Tabled;

use fleetwatch_core::{DashboardStats, LocalStore, Portal};

use crate::cli::{GlobalOpts, StatsArgs};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
pub(super) struct StatRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Count")]
    count: u64,
}

pub(super) fn stat_rows(stats: &DashboardStats) -> Vec<StatRow> {
    vec![
        StatRow {
            metric: "Sites",
            count: stats.total_sites,
        },
        StatRow {
            metric: "Devices",
            count: stats.total_devices,
        },
        StatRow {
            metric: "  online",
            count: stats.online_devices,
        },
        StatRow {
            metric: "  offline",
            count: stats.offline_devices,
        },
        StatRow {
            metric: "Alerts",
            count: stats.total_alerts,
        },
        StatRow {
            metric: "  new",
            count: stats.new_alerts,
        },
    ]
}

pub(super) fn render(stats: &DashboardStats, global: &GlobalOpts) -> String {
    output::render_single(
        &global.output,
        stats,
        |s| output::table(stat_rows(s)),
        |s| format!("{} {} {}", s.total_sites, s.total_devices, s.total_alerts),
    )
}

pub async fn handle(
    portal: &Portal<LocalStore>,
    args: StatsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    // Live mode bypasses the store; source reachability was checked
    // before dispatch.
    let stats = if args.live {
        portal.live_stats().await?
    } else {
        portal.stats().await
    };

    output::print_output(&render(&stats, global), global.quiet);
    Ok(())
}

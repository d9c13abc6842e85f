//! Site command handlers.

use tabled::Tabled;

use fleetwatch_core::{LocalStore, Portal, Site};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SiteRow {
    #[tabled(rename = "UID")]
    uid: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Devices")]
    devices: String,
    #[tabled(rename = "Address")]
    address: String,
}

impl From<&Site> for SiteRow {
    fn from(s: &Site) -> Self {
        Self {
            uid: s.uid.clone(),
            name: s.name.clone(),
            status: s.status.to_string(),
            devices: s.device_count.to_string(),
            address: s.address.clone().unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(portal: &Portal<LocalStore>, global: &GlobalOpts) -> Result<(), CliError> {
    let sites = portal.list_sites().await?;
    let out = output::render_list(&global.output, &sites, |s| SiteRow::from(s), |s| s.uid.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}

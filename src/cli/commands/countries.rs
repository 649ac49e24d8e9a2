use anyhow::Result;
use tracing::{info, trace};

use super::open_dashboard;
use crate::config::Settings;

pub fn list_countries(settings: &Settings) -> Result<()> {
    trace!("Entering list_countries function");
    let mut dashboard = open_dashboard(settings);

    let count = dashboard.load_countries().len();
    if dashboard.countries_from_fallback() {
        println!("Service unavailable, showing the built-in country list.");
    }
    for country in dashboard.countries() {
        println!("{}", country);
    }

    info!(count, "Countries listed");
    Ok(())
}

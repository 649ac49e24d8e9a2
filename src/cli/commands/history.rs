use anyhow::Result;
use common::format_fixed;
use tracing::{info, trace};

use super::open_dashboard;
use crate::config::Settings;

pub fn history(settings: &Settings, country: &str) -> Result<()> {
    trace!("Entering history function");
    let mut dashboard = open_dashboard(settings);
    dashboard.select_country(country);

    if let Some(banner) = dashboard.history_banner() {
        println!("{}", banner);
    }

    println!("{:<6} {:>10}", "Year", "Growth %");
    for point in dashboard.timeline() {
        println!("{:<6} {:>10}", point.year, format_fixed(point.growth, 2));
    }

    if let Some(trend) = dashboard.recent_trend_text() {
        println!("Recent trend: {}%", trend);
    }

    info!(
        country,
        points = dashboard.timeline().len(),
        estimated = dashboard.is_estimated(),
        "History shown"
    );
    Ok(())
}

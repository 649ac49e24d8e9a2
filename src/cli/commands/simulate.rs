use anyhow::{Result, anyhow};
use chrono::Local;
use common::{Indicator, PredictionOutcome, format_fixed, format_number};
use tracing::{error, info, trace};

use super::open_dashboard;
use crate::config::Settings;

/// Run one scenario: load the country's history, submit the six rates,
/// print the outcome and optionally export the report.
pub fn simulate(
    settings: &Settings,
    country: &str,
    rates: [String; 6],
    export: bool,
) -> Result<()> {
    trace!("Entering simulate function");
    let mut dashboard = open_dashboard(settings);

    dashboard.select_country(country);
    if let Some(banner) = dashboard.history_banner() {
        println!("{}", banner);
    }

    for (indicator, text) in Indicator::ALL.into_iter().zip(rates) {
        dashboard.set_field(indicator, text);
    }

    let outcome = match dashboard.predict() {
        Ok(outcome) => outcome.clone(),
        Err(e) => {
            error!("Simulation failed: {}", e);
            return Err(anyhow!("Scenario simulation failed: {}", e));
        }
    };
    print_outcome(&outcome);

    if let Some(comparison) = dashboard.trend_comparison() {
        let direction = if comparison.is_above() { "above" } else { "below" };
        println!(
            "Recent trend: {}% (prediction is {} trend)",
            format_fixed(comparison.trend, 2),
            direction
        );
    }

    if export {
        let today = Local::now().date_naive();
        let path = dashboard
            .export_report(&settings.output_dir, today)
            .map_err(|e| anyhow!("Report export failed: {}", e))?;
        println!("Report saved to {}", path.display());
    }

    info!(country, "Simulation completed");
    Ok(())
}

fn print_outcome(outcome: &PredictionOutcome) {
    println!("Country: {}", outcome.country());
    println!("Predicted GDP Growth: {}%", format_fixed(outcome.predicted_growth, 2));
    println!("Confidence: {}%", outcome.confidence);
    println!("Model: {}", outcome.model_type);
    println!();

    println!("Input Parameters:");
    for (indicator, value) in outcome.rates().iter() {
        println!("  {}: {}%", indicator.summary_label(), format_number(value));
    }
    println!();

    println!("Contribution Analysis:");
    for entry in &outcome.contributions {
        println!(
            "  {:<14} {:>8}% ({}% share)",
            entry.name,
            format_number(entry.value),
            format_fixed(entry.percentage, 1)
        );
    }

    if !outcome.interpretation.is_empty() {
        println!();
        println!("{}", outcome.interpretation);
    }
    if !outcome.note.is_empty() {
        println!("Note: {}", outcome.note);
    }
}

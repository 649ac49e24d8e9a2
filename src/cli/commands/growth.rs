use anyhow::{Result, anyhow};
use compute::growth::{GrowthCalculator, GrowthTrend};
use tracing::{debug, info};

/// Parse `NAME=PREVIOUS:CURRENT`.
fn parse_value(spec: &str) -> Result<(&str, &str, &str)> {
    let (name, values) = spec
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected NAME=PREVIOUS:CURRENT, got {:?}", spec))?;
    let (previous, current) = values
        .split_once(':')
        .ok_or_else(|| anyhow!("Expected PREVIOUS:CURRENT for {}, got {:?}", name, values))?;
    Ok((name.trim(), previous.trim(), current.trim()))
}

pub fn growth(values: &[String]) -> Result<()> {
    let mut calculator = GrowthCalculator::new();
    for spec in values {
        let (name, previous, current) = parse_value(spec)?;
        debug!(name, previous, current, "Growth input");
        calculator.set_values(name, previous, current)?;
    }

    calculator.calculate();

    for indicator in calculator.indicators() {
        let Some(rate) = indicator.growth_rate else {
            continue;
        };
        let marker = match indicator.trend() {
            Some(GrowthTrend::Positive) => "+",
            Some(GrowthTrend::Negative) => "-",
            _ => "=",
        };
        println!("[{}] {}: {}%", marker, indicator.label, common::format_number(rate));
    }

    info!(complete = calculator.has_all_inputs(), "Growth rates calculated");
    Ok(())
}

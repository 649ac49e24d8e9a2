//! The two-page scenario report.
//!
//! Page 1 carries the header band, the simulation results, the six inputs,
//! the contribution breakdown and the interpretation. Page 2 is a visual
//! summary: recent history with its mean, and bar rows for contributions
//! and indicators. Sections may spill onto further pages; every page gets
//! the same footer and a "Page X of N" marker.

use chrono::NaiveDate;
use common::{ChartDataPoint, PredictionOutcome, format_fixed, format_number};
use compute::timeline::{average_growth, recent_historical};
use tracing::{debug, instrument};

use crate::document::{Align, Document, FontStyle, LayoutWriter, PAGE_TOP_MM, Rgb, TextStyle};

pub const MARGIN: f32 = 15.0;
pub const BAR_MAX_WIDTH: f32 = 60.0;
pub const BAR_HEIGHT: f32 = 8.0;
pub const BAR_OFFSET: f32 = 70.0;
pub const BAR_VALUE_OFFSET: f32 = 135.0;
pub const RECENT_YEARS: usize = 10;

pub const HEADER_BAND: Rgb = Rgb(15, 23, 42);
pub const ACCENT_GREEN: Rgb = Rgb(16, 185, 129);
pub const NEGATIVE_RED: Rgb = Rgb(239, 68, 68);
pub const NOTE_GREY: Rgb = Rgb(100, 100, 100);
pub const FOOTER_GREY: Rgb = Rgb(128, 128, 128);

pub const REPORT_TITLE: &str = "Vikalp.ai - Scenario Simulator";
pub const REPORT_SUBTITLE: &str = "Economic Scenario Analysis Report";
pub const FOOTER_TEXT: &str = "Generated by Vikalp.ai - AI-Powered Economic Analysis";
pub const FILE_PREFIX: &str = "Vikalp_Scenario";

const CLOSING_NOTE: &str = "Note: For interactive charts and detailed visualizations, please view \
the application dashboard. This report provides a summary of the key data points.";

/// Inputs of the report.
#[derive(Debug, Clone, Copy)]
pub struct ReportData<'a> {
    pub outcome: &'a PredictionOutcome,
    /// Current display timeline; only its historical points are used.
    pub timeline: &'a [ChartDataPoint],
    pub generated_on: NaiveDate,
}

/// Lay out the full report.
#[instrument(skip(data), fields(country = data.outcome.country()))]
pub fn build_scenario_report(data: &ReportData<'_>) -> Document {
    let mut writer = LayoutWriter::a4();

    write_summary_page(&mut writer, data);
    writer.add_page();
    writer.y = PAGE_TOP_MM;
    write_visual_summary(&mut writer, data);

    writer.stamp_footers(
        FOOTER_TEXT,
        MARGIN,
        TextStyle {
            size: 8.0,
            font: FontStyle::Normal,
            color: FOOTER_GREY,
        },
    );

    let document = writer.finish();
    debug!(pages = document.page_count(), "Scenario report laid out");
    document
}

/// The interpretation paragraph of page 1.
pub fn interpretation_text(predicted_growth: f64) -> String {
    format!(
        "This scenario simulation shows that if the specified growth rates occur simultaneously, \
         GDP is predicted to grow by {}%. This is a sensitivity analysis tool designed for \
         \"what-if\" economic scenarios, not a forecast of future GDP.",
        format_number(predicted_growth)
    )
}

/// `Vikalp_Scenario_<Country>_<YYYY-MM-DD>.pdf`, whitespace runs in the
/// country name replaced by a single underscore.
pub fn report_file_name(country: &str, date: NaiveDate) -> String {
    let mut name = String::with_capacity(country.len());
    let mut in_whitespace = false;
    for c in country.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                name.push('_');
            }
            in_whitespace = true;
        } else {
            name.push(c);
            in_whitespace = false;
        }
    }
    format!("{}_{}_{}.pdf", FILE_PREFIX, name, date.format("%Y-%m-%d"))
}

fn write_summary_page(writer: &mut LayoutWriter, data: &ReportData<'_>) {
    let outcome = data.outcome;
    let page_width = writer.page_width();

    writer.set_fill_color(HEADER_BAND);
    writer.rect(0.0, 0.0, page_width, 40.0);

    writer.set_text_color(Rgb::WHITE);
    writer.set_font(24.0, FontStyle::Normal);
    writer.text(MARGIN, 20.0, REPORT_TITLE);
    writer.set_font(12.0, FontStyle::Normal);
    writer.text(MARGIN, 30.0, REPORT_SUBTITLE);
    writer.set_font(10.0, FontStyle::Normal);
    writer.text_aligned(
        page_width - MARGIN,
        30.0,
        data.generated_on.format("%B %-d, %Y").to_string(),
        Align::Right,
    );
    writer.set_text_color(Rgb::BLACK);

    writer.y = 55.0;
    heading(writer, 16.0, "Simulation Results");

    writer.y += 10.0;
    writer.set_font(11.0, FontStyle::Normal);
    let y = writer.y;
    writer.text(MARGIN, y, format!("Country: {}", outcome.country()));

    writer.y += 7.0;
    writer.set_font(14.0, FontStyle::Bold);
    writer.set_text_color(ACCENT_GREEN);
    let y = writer.y;
    writer.text(
        MARGIN,
        y,
        format!("Predicted GDP Growth: {}%", format_number(outcome.predicted_growth)),
    );
    writer.set_text_color(Rgb::BLACK);

    writer.y += 10.0;
    writer.set_font(11.0, FontStyle::Normal);
    let y = writer.y;
    writer.text(MARGIN, y, format!("Confidence Score: {}%", outcome.confidence));
    writer.y += 7.0;
    let y = writer.y;
    writer.text(MARGIN, y, format!("Simulation Type: {}", outcome.model_type));

    writer.y += 15.0;
    heading(writer, 16.0, "Input Parameters");
    writer.y += 10.0;
    writer.set_font(11.0, FontStyle::Normal);
    for (indicator, value) in outcome.rates().iter() {
        let y = writer.y;
        writer.text(
            MARGIN,
            y,
            format!("{}: {}%", indicator.input_label(), format_number(value)),
        );
        writer.y += 7.0;
    }

    writer.y += 10.0;
    heading(writer, 16.0, "Contribution Breakdown");
    writer.y += 10.0;
    writer.set_font(11.0, FontStyle::Normal);
    for entry in &outcome.contributions {
        writer.break_page_if_below(30.0);
        let y = writer.y;
        writer.text(
            MARGIN,
            y,
            format!(
                "{}: {}% ({}% contribution)",
                entry.name,
                format_fixed(entry.value, 2),
                format_fixed(entry.percentage, 1)
            ),
        );
        writer.y += 7.0;
    }

    writer.y += 10.0;
    writer.break_page_if_below(50.0);
    heading(writer, 14.0, "Interpretation");
    writer.y += 10.0;
    writer.set_font(10.0, FontStyle::Normal);
    let y = writer.y;
    writer.text_wrapped(
        MARGIN,
        y,
        &interpretation_text(outcome.predicted_growth),
        page_width - 2.0 * MARGIN,
    );
}

fn write_visual_summary(writer: &mut LayoutWriter, data: &ReportData<'_>) {
    let outcome = data.outcome;
    let page_width = writer.page_width();

    heading(writer, 18.0, "Visual Data Summary");
    writer.y += 15.0;

    let recent = recent_historical(data.timeline, RECENT_YEARS);
    if let Some(average) = average_growth(&recent) {
        heading(writer, 14.0, "Historical GDP Growth Data");
        writer.y += 8.0;
        writer.set_font(10.0, FontStyle::Normal);
        let y = writer.y;
        writer.text(MARGIN, y, "Recent 10 Years:");
        writer.y += 6.0;
        for point in &recent {
            let y = writer.y;
            writer.text(
                MARGIN + 5.0,
                y,
                format!("  {}: {}%", point.year, format_number(point.growth)),
            );
            writer.y += 5.0;
        }
        writer.y += 5.0;
        writer.set_font(10.0, FontStyle::Bold);
        let y = writer.y;
        writer.text(
            MARGIN,
            y,
            format!("Average Growth (Last 10 Years): {}%", format_fixed(average, 2)),
        );
        writer.y += 10.0;
    }

    heading(writer, 14.0, "GDP Growth Contributors (Visual Breakdown)");
    writer.y += 8.0;
    writer.set_font(10.0, FontStyle::Normal);
    let max_percentage = max_of(outcome.contributions.iter().map(|e| e.percentage));
    for entry in &outcome.contributions {
        writer.break_page_if_below(30.0);
        bar_row(
            writer,
            &entry.name,
            bar_length(entry.percentage, max_percentage),
            ACCENT_GREEN,
            format!("{}%", format_fixed(entry.percentage, 1)),
        );
    }

    writer.y += 10.0;
    writer.break_page_if_below(80.0);
    heading(writer, 14.0, "Economic Indicators Summary");
    writer.y += 8.0;
    writer.set_font(10.0, FontStyle::Normal);
    let max_indicator = max_of(outcome.rates().iter().map(|(_, v)| v.abs()));
    for (indicator, value) in outcome.rates().iter() {
        writer.break_page_if_below(30.0);
        let color = if value >= 0.0 { ACCENT_GREEN } else { NEGATIVE_RED };
        bar_row(
            writer,
            indicator.summary_label(),
            bar_length(value.abs(), max_indicator),
            color,
            format!("{}%", format_fixed(value, 2)),
        );
    }

    writer.y += 15.0;
    writer.break_page_if_below(40.0);
    writer.set_font(9.0, FontStyle::Italic);
    writer.set_text_color(NOTE_GREY);
    let y = writer.y;
    writer.text_wrapped(MARGIN, y, CLOSING_NOTE, page_width - 2.0 * MARGIN);
    writer.set_text_color(Rgb::BLACK);
}

fn heading(writer: &mut LayoutWriter, size: f32, text: &str) {
    writer.set_font(size, FontStyle::Bold);
    let y = writer.y;
    writer.text(MARGIN, y, text);
}

fn bar_row(writer: &mut LayoutWriter, label: &str, length: f32, color: Rgb, value_text: String) {
    let y = writer.y;
    writer.text(MARGIN, y + 5.0, label);
    writer.set_fill_color(color);
    writer.rect(MARGIN + BAR_OFFSET, y, length, BAR_HEIGHT);
    writer.text(MARGIN + BAR_VALUE_OFFSET, y + 5.0, value_text);
    writer.y += BAR_HEIGHT + 4.0;
}

/// Largest value, `None` for an empty sequence.
fn max_of(values: impl Iterator<Item = f64>) -> Option<f64> {
    values.fold(None, |max, v| Some(max.map_or(v, |m: f64| m.max(v))))
}

/// Bar length scaled to the maximum; zero when there is nothing to scale by.
fn bar_length(value: f64, max: Option<f64>) -> f32 {
    match max {
        Some(max) if max > 0.0 && value.is_finite() => (value / max * BAR_MAX_WIDTH as f64) as f32,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Element;
    use common::{ContributionEntry, IndicatorRates, ScenarioInput};

    fn outcome(rates: IndicatorRates) -> PredictionOutcome {
        let total: f64 = rates.iter().map(|(_, v)| v.abs()).sum();
        PredictionOutcome {
            scenario: ScenarioInput::new("United States", rates),
            predicted_growth: 3.456,
            model_type: "Linear Regression".to_string(),
            interpretation: String::new(),
            note: String::new(),
            confidence: 92,
            contributions: rates
                .iter()
                .map(|(indicator, value)| ContributionEntry {
                    indicator,
                    name: indicator.factor_name().to_string(),
                    value,
                    percentage: if total > 0.0 { value.abs() / total * 100.0 } else { 0.0 },
                })
                .collect(),
        }
    }

    fn sample_rates() -> IndicatorRates {
        IndicatorRates {
            population: 1.1,
            exports: 5.2,
            imports: -4.8,
            investment: 3.5,
            consumption: 2.8,
            government_spending: 2.0,
        }
    }

    fn timeline() -> Vec<ChartDataPoint> {
        let mut points: Vec<ChartDataPoint> = (2000..2022)
            .map(|year| ChartDataPoint::historical(year, 2.0))
            .collect();
        points.push(ChartDataPoint::prediction("2022", 3.46));
        points.push(ChartDataPoint::prediction("2023", 3.63));
        points
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn bar_widths(document: &Document) -> Vec<(f32, Rgb)> {
        document
            .pages
            .iter()
            .flat_map(|p| p.rects())
            .filter_map(|e| match e {
                Element::Rect { width, fill, height, .. } if *height == BAR_HEIGHT => {
                    Some((*width, *fill))
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_report_has_two_pages_with_footers() {
        let outcome = outcome(sample_rates());
        let document = build_scenario_report(&ReportData {
            outcome: &outcome,
            timeline: &[],
            generated_on: date(),
        });

        assert_eq!(document.page_count(), 2);
        for (i, page) in document.pages.iter().enumerate() {
            assert!(page.contains_text(FOOTER_TEXT));
            assert!(page.contains_text(&format!("Page {} of 2", i + 1)));
        }
    }

    #[test]
    fn test_history_pushes_last_indicator_onto_third_page() {
        let outcome = outcome(sample_rates());
        let timeline = timeline();
        let document = build_scenario_report(&ReportData {
            outcome: &outcome,
            timeline: &timeline,
            generated_on: date(),
        });

        assert_eq!(document.page_count(), 3);
        let third = &document.pages[2];
        assert!(third.contains_text("Govt Spending Growth"));
        assert!(third.contains_text("Page 3 of 3"));
        assert!(third.contains_text("Note: For interactive charts"));
        assert!(document.pages[1].contains_text("Page 2 of 3"));
    }

    #[test]
    fn test_summary_page_content() {
        let outcome = outcome(sample_rates());
        let timeline = timeline();
        let document = build_scenario_report(&ReportData {
            outcome: &outcome,
            timeline: &timeline,
            generated_on: date(),
        });
        let first = &document.pages[0];

        assert!(first.contains_text("October 16, 2026"));
        assert!(first.contains_text("Country: United States"));
        assert!(first.contains_text("Predicted GDP Growth: 3.456%"));
        assert!(first.contains_text("Confidence Score: 92%"));
        assert!(first.contains_text("Simulation Type: Linear Regression"));
        assert!(first.contains_text("Investment (Capital Formation): 3.5%"));
        assert!(first.contains_text("Imports: -4.80% (24.7% contribution)"));
        assert!(first.contains_text("GDP is predicted to grow by"));
    }

    #[test]
    fn test_visual_summary_uses_last_ten_historical_points() {
        let outcome = outcome(sample_rates());
        let timeline = timeline();
        let document = build_scenario_report(&ReportData {
            outcome: &outcome,
            timeline: &timeline,
            generated_on: date(),
        });
        let second = &document.pages[1];

        assert!(second.contains_text("  2012: 2%"));
        assert!(second.contains_text("  2021: 2%"));
        assert!(!second.contains_text("  2011: 2%"));
        assert!(!second.contains_text("2022:"));
        assert!(second.contains_text("Average Growth (Last 10 Years): 2.00%"));
    }

    #[test]
    fn test_bars_scale_to_maximum_and_color_by_sign() {
        let outcome = outcome(sample_rates());
        let document = build_scenario_report(&ReportData {
            outcome: &outcome,
            timeline: &[],
            generated_on: date(),
        });
        let bars = bar_widths(&document);
        assert_eq!(bars.len(), 12);

        // exports has the largest share and the largest magnitude
        assert!((bars[1].0 - BAR_MAX_WIDTH).abs() < 1e-4);
        assert!((bars[7].0 - BAR_MAX_WIDTH).abs() < 1e-4);
        assert!(bars.iter().all(|(w, _)| *w <= BAR_MAX_WIDTH + 1e-4));
        // imports indicator bar is negative
        assert_eq!(bars[8].1, NEGATIVE_RED);
        assert_eq!(bars[6].1, ACCENT_GREEN);
    }

    #[test]
    fn test_all_zero_inputs_do_not_divide_by_zero() {
        let outcome = outcome(IndicatorRates::default());
        let document = build_scenario_report(&ReportData {
            outcome: &outcome,
            timeline: &[],
            generated_on: date(),
        });
        assert!(bar_widths(&document).iter().all(|(w, _)| *w == 0.0));
        assert!(!document.pages[1].contains_text("Average Growth"));
    }

    #[test]
    fn test_empty_contributions_do_not_panic() {
        let mut outcome = outcome(sample_rates());
        outcome.contributions.clear();
        let document = build_scenario_report(&ReportData {
            outcome: &outcome,
            timeline: &[],
            generated_on: date(),
        });
        assert_eq!(bar_widths(&document).len(), 6);
    }

    #[test]
    fn test_long_history_section_paginates() {
        let outcome = outcome(sample_rates());
        let timeline = timeline();
        let document = build_scenario_report(&ReportData {
            outcome: &outcome,
            timeline: &timeline,
            generated_on: date(),
        });
        // every text element stays above the footer line
        for page in &document.pages {
            for element in &page.elements {
                if let Element::Text { y, text, .. } = element {
                    if !text.starts_with("Page ") && text != FOOTER_TEXT {
                        assert!(*y < document.height - 10.0, "{text} at {y}");
                    }
                }
            }
        }
        assert_eq!(
            document.pages.iter().filter(|p| p.contains_text("Economic Indicators Summary")).count(),
            1
        );
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(
            report_file_name("United States", date()),
            "Vikalp_Scenario_United_States_2026-10-16.pdf"
        );
        assert_eq!(
            report_file_name("Bosnia  and\tHerzegovina", date()),
            "Vikalp_Scenario_Bosnia_and_Herzegovina_2026-10-16.pdf"
        );
    }

    #[test]
    fn test_interpretation_embeds_prediction() {
        assert!(interpretation_text(2.0).contains("grow by 2%."));
    }
}

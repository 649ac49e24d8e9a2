//! Timeline transformer: converts the service's historical series into chart
//! points and appends the two synthetic projection points after a prediction.

use common::{ChartDataPoint, HistoricalDataPoint, round2};
use tracing::{debug, instrument};

/// Display years of the two synthetic projection points.
pub const PROJECTION_YEARS: [&str; 2] = ["2022", "2023"];

/// Scale applied to the predicted value for the second projection point.
/// A fixed display extrapolation, not a forecast.
pub const SECOND_YEAR_FACTOR: f64 = 1.05;

/// Map each raw point to `{year, growth rounded to 2 decimals, historical}`.
#[instrument(skip(points), fields(len = points.len()))]
pub fn transform_historical_data(points: &[HistoricalDataPoint]) -> Vec<ChartDataPoint> {
    points
        .iter()
        .map(|point| ChartDataPoint::historical(point.year, round2(point.gdp_growth)))
        .collect()
}

/// Append the two projection points after `existing`, without re-sorting.
pub fn add_prediction_to_timeline(
    predicted_growth: f64,
    existing: &[ChartDataPoint],
) -> Vec<ChartDataPoint> {
    let mut timeline = Vec::with_capacity(existing.len() + 2);
    timeline.extend_from_slice(existing);
    timeline.push(ChartDataPoint::prediction(
        PROJECTION_YEARS[0],
        round2(predicted_growth),
    ));
    timeline.push(ChartDataPoint::prediction(
        PROJECTION_YEARS[1],
        round2(predicted_growth * SECOND_YEAR_FACTOR),
    ));
    debug!(predicted_growth, len = timeline.len(), "Projection appended to timeline");
    timeline
}

/// Only the historical-origin points, in their original order.
pub fn historical_only(timeline: &[ChartDataPoint]) -> Vec<ChartDataPoint> {
    timeline.iter().filter(|p| p.is_historical()).cloned().collect()
}

/// True when the timeline holds no historical point at all.
pub fn needs_history(timeline: &[ChartDataPoint]) -> bool {
    !timeline.iter().any(ChartDataPoint::is_historical)
}

/// The last `count` historical points.
pub fn recent_historical(timeline: &[ChartDataPoint], count: usize) -> Vec<ChartDataPoint> {
    let historical = historical_only(timeline);
    let start = historical.len().saturating_sub(count);
    historical[start..].to_vec()
}

/// Arithmetic mean of the growth values, `None` for an empty slice.
pub fn average_growth(points: &[ChartDataPoint]) -> Option<f64> {
    if points.is_empty() {
        return None;
    }
    Some(points.iter().map(|p| p.growth).sum::<f64>() / points.len() as f64)
}

/// Mean growth of the four points preceding the last two, the window the
/// dashboard compares a fresh prediction against.
pub fn recent_trend(timeline: &[ChartDataPoint]) -> Option<f64> {
    let end = timeline.len().saturating_sub(2);
    let start = timeline.len().saturating_sub(6).min(end);
    average_growth(&timeline[start..end])
}

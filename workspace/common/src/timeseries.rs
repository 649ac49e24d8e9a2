use serde::{Deserialize, Serialize};

/// One year of the historical series as returned by `/api/history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalDataPoint {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "GDP_Growth")]
    pub gdp_growth: f64,
    #[serde(rename = "Exports_Growth")]
    pub exports_growth: f64,
    #[serde(rename = "Imports_Growth")]
    pub imports_growth: f64,
}

/// Where a chart point comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointKind {
    Historical,
    Prediction,
}

/// Uniform chart point used by the timeline and the report.
///
/// `year` is a display string; [`ChartDataPoint::calendar_year`] gives the
/// value to sort and compare on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    pub year: String,
    pub growth: f64,
    #[serde(rename = "type")]
    pub kind: PointKind,
}

impl ChartDataPoint {
    pub fn new(year: impl Into<String>, growth: f64, kind: PointKind) -> Self {
        Self {
            year: year.into(),
            growth,
            kind,
        }
    }

    pub fn historical(year: i32, growth: f64) -> Self {
        Self::new(year.to_string(), growth, PointKind::Historical)
    }

    pub fn prediction(year: impl Into<String>, growth: f64) -> Self {
        Self::new(year, growth, PointKind::Prediction)
    }

    pub fn is_historical(&self) -> bool {
        self.kind == PointKind::Historical
    }

    pub fn calendar_year(&self) -> Option<i32> {
        self.year.trim().parse().ok()
    }
}

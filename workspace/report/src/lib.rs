//! Report renderer: lays out the scenario report as pages of positioned
//! text and filled rectangles, then serializes it to PDF.

pub mod document;
pub mod error;
pub mod metrics;
pub mod pdf;
pub mod scenario_report;

use std::path::{Path, PathBuf};
use tracing::instrument;

pub use document::{Document, Page};
pub use error::{ReportError, Result};
pub use scenario_report::{ReportData, build_scenario_report, report_file_name};

/// Lay out, render and save the scenario report into `dir`, returning the
/// path of the written file.
#[instrument(skip(data), fields(country = data.outcome.country()))]
pub fn export_scenario_report(data: &ReportData<'_>, dir: &Path) -> Result<PathBuf> {
    let document = build_scenario_report(data);
    let file_name = report_file_name(data.outcome.country(), data.generated_on);
    pdf::save_pdf(&document, scenario_report::REPORT_TITLE, dir, &file_name)
}

use std::path::PathBuf;
use thiserror::Error;

/// Error types for report rendering
#[derive(Error, Debug)]
pub enum ReportError {
    /// Error from the PDF backend
    #[error("PDF error: {0}")]
    Pdf(#[from] printpdf::Error),

    /// The rendered document could not be written
    #[error("Failed to write report to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Nothing to render
    #[error("Report has no pages")]
    EmptyDocument,
}

/// Type alias for Result with ReportError
pub type Result<T> = std::result::Result<T, ReportError>;

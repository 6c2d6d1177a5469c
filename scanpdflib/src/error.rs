//! Error types for scanpdflib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a summary or producing a report
#[derive(Error, Debug)]
pub enum ScanPdfError {
    /// Failed to read the summary file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The summary document is not valid JSON or does not match the expected shape
    #[error("invalid scan summary: {0}")]
    InvalidSummary(#[from] serde_json::Error),

    /// The rendering backend could not produce a document
    #[error("could not render report: {0}")]
    Render(#[from] crate::output::backend::BackendError),

    /// Failed to write the finished document
    #[error("failed to write report to '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

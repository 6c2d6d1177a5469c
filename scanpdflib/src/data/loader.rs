//! Loading scan summaries from JSON.

use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use super::summary::SummaryDetails;
use crate::error::ScanPdfError;
use crate::Result;

/// Parse a summary from a JSON string.
pub fn parse_summary(json: &str) -> Result<SummaryDetails> {
    let summary: SummaryDetails = serde_json::from_str(json)?;
    debug!(
        controls = summary.controls.len(),
        frameworks = summary.frameworks.len(),
        "parsed scan summary"
    );
    Ok(summary)
}

/// Load a summary from a JSON file.
///
/// A path of `-` reads from standard input.
pub fn load_summary(path: impl AsRef<Path>) -> Result<SummaryDetails> {
    let path = path.as_ref();
    let json = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path).map_err(|source| ScanPdfError::FileRead {
            path: path.to_path_buf(),
            source,
        })?
    };
    parse_summary(&json)
}

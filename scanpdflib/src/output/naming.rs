//! Output file naming.

use std::path::PathBuf;

/// Name used when no output name is given.
pub const DEFAULT_OUTPUT_NAME: &str = "report";

/// Extension every report file carries.
pub const OUTPUT_EXTENSION: &str = "pdf";

/// Resolve the final artifact path for a requested output name.
///
/// Empty input falls back to `report.pdf`; a name not ending in `.pdf`
/// gets it appended (`out.txt` becomes `out.txt.pdf`). A bare `.pdf` counts
/// as already carrying the extension.
pub fn normalize_output_path(requested: &str) -> PathBuf {
    let trimmed = requested.trim();
    let name = if trimmed.is_empty() {
        DEFAULT_OUTPUT_NAME
    } else {
        trimmed
    };

    let has_extension = name
        .strip_suffix(OUTPUT_EXTENSION)
        .is_some_and(|stem| stem.ends_with('.'));

    if has_extension {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{}.{}", name, OUTPUT_EXTENSION))
    }
}

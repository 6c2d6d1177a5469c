//! Output: turn an ordered summary into document sections.
//!
//! This module handles the third and final stage of the pipeline. It
//! provides:
//!
//! - **Formatting**: pure value-to-string helpers for cells and lines
//! - **Rows**: resolve ordered identities into table rows
//! - **Document**: the backend-neutral section model
//! - **Composition**: `DocumentComposer` and `render_report`
//! - **Backend**: the `RenderBackend` seam
//! - **Naming**: output file name normalization
//!
//! ## Example
//!
//! ```rust,ignore
//! use scanpdflib::output::{render_report, normalize_output_path};
//!
//! let bytes = render_report(&summary, &options, Some(&logo), &backend)?;
//! std::fs::write(normalize_output_path("cluster"), bytes)?;
//! ```

pub mod backend;
pub mod compose;
pub mod document;
pub mod format;
pub mod naming;
pub mod rows;

pub use backend::{BackendError, RenderBackend};
pub use compose::{render_report, DocumentComposer, ALTERNATE_ROW_COLOR};
pub use document::{
    Align, BrandingAsset, Color, Document, FontFamily, FontStyle, FooterCell, FooterSection,
    HeaderSection, ImageBlock, ImageFormat, Margins, Orientation, PageSetup, PageSize, Section,
    TableSection, TableStyle, TextLine, TextStyle,
};
pub use format::{
    control_table_headers, format_count, format_percentage, format_risk_score_line,
    format_timestamp, frameworks_scores_to_string, generate_row, CONTROL_TABLE_HEADERS,
};
pub use naming::normalize_output_path;
pub use rows::{build_rows, PLACEHOLDER_CELL};

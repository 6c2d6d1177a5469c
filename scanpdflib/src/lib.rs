//! # scanpdflib
//!
//! Turns a security-scan summary into an ordered list of styled document
//! sections that a layout backend (PDF or otherwise) can render.
//!
//! ## Overview
//!
//! A scan summary holds evaluated controls, the frameworks they belong to,
//! resource counters and an overall score. This library does the
//! model-to-document step and nothing else:
//!
//! - **Data**: the read-only summary model and JSON loading
//! - **Query**: deterministic, pluggable control ordering
//! - **Output**: cell formatting, row building, section composition and the
//!   backend seam that turns sections into bytes
//!
//! Page layout, font metrics and byte encoding live behind [`RenderBackend`].
//!
//! ## Example
//!
//! ```rust
//! use scanpdflib::{parse_summary, DocumentComposer, ReportOptions, SortPolicy};
//!
//! let summary = parse_summary(r#"{
//!     "score": 42.5,
//!     "frameworks": [{ "name": "nsa", "score": 42.5 }],
//!     "controls": {
//!         "C-0002": { "controlID": "C-0002", "name": "Privileged container", "status": "failed",
//!                     "resourceCounters": { "failedResources": 2, "passedResources": 5 }, "score": 28.5 },
//!         "C-0001": { "controlID": "C-0001", "name": "Exec into container", "status": "passed",
//!                     "score": 0.0 }
//!     }
//! }"#).unwrap();
//!
//! let options = ReportOptions::new().sort_policy(SortPolicy::Lexical);
//! let document = DocumentComposer::new(&options).compose(&summary, None);
//! let table = document.table().unwrap();
//! assert_eq!(table.rows[0][1], "Exec into container");
//! assert_eq!(table.rows[1][3], "2");
//! ```

pub mod data;
pub mod error;
pub mod options;
pub mod output;
pub mod query;

pub use data::{
    load_summary, parse_summary, Control, ControlSet, ControlStatus, FrameworkSummary,
    LookupCriteria, ResourceCounters, SummaryDetails,
};
pub use error::ScanPdfError;
pub use options::ReportOptions;
pub use output::{
    build_rows, control_table_headers, format_count, format_percentage, format_risk_score_line,
    format_timestamp, frameworks_scores_to_string, generate_row, normalize_output_path,
    render_report, BackendError, BrandingAsset, Document, DocumentComposer, ImageFormat,
    RenderBackend, Section,
};
pub use query::{ControlSorter, LexicalOrder, SeverityOrder, SortPolicy};

/// Result type for scanpdflib operations
pub type Result<T> = std::result::Result<T, ScanPdfError>;

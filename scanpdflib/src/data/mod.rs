//! Scan summary data: the read-only input of the report pipeline.
//!
//! This module handles the first stage of the pipeline - getting a scan
//! summary into memory. It provides:
//!
//! - **Model**: `SummaryDetails`, `ControlSet`, `Control` and friends
//! - **Loading**: `load_summary` / `parse_summary` for JSON input
//!
//! ## Example
//!
//! ```rust,ignore
//! use scanpdflib::data::load_summary;
//!
//! let summary = load_summary("results.json")?;
//! println!("{} controls evaluated", summary.controls.len());
//! ```

pub mod loader;
pub mod summary;

pub use loader::{load_summary, parse_summary};
pub use summary::{
    Control, ControlSet, ControlStatus, FrameworkSummary, LookupCriteria, ResourceCounters,
    SummaryDetails,
};

//! Query processing: put controls in a deterministic order.
//!
//! This module handles the second stage of the pipeline. It provides:
//!
//! - **Sorters**: the `ControlSorter` seam and its `LexicalOrder` /
//!   `SeverityOrder` implementations
//! - **Options**: `SortPolicy`, the configurable choice between them
//!
//! The order is opaque to the rest of the pipeline; swapping the policy never
//! touches row building or composition.
//!
//! ## Example
//!
//! ```rust,ignore
//! use scanpdflib::query::SortPolicy;
//! use scanpdflib::LookupCriteria;
//!
//! let ids = SortPolicy::Severity.sorter().sort(&summary.controls, LookupCriteria::Name);
//! ```

pub mod options;
pub mod sorter;

pub use options::SortPolicy;
pub use sorter::{ControlSorter, LexicalOrder, SeverityOrder};

//! Input options for report generation.
//!
//! This module contains the configuration that controls how a summary is
//! turned into a document.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::data::LookupCriteria;
use crate::query::SortPolicy;

/// Default document title, written into the document metadata.
pub const DEFAULT_TITLE: &str = "Security Assessment";

/// Options for composing a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportOptions {
    /// How the control table is ordered
    pub sort_policy: SortPolicy,
    /// Which control field identifies a table row
    pub criteria: LookupCriteria,
    /// Fixed report timestamp; `None` uses local time at compose time
    pub generated_at: Option<NaiveDateTime>,
    /// Document title
    pub title: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            sort_policy: SortPolicy::default(),
            criteria: LookupCriteria::default(),
            generated_at: None,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl ReportOptions {
    /// Create default options (lexical order, lookup by name, current time)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ordering policy
    pub fn sort_policy(mut self, policy: SortPolicy) -> Self {
        self.sort_policy = policy;
        self
    }

    /// Set the lookup criteria
    pub fn criteria(mut self, criteria: LookupCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    /// Pin the report timestamp
    pub fn generated_at(mut self, at: NaiveDateTime) -> Self {
        self.generated_at = Some(at);
        self
    }

    /// Set the document title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// The report timestamp: the pinned value, or local now.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.generated_at
            .unwrap_or_else(|| chrono::Local::now().naive_local())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_defaults() {
        let options = ReportOptions::new();
        assert_eq!(options.sort_policy, SortPolicy::Lexical);
        assert_eq!(options.criteria, LookupCriteria::Name);
        assert!(options.generated_at.is_none());
        assert_eq!(options.title, "Security Assessment");
    }

    #[test]
    fn test_builder() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(9, 7, 2)
            .unwrap();
        let options = ReportOptions::new()
            .sort_policy(SortPolicy::Severity)
            .criteria(LookupCriteria::Id)
            .generated_at(at)
            .title("Cluster posture");

        assert_eq!(options.sort_policy, SortPolicy::Severity);
        assert_eq!(options.criteria, LookupCriteria::Id);
        assert_eq!(options.timestamp(), at);
        assert_eq!(options.title, "Cluster posture");
    }
}

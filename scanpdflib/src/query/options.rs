//! Ordering policies selectable from configuration.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::sorter::{ControlSorter, LexicalOrder, SeverityOrder};

/// Which sorter orders the control table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortPolicy {
    /// Alphabetical by control identity
    #[default]
    Lexical,
    /// Upstream severity first, alphabetical on ties
    Severity,
}

impl SortPolicy {
    /// The sorter implementing this policy.
    pub fn sorter(&self) -> Box<dyn ControlSorter> {
        match self {
            SortPolicy::Lexical => Box::new(LexicalOrder),
            SortPolicy::Severity => Box::new(SeverityOrder),
        }
    }
}

impl FromStr for SortPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lexical" | "name" | "alpha" => Ok(SortPolicy::Lexical),
            "severity" => Ok(SortPolicy::Severity),
            _ => Err(format!("Unknown sort policy: {}", s)),
        }
    }
}

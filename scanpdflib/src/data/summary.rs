//! Core data structures for scan summaries.
//!
//! These types mirror what an upstream scan engine produces: a set of
//! evaluated controls, the frameworks they were evaluated under, and resource
//! counters with an aggregate score. They are read-only to this crate; the
//! report pipeline never mutates a [`SummaryDetails`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Outcome of evaluating a single control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlStatus {
    Passed,
    Failed,
    Excluded,
    Skipped,
    /// Anything the scan engine reports that we don't recognise
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for ControlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ControlStatus::Passed => "Passed",
            ControlStatus::Failed => "Failed",
            ControlStatus::Excluded => "Excluded",
            ControlStatus::Skipped => "Skipped",
            ControlStatus::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// Resource counts for a control or for the whole scan.
///
/// Missing counters deserialize as zero, so every count is always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCounters {
    /// Resources that failed the control(s)
    #[serde(default, rename = "failedResources")]
    pub failed: u64,
    /// Resources excluded by an exception policy
    #[serde(default, rename = "excludedResources")]
    pub excluded: u64,
    /// Resources that passed
    #[serde(default, rename = "passedResources")]
    pub passed: u64,
}

impl ResourceCounters {
    pub fn new(failed: u64, excluded: u64, passed: u64) -> Self {
        Self {
            failed,
            excluded,
            passed,
        }
    }

    pub fn failed(&self) -> u64 {
        self.failed
    }

    pub fn excluded(&self) -> u64 {
        self.excluded
    }

    pub fn passed(&self) -> u64 {
        self.passed
    }

    /// Every resource the control was evaluated against.
    pub fn all(&self) -> u64 {
        self.failed
            .saturating_add(self.excluded)
            .saturating_add(self.passed)
    }
}

/// A single evaluated security/compliance control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Control {
    /// Stable identity, e.g. `C-0001`
    #[serde(default, rename = "controlID")]
    pub id: String,
    /// Human readable control name
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: ControlStatus,
    #[serde(default, rename = "resourceCounters")]
    pub resource_counters: ResourceCounters,
    /// Risk score, 0 (nothing failed) to 100 (everything failed)
    #[serde(default)]
    pub score: f32,
    /// Base severity supplied by the scan engine, if any
    #[serde(default, rename = "scoreFactor", skip_serializing_if = "Option::is_none")]
    pub severity: Option<f32>,
}

impl Control {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: ControlStatus::default(),
            resource_counters: ResourceCounters::default(),
            score: 0.0,
            severity: None,
        }
    }

    pub fn with_status(mut self, status: ControlStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_counters(mut self, counters: ResourceCounters) -> Self {
        self.resource_counters = counters;
        self
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = score;
        self
    }

    pub fn with_severity(mut self, severity: f32) -> Self {
        self.severity = Some(severity);
        self
    }

    /// The identity string of this control under the given criteria.
    pub fn key(&self, criteria: LookupCriteria) -> &str {
        match criteria {
            LookupCriteria::Id => &self.id,
            LookupCriteria::Name => &self.name,
        }
    }
}

/// Which field identifies a control when looking it up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupCriteria {
    /// Look controls up by their `controlID`
    Id,
    /// Look controls up by display name
    #[default]
    Name,
}

impl std::str::FromStr for LookupCriteria {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "id" | "control-id" => Ok(LookupCriteria::Id),
            "name" => Ok(LookupCriteria::Name),
            _ => Err(format!("Unknown lookup criteria: {}", s)),
        }
    }
}

/// All controls of a scan, keyed by control id.
///
/// The set imposes no order of its own; see [`crate::query`] for ordering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, Control>", into = "HashMap<String, Control>")]
pub struct ControlSet {
    controls: HashMap<String, Control>,
}

impl From<HashMap<String, Control>> for ControlSet {
    fn from(map: HashMap<String, Control>) -> Self {
        // Controls keyed by id may omit the id in their body. When the body
        // does carry one, it wins over the object key.
        map.into_iter()
            .map(|(key, mut control)| {
                if control.id.is_empty() {
                    control.id = key;
                }
                control
            })
            .collect()
    }
}

impl From<ControlSet> for HashMap<String, Control> {
    fn from(set: ControlSet) -> Self {
        set.controls
    }
}

impl FromIterator<Control> for ControlSet {
    fn from_iter<I: IntoIterator<Item = Control>>(iter: I) -> Self {
        Self {
            controls: iter.into_iter().map(|c| (c.id.clone(), c)).collect(),
        }
    }
}

impl ControlSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a control, replacing any existing control with the same id.
    pub fn insert(&mut self, control: Control) {
        self.controls.insert(control.id.clone(), control);
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Look a control up by id or by name.
    ///
    /// Name lookups that match several controls return the one with the
    /// lexically smallest id, so the result does not depend on map order.
    pub fn get(&self, criteria: LookupCriteria, key: &str) -> Option<&Control> {
        match criteria {
            LookupCriteria::Id => self.controls.get(key),
            LookupCriteria::Name => self
                .controls
                .values()
                .filter(|c| c.name == key)
                .min_by(|a, b| a.id.cmp(&b.id)),
        }
    }

    /// Distinct identity strings under the given criteria.
    pub fn keys(&self, criteria: LookupCriteria) -> BTreeSet<&str> {
        self.controls.values().map(|c| c.key(criteria)).collect()
    }

    /// Iterate controls in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Control> {
        self.controls.values()
    }
}

/// A framework (or policy) the controls were evaluated under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameworkSummary {
    pub name: String,
    #[serde(default)]
    pub score: f32,
}

impl FrameworkSummary {
    pub fn new(name: impl Into<String>, score: f32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Aggregate scan result: every control, every framework, and the totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDetails {
    #[serde(default)]
    pub controls: ControlSet,
    #[serde(default)]
    pub frameworks: Vec<FrameworkSummary>,
    #[serde(default)]
    pub resource_counters: ResourceCounters,
    /// Overall risk score, 0 to 100
    #[serde(default)]
    pub score: f32,
}

impl SummaryDetails {
    /// Frameworks in the order the scan engine listed them.
    pub fn list_frameworks(&self) -> &[FrameworkSummary] {
        &self.frameworks
    }

    pub fn number_of_resources(&self) -> &ResourceCounters {
        &self.resource_counters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_all() {
        let counters = ResourceCounters::new(3, 2, 10);
        assert_eq!(counters.all(), 15);
        assert_eq!(ResourceCounters::default().all(), 0);
    }

    #[test]
    fn test_counters_all_saturates() {
        let counters = ResourceCounters::new(u64::MAX, 1, 1);
        assert_eq!(counters.all(), u64::MAX);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ControlStatus::Failed.to_string(), "Failed");
        assert_eq!(ControlStatus::Skipped.to_string(), "Skipped");
    }

    #[test]
    fn test_unknown_status_deserializes() {
        let status: ControlStatus = serde_json::from_str("\"irrelevant\"").unwrap();
        assert_eq!(status, ControlStatus::Unknown);
    }

    #[test]
    fn test_lookup_by_id_and_name() {
        let set: ControlSet = vec![
            Control::new("C-0001", "Exec into container"),
            Control::new("C-0002", "Privileged container"),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            set.get(LookupCriteria::Id, "C-0002").unwrap().name,
            "Privileged container"
        );
        assert_eq!(
            set.get(LookupCriteria::Name, "Exec into container")
                .unwrap()
                .id,
            "C-0001"
        );
        assert!(set.get(LookupCriteria::Name, "C-0001").is_none());
    }

    #[test]
    fn test_name_lookup_with_duplicates_is_stable() {
        let set: ControlSet = vec![
            Control::new("C-0009", "Same name"),
            Control::new("C-0003", "Same name"),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.get(LookupCriteria::Name, "Same name").unwrap().id, "C-0003");
        assert_eq!(set.keys(LookupCriteria::Name).len(), 1);
        assert_eq!(set.keys(LookupCriteria::Id).len(), 2);
    }

    #[test]
    fn test_missing_id_filled_from_key() {
        let set: ControlSet =
            serde_json::from_str(r#"{ "C-0042": { "name": "Host PID" } }"#).unwrap();
        assert_eq!(set.get(LookupCriteria::Id, "C-0042").unwrap().id, "C-0042");
    }

    #[test]
    fn test_body_id_overrides_object_key() {
        let set: ControlSet = serde_json::from_str(
            r#"{ "k1": { "controlID": "C-0001", "name": "Alpha", "status": "failed" } }"#,
        )
        .unwrap();

        let keys: Vec<&str> = set.keys(LookupCriteria::Id).into_iter().collect();
        assert_eq!(keys, vec!["C-0001"]);
        let control = set.get(LookupCriteria::Id, "C-0001").unwrap();
        assert_eq!(control.name, "Alpha");
        assert_eq!(control.status, ControlStatus::Failed);
        assert!(set.get(LookupCriteria::Id, "k1").is_none());
    }
}

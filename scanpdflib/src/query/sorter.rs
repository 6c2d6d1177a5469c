//! Control ordering.
//!
//! A report is regenerated on every scan and users diff the results, so the
//! row order must depend only on the contents of the control set. Sorters
//! return distinct identity strings; the row builder resolves them back to
//! controls with the same [`LookupCriteria`].

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::data::{ControlSet, LookupCriteria};

/// Produces a deterministic total order over the controls of a set.
pub trait ControlSorter {
    /// Return every distinct identity of `controls` under `criteria`, ordered.
    fn sort(&self, controls: &ControlSet, criteria: LookupCriteria) -> Vec<String>;
}

/// Alphabetical by identity string.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalOrder;

impl ControlSorter for LexicalOrder {
    fn sort(&self, controls: &ControlSet, criteria: LookupCriteria) -> Vec<String> {
        // keys() is a BTreeSet, already in byte-lexical order
        controls
            .keys(criteria)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

/// Highest upstream severity first, identity-lexical on ties.
///
/// Controls without a severity sort after every control that has one. When
/// several controls share an identity (name lookups), the highest severity
/// among them is used.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeverityOrder;

impl ControlSorter for SeverityOrder {
    fn sort(&self, controls: &ControlSet, criteria: LookupCriteria) -> Vec<String> {
        let mut severities: HashMap<&str, Option<f32>> = HashMap::new();
        for control in controls.iter() {
            let entry = severities.entry(control.key(criteria)).or_insert(None);
            *entry = max_severity(*entry, control.severity);
        }

        let mut keys: Vec<(&str, Option<f32>)> = severities.into_iter().collect();
        keys.sort_by(|(a_key, a_sev), (b_key, b_sev)| {
            compare_severity(*a_sev, *b_sev).then_with(|| a_key.cmp(b_key))
        });
        keys.into_iter().map(|(key, _)| key.to_string()).collect()
    }
}

fn max_severity(a: Option<f32>, b: Option<f32>) -> Option<f32> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.max(y)),
        (x, None) => x,
        (None, y) => y,
    }
}

/// Descending severity, `None` last. NaN compares equal so ties fall through.
fn compare_severity(a: Option<f32>, b: Option<f32>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

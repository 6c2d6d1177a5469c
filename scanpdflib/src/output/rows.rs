//! Resolve ordered control identities into formatted table rows.

use tracing::warn;

use super::format::{generate_row, CONTROL_TABLE_WIDTH};
use crate::data::{ControlSet, LookupCriteria};

/// Cell used when a control can't be resolved.
pub const PLACEHOLDER_CELL: &str = "-";

/// Build one row per identity, in the given order.
///
/// An identity missing from the set yields a placeholder row carrying the
/// identity in its first cell. The miss is logged and the remaining rows are
/// still built.
pub fn build_rows(
    ids: &[String],
    controls: &ControlSet,
    criteria: LookupCriteria,
) -> Vec<Vec<String>> {
    ids.iter()
        .map(|id| match controls.get(criteria, id) {
            Some(control) => generate_row(control),
            None => {
                warn!(control = %id, ?criteria, "control not found, rendering placeholder row");
                placeholder_row(id)
            }
        })
        .collect()
}

fn placeholder_row(id: &str) -> Vec<String> {
    let mut row = vec![PLACEHOLDER_CELL.to_string(); CONTROL_TABLE_WIDTH];
    row[0] = id.to_string();
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Control, ResourceCounters};
    use crate::output::format::control_table_headers;

    fn sample_set() -> ControlSet {
        vec![
            Control::new("C-0001", "Alpha").with_counters(ResourceCounters::new(1, 0, 3)),
            Control::new("C-0002", "Beta"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_rows_follow_id_order() {
        let ids = vec!["Beta".to_string(), "Alpha".to_string()];
        let rows = build_rows(&ids, &sample_set(), LookupCriteria::Name);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "C-0002");
        assert_eq!(rows[1][0], "C-0001");
        assert_eq!(rows[1][5], "4");
    }

    #[test]
    fn test_missing_control_yields_placeholder() {
        let ids = vec![
            "C-0001".to_string(),
            "C-0404".to_string(),
            "C-0002".to_string(),
        ];
        let rows = build_rows(&ids, &sample_set(), LookupCriteria::Id);

        assert_eq!(rows.len(), ids.len());
        assert_eq!(rows[1][0], "C-0404");
        assert!(rows[1][1..].iter().all(|cell| cell == PLACEHOLDER_CELL));
        assert_eq!(rows[2][1], "Beta");
    }

    #[test]
    fn test_every_row_matches_header_width() {
        let ids = vec!["Alpha".to_string(), "Missing".to_string()];
        let rows = build_rows(&ids, &sample_set(), LookupCriteria::Name);
        let width = control_table_headers().len();
        assert!(rows.iter().all(|row| row.len() == width));
    }

    #[test]
    fn test_no_ids_no_rows() {
        assert!(build_rows(&[], &sample_set(), LookupCriteria::Name).is_empty());
    }
}

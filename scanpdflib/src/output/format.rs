//! Value-to-string formatting for report cells and lines.
//!
//! Every function here is pure. Counts are always rendered, even when zero,
//! and every control row has exactly one cell per header.

use chrono::NaiveDateTime;

use crate::data::{Control, FrameworkSummary};

/// Column headers of the control table.
pub const CONTROL_TABLE_HEADERS: [&str; 7] = [
    "Control ID",
    "Control Name",
    "Status",
    "Failed Resources",
    "Excluded Resources",
    "All Resources",
    "% Risk-score",
];

/// Number of cells in every control table row.
pub const CONTROL_TABLE_WIDTH: usize = CONTROL_TABLE_HEADERS.len();

/// Column headers of the control table, as owned strings.
pub fn control_table_headers() -> Vec<String> {
    CONTROL_TABLE_HEADERS.iter().map(|h| h.to_string()).collect()
}

/// Format one control as a table row.
pub fn generate_row(control: &Control) -> Vec<String> {
    let counters = &control.resource_counters;
    vec![
        control.id.clone(),
        control.name.clone(),
        control.status.to_string(),
        format_count(counters.failed()),
        format_count(counters.excluded()),
        format_count(counters.all()),
        format_percentage(control.score),
    ]
}

/// Format a resource count.
pub fn format_count(count: u64) -> String {
    count.to_string()
}

/// Format a score with two decimals and a trailing `%`.
pub fn format_percentage(score: f32) -> String {
    format!("{:.2}%", score)
}

/// Format a timestamp as `YYYY-MM-DDTHH:MM:SS`.
pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// One line summarising every framework score, in input order.
///
/// ```rust
/// use scanpdflib::{frameworks_scores_to_string, FrameworkSummary};
///
/// let line = frameworks_scores_to_string(&[
///     FrameworkSummary::new("NSA", 12.5),
///     FrameworkSummary::new("MITRE", 3.0),
/// ]);
/// assert_eq!(line, "FRAMEWORKS: NSA (risk: 12.50), MITRE (risk: 3.00)");
/// ```
pub fn frameworks_scores_to_string(frameworks: &[FrameworkSummary]) -> String {
    let scores: Vec<String> = frameworks
        .iter()
        .map(|f| format!("{} (risk: {:.2})", f.name, f.score))
        .collect();

    match scores.len() {
        0 => String::new(),
        1 => format!("FRAMEWORK {}", scores[0]),
        _ => format!("FRAMEWORKS: {}", scores.join(", ")),
    }
}

/// The overall risk-score line printed once a report is written.
pub fn format_risk_score_line(score: f32) -> String {
    format!(
        "Overall risk-score (0- Excellent, 100- All failed): {}",
        score as i64
    )
}

//! Terminal preview of a composed report using outstanding

use console::Style;
use outstanding::{OutputMode, Theme};
use scanpdflib::{Document, Section};
use serde::Serialize;

/// Include template at compile time
pub const PREVIEW_TEMPLATE: &str = include_str!("../templates/preview.jinja");

/// Widest a table column may get before its cells are truncated
const MAX_COLUMN_WIDTH: usize = 40;

/// Row data for template rendering (pre-formatted)
#[derive(Debug, Serialize)]
struct PreviewRow {
    /// Cells joined with padding
    line: String,
    /// Whether the document asks for this row to be shaded
    shaded: bool,
}

/// Data context for the preview template
#[derive(Debug, Serialize)]
struct PreviewContext {
    title: String,
    report_date: String,
    frameworks: String,
    header_line: String,
    separator: String,
    rows: Vec<PreviewRow>,
    footer_line: String,
}

/// Truncate a cell to fit within max_len, adding ".." suffix if needed
fn truncate_cell(cell: &str, max_len: usize) -> String {
    if cell.chars().count() > max_len {
        let kept: String = cell.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", kept)
    } else {
        cell.to_string()
    }
}

fn pad_cells(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", truncate_cell(cell, *width), width = width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Column widths: the longest header or cell, capped.
fn column_widths(headers: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
                .min(MAX_COLUMN_WIDTH)
        })
        .collect()
}

fn build_context(document: &Document) -> PreviewContext {
    let mut context = PreviewContext {
        title: document.title.clone(),
        report_date: String::new(),
        frameworks: String::new(),
        header_line: String::new(),
        separator: String::new(),
        rows: Vec::new(),
        footer_line: String::new(),
    };

    for section in &document.sections {
        match section {
            Section::Header(header) => context.report_date = header.report_date.text.clone(),
            Section::FrameworkScores(line) => context.frameworks = line.text.clone(),
            Section::Table(table) => {
                let widths = column_widths(&table.headers, &table.rows);
                context.header_line = pad_cells(&table.headers, &widths);
                context.separator = "-".repeat(widths.iter().sum::<usize>() + 2 * widths.len());
                context.rows = table
                    .rows
                    .iter()
                    .enumerate()
                    .map(|(i, row)| PreviewRow {
                        line: pad_cells(row, &widths),
                        shaded: table.style.alternated_background.is_some() && i % 2 == 1,
                    })
                    .collect();
            }
            Section::Footer(footer) => {
                context.footer_line = footer
                    .cells
                    .iter()
                    .map(|cell| match (cell.label.as_str(), cell.value.as_str()) {
                        (label, "") => label.to_string(),
                        (label, value) => format!("{}: {}", label, value),
                    })
                    .collect::<Vec<_>>()
                    .join("  ");
            }
        }
    }
    context
}

/// Create the theme with styles
pub fn create_theme() -> Theme {
    Theme::new()
        .add("heading", Style::new().bold())
        .add("shaded", Style::new().dim())
}

/// Data handed to the preview template, or the document itself in structured modes
pub fn preview_value(
    document: &Document,
    output_mode: OutputMode,
) -> serde_json::Result<serde_json::Value> {
    if output_mode.is_structured() {
        return serde_json::to_value(document);
    }
    serde_json::to_value(build_context(document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use scanpdflib::{
        Control, ControlStatus, DocumentComposer, FrameworkSummary, ReportOptions,
        ResourceCounters, SummaryDetails,
    };

    fn sample_document() -> Document {
        let summary = SummaryDetails {
            controls: vec![
                Control::new("C-0057", "Privileged container")
                    .with_status(ControlStatus::Failed)
                    .with_counters(ResourceCounters::new(2, 0, 8))
                    .with_score(20.0),
                Control::new("C-0002", "Exec into container").with_status(ControlStatus::Passed),
            ]
            .into_iter()
            .collect(),
            frameworks: vec![FrameworkSummary::new("NSA", 20.0)],
            resource_counters: ResourceCounters::new(2, 0, 8),
            score: 20.0,
        };
        let options = ReportOptions::new().generated_at(
            NaiveDate::from_ymd_opt(2024, 3, 5)
                .unwrap()
                .and_hms_opt(9, 7, 2)
                .unwrap(),
        );
        DocumentComposer::new(&options).compose(&summary, None)
    }

    #[test]
    fn test_truncate_cell() {
        assert_eq!(truncate_cell("short", 10), "short");
        assert_eq!(truncate_cell("a very long control name", 10), "a very l..");
    }

    #[test]
    fn test_build_context() {
        let context = build_context(&sample_document());

        assert_eq!(context.report_date, "Report date: 2024-03-05T09:07:02");
        assert_eq!(context.frameworks, "FRAMEWORK NSA (risk: 20.00)");
        assert!(context.header_line.starts_with("Control ID"));
        assert_eq!(context.rows.len(), 2);
        assert!(context.rows[0].line.starts_with("C-0002"));
        assert!(!context.rows[0].shaded);
        assert!(context.rows[1].shaded);
        assert_eq!(
            context.footer_line,
            "Resource summary  Failed: 2  Excluded: 0  All: 10  Risk-score: 20.00%"
        );
    }

    #[test]
    fn test_preview_value_by_mode() {
        let document = sample_document();

        let json = preview_value(&document, OutputMode::Json).unwrap();
        assert_eq!(json["sections"].as_array().unwrap().len(), 4);
        assert_eq!(json["sections"][2]["kind"], "table");

        let text = preview_value(&document, OutputMode::Text).unwrap();
        assert_eq!(text["frameworks"], "FRAMEWORK NSA (risk: 20.00)");
        assert_eq!(text["rows"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_rows_share_column_layout() {
        let context = build_context(&sample_document());
        let status_at = context.header_line.find("Status").unwrap();
        for row in &context.rows {
            let cell = &row.line[status_at..];
            assert!(cell.starts_with("Passed") || cell.starts_with("Failed"));
        }
    }
}

//! Assemble a summary into document sections.
//!
//! Composition is a single stateless pass: order the controls, build the
//! rows, and wrap header, framework line, table and footer with their layout
//! hints. Styling here matches the fixed report layout; nothing is computed
//! from the data beyond what the formatter produces.

use tracing::debug;

use super::backend::RenderBackend;
use super::document::{
    Align, BrandingAsset, Color, Document, FontFamily, FontStyle, FooterCell, FooterSection,
    HeaderSection, ImageBlock, PageSetup, Section, TableSection, TableStyle, TextLine, TextStyle,
};
use super::format::{
    control_table_headers, format_count, format_percentage, format_timestamp,
    frameworks_scores_to_string,
};
use super::rows::build_rows;
use crate::data::SummaryDetails;
use crate::options::ReportOptions;
use crate::Result;

/// Background of every other table row.
pub const ALTERNATE_ROW_COLOR: Color = Color::rgb(224, 224, 224);

/// Composes documents for one set of options.
#[derive(Debug, Clone, Copy)]
pub struct DocumentComposer<'a> {
    options: &'a ReportOptions,
}

impl<'a> DocumentComposer<'a> {
    pub fn new(options: &'a ReportOptions) -> Self {
        Self { options }
    }

    /// Build the ordered sections for `summary`.
    pub fn compose(&self, summary: &SummaryDetails, logo: Option<&BrandingAsset>) -> Document {
        let sections = vec![
            Section::Header(self.header(logo)),
            Section::FrameworkScores(framework_line(summary)),
            Section::Table(self.table(summary)),
            Section::Footer(footer(summary)),
        ];

        Document {
            title: self.options.title.clone(),
            page: PageSetup::default(),
            sections,
        }
    }

    fn header(&self, logo: Option<&BrandingAsset>) -> HeaderSection {
        let logo = logo.map(|asset| ImageBlock {
            asset: asset.clone(),
            height: 40.0,
            center: true,
            percent: 100.0,
        });

        HeaderSection {
            logo,
            report_date: TextLine {
                text: format!("Report date: {}", format_timestamp(self.options.timestamp())),
                height: 6.0,
                style: TextStyle::new(FontFamily::Arial, FontStyle::Bold, 6.0, Align::Left),
            },
            rule_after: true,
        }
    }

    fn table(&self, summary: &SummaryDetails) -> TableSection {
        let criteria = self.options.criteria;
        let ids = self
            .options
            .sort_policy
            .sorter()
            .sort(&summary.controls, criteria);
        let rows = build_rows(&ids, &summary.controls, criteria);
        debug!(rows = rows.len(), policy = ?self.options.sort_policy, "built control table");

        TableSection {
            headers: control_table_headers(),
            rows,
            style: TableStyle {
                header: TextStyle::new(FontFamily::Arial, FontStyle::Bold, 8.0, Align::Center),
                content: TextStyle::new(FontFamily::Courier, FontStyle::Normal, 8.0, Align::Center),
                alternated_background: Some(ALTERNATE_ROW_COLOR),
                header_content_space: 2.0,
                lines: false,
            },
            rule_after: true,
            spacing_after: 2.0,
        }
    }
}

fn framework_line(summary: &SummaryDetails) -> TextLine {
    TextLine {
        text: frameworks_scores_to_string(summary.list_frameworks()),
        height: 10.0,
        style: TextStyle::new(FontFamily::Arial, FontStyle::Bold, 8.0, Align::Center),
    }
}

fn footer(summary: &SummaryDetails) -> FooterSection {
    let resources = summary.number_of_resources();
    let cell = |label: &str, value: String, width: u8| FooterCell {
        label: label.to_string(),
        value,
        width,
    };

    FooterSection {
        cells: vec![
            cell("Resource summary", String::new(), 3),
            cell("Failed", format_count(resources.failed()), 2),
            cell("Excluded", format_count(resources.excluded()), 2),
            cell("All", format_count(resources.all()), 2),
            cell("Risk-score", format_percentage(summary.score), 2),
        ],
        height: 5.0,
        style: TextStyle::new(FontFamily::Arial, FontStyle::Bold, 8.0, Align::Left),
    }
}

/// Compose `summary` and hand it to `backend`.
///
/// Backend failures are fatal for this report and are not retried.
pub fn render_report<B: RenderBackend>(
    summary: &SummaryDetails,
    options: &ReportOptions,
    logo: Option<&BrandingAsset>,
    backend: &B,
) -> Result<Vec<u8>> {
    let document = DocumentComposer::new(options).compose(summary, logo);
    let bytes = backend.render(&document)?;
    debug!(bytes = bytes.len(), "rendered report");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Control, ControlStatus, FrameworkSummary, LookupCriteria, ResourceCounters};
    use crate::error::ScanPdfError;
    use crate::output::backend::BackendError;
    use crate::output::document::ImageFormat;
    use crate::query::SortPolicy;
    use chrono::NaiveDate;
    use std::cell::RefCell;

    /// Records what it was asked to render and returns a canned result.
    struct FakeBackend {
        fail: bool,
        seen: RefCell<Vec<Document>>,
    }

    impl FakeBackend {
        fn ok() -> Self {
            Self {
                fail: false,
                seen: RefCell::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl RenderBackend for FakeBackend {
        fn render(&self, document: &Document) -> std::result::Result<Vec<u8>, BackendError> {
            self.seen.borrow_mut().push(document.clone());
            if self.fail {
                Err(BackendError::new("bad styling input"))
            } else {
                Ok(format!("{} sections", document.sections.len()).into_bytes())
            }
        }
    }

    fn sample_summary() -> SummaryDetails {
        SummaryDetails {
            controls: vec![
                Control::new("C-0057", "Privileged container")
                    .with_status(ControlStatus::Failed)
                    .with_counters(ResourceCounters::new(2, 0, 8))
                    .with_score(20.0)
                    .with_severity(8.0),
                Control::new("C-0002", "Exec into container")
                    .with_status(ControlStatus::Passed)
                    .with_counters(ResourceCounters::new(0, 0, 10))
                    .with_severity(5.0),
                Control::new("C-0016", "Allow privilege escalation")
                    .with_status(ControlStatus::Excluded)
                    .with_counters(ResourceCounters::new(0, 3, 7)),
            ]
            .into_iter()
            .collect(),
            frameworks: vec![
                FrameworkSummary::new("NSA", 18.5),
                FrameworkSummary::new("MITRE", 4.25),
            ],
            resource_counters: ResourceCounters::new(2, 3, 25),
            score: 73.456,
        }
    }

    fn pinned_options() -> ReportOptions {
        ReportOptions::new().generated_at(
            NaiveDate::from_ymd_opt(2024, 3, 5)
                .unwrap()
                .and_hms_opt(9, 7, 2)
                .unwrap(),
        )
    }

    #[test]
    fn test_section_order() {
        let options = pinned_options();
        let doc = DocumentComposer::new(&options).compose(&sample_summary(), None);

        assert_eq!(doc.sections.len(), 4);
        assert!(matches!(doc.sections[0], Section::Header(_)));
        assert!(matches!(doc.sections[1], Section::FrameworkScores(_)));
        assert!(matches!(doc.sections[2], Section::Table(_)));
        assert!(matches!(doc.sections[3], Section::Footer(_)));
        assert_eq!(doc.title, "Security Assessment");
    }

    #[test]
    fn test_header_carries_timestamp_and_logo() {
        static LOGO: &[u8] = b"\x89PNG";
        let asset = BrandingAsset::from_static(LOGO, ImageFormat::Png);
        let options = pinned_options();
        let doc = DocumentComposer::new(&options).compose(&sample_summary(), Some(&asset));

        let header = doc.header().unwrap();
        assert_eq!(header.report_date.text, "Report date: 2024-03-05T09:07:02");
        assert_eq!(header.logo.as_ref().unwrap().asset.bytes(), LOGO);
        assert!(header.rule_after);
    }

    #[test]
    fn test_header_without_logo() {
        let options = pinned_options();
        let doc = DocumentComposer::new(&options).compose(&sample_summary(), None);
        assert!(doc.header().unwrap().logo.is_none());
    }

    #[test]
    fn test_framework_line() {
        let options = pinned_options();
        let doc = DocumentComposer::new(&options).compose(&sample_summary(), None);
        assert_eq!(
            doc.framework_scores().unwrap().text,
            "FRAMEWORKS: NSA (risk: 18.50), MITRE (risk: 4.25)"
        );
    }

    #[test]
    fn test_table_rows_sorted_and_aligned() {
        let options = pinned_options();
        let summary = sample_summary();
        let doc = DocumentComposer::new(&options).compose(&summary, None);
        let table = doc.table().unwrap();

        assert_eq!(table.rows.len(), summary.controls.len());
        assert!(table.rows.iter().all(|r| r.len() == table.headers.len()));

        let names: Vec<&str> = table.rows.iter().map(|r| r[1].as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Allow privilege escalation",
                "Exec into container",
                "Privileged container"
            ]
        );
        assert_eq!(table.style.alternated_background, Some(ALTERNATE_ROW_COLOR));
        assert!(!table.style.lines);
    }

    #[test]
    fn test_severity_policy_changes_only_order() {
        let summary = sample_summary();
        let lexical = pinned_options();
        let severity = pinned_options().sort_policy(SortPolicy::Severity);

        let a = DocumentComposer::new(&lexical).compose(&summary, None);
        let b = DocumentComposer::new(&severity).compose(&summary, None);

        let ids: Vec<&str> = b.table().unwrap().rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(ids, vec!["C-0057", "C-0002", "C-0016"]);

        let mut rows_a = a.table().unwrap().rows.clone();
        let mut rows_b = b.table().unwrap().rows.clone();
        rows_a.sort();
        rows_b.sort();
        assert_eq!(rows_a, rows_b);
    }

    #[test]
    fn test_compose_is_deterministic() {
        let summary = sample_summary();
        let options = pinned_options();
        let composer = DocumentComposer::new(&options);
        assert_eq!(composer.compose(&summary, None), composer.compose(&summary, None));
    }

    #[test]
    fn test_footer_totals() {
        let options = pinned_options();
        let doc = DocumentComposer::new(&options).compose(&sample_summary(), None);
        let footer = doc.footer().unwrap();

        let values: Vec<&str> = footer.cells.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["", "2", "3", "30", "73.46%"]);
        assert_eq!(footer.cells[0].label, "Resource summary");
        let width: u8 = footer.cells.iter().map(|c| c.width).sum();
        assert!(width <= 12);
    }

    #[test]
    fn test_empty_summary() {
        let options = pinned_options();
        let doc = DocumentComposer::new(&options).compose(&SummaryDetails::default(), None);

        assert!(doc.table().unwrap().rows.is_empty());
        assert_eq!(doc.framework_scores().unwrap().text, "");
        let values: Vec<&str> = doc
            .footer()
            .unwrap()
            .cells
            .iter()
            .map(|c| c.value.as_str())
            .collect();
        assert_eq!(values, vec!["", "0", "0", "0", "0.00%"]);
    }

    #[test]
    fn test_controls_keyed_apart_from_their_id_resolve() {
        let summary: SummaryDetails = serde_json::from_str(
            r#"{
                "controls": {
                    "k1": {
                        "controlID": "C-0001",
                        "name": "Alpha",
                        "status": "failed",
                        "resourceCounters": { "failedResources": 1, "passedResources": 2 },
                        "score": 33.3
                    }
                }
            }"#,
        )
        .unwrap();
        let options = pinned_options().criteria(LookupCriteria::Id);
        let doc = DocumentComposer::new(&options).compose(&summary, None);

        assert_eq!(
            doc.table().unwrap().rows,
            vec![vec!["C-0001", "Alpha", "Failed", "1", "0", "3", "33.30%"]]
        );
    }

    #[test]
    fn test_render_report_hands_document_to_backend() {
        let backend = FakeBackend::ok();
        let bytes = render_report(&sample_summary(), &pinned_options(), None, &backend).unwrap();

        assert_eq!(bytes, b"4 sections");
        assert_eq!(backend.seen.borrow().len(), 1);
        assert_eq!(backend.seen.borrow()[0].table().unwrap().rows.len(), 3);
    }

    #[test]
    fn test_render_report_backend_failure_is_fatal() {
        let backend = FakeBackend::failing();
        let err = render_report(&sample_summary(), &pinned_options(), None, &backend).unwrap_err();

        assert!(matches!(err, ScanPdfError::Render(_)));
        assert!(err.to_string().contains("bad styling input"));
    }
}

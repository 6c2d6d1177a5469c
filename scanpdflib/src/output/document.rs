//! Backend-neutral document model.
//!
//! A [`Document`] is an ordered list of sections, each carrying the layout
//! hints a backend needs (row heights, fonts, alignment, shading). Backends
//! decide pagination and encoding; nothing here knows about PDF.

use serde::Serialize;
use std::borrow::Cow;

/// Font family hint. Backends map these onto whatever fonts they ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    Arial,
    Courier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Font and alignment of a run of text. Sizes are in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    pub family: FontFamily,
    pub style: FontStyle,
    pub size: f32,
    pub align: Align,
}

impl TextStyle {
    pub fn new(family: FontFamily, style: FontStyle, size: f32, align: Align) -> Self {
        Self {
            family,
            style,
            size,
            align,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    A4,
}

impl PageSize {
    /// Page dimensions in millimeters (width, height)
    pub fn dimensions_mm(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (210.0, 297.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
}

/// Page margins in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margins {
    pub left: f32,
    pub top: f32,
    pub right: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageSetup {
    pub size: PageSize,
    pub orientation: Orientation,
    pub margins: Margins,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            size: PageSize::A4,
            orientation: Orientation::Portrait,
            margins: Margins {
                left: 10.0,
                top: 15.0,
                right: 10.0,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
}

/// Branding image embedded in the report header.
///
/// Built once, typically from `include_bytes!`, and only ever read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandingAsset {
    pub format: ImageFormat,
    #[serde(skip)]
    bytes: Cow<'static, [u8]>,
}

impl BrandingAsset {
    /// Wrap an image compiled into the binary.
    pub const fn from_static(bytes: &'static [u8], format: ImageFormat) -> Self {
        Self {
            format,
            bytes: Cow::Borrowed(bytes),
        }
    }

    /// Wrap image bytes loaded at runtime.
    pub fn new(bytes: Vec<u8>, format: ImageFormat) -> Self {
        Self {
            format,
            bytes: Cow::Owned(bytes),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// An image row: the image is scaled to `percent` of the row and optionally centred.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageBlock {
    pub asset: BrandingAsset,
    pub height: f32,
    pub center: bool,
    pub percent: f32,
}

/// A single row holding one line of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLine {
    pub text: String,
    pub height: f32,
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderSection {
    pub logo: Option<ImageBlock>,
    pub report_date: TextLine,
    /// Draw a horizontal rule under the header
    pub rule_after: bool,
}

/// Styling directives for the control table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TableStyle {
    pub header: TextStyle,
    pub content: TextStyle,
    /// Background for every other body row; `None` disables shading
    pub alternated_background: Option<Color>,
    /// Gap between the header row and the first body row, in millimeters
    pub header_content_space: f32,
    /// Draw grid lines between rows
    pub lines: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSection {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub style: TableStyle,
    pub rule_after: bool,
    /// Blank space after the table, in millimeters
    pub spacing_after: f32,
}

/// One column of the footer row. `width` is in twelfths of the printable width.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FooterCell {
    pub label: String,
    pub value: String,
    pub width: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FooterSection {
    pub cells: Vec<FooterCell>,
    pub height: f32,
    pub style: TextStyle,
}

/// One logical block of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Section {
    Header(HeaderSection),
    FrameworkScores(TextLine),
    Table(TableSection),
    Footer(FooterSection),
}

/// A composed report, ready for a backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub title: String,
    pub page: PageSetup,
    pub sections: Vec<Section>,
}

impl Document {
    pub fn header(&self) -> Option<&HeaderSection> {
        self.sections.iter().find_map(|s| match s {
            Section::Header(h) => Some(h),
            _ => None,
        })
    }

    pub fn framework_scores(&self) -> Option<&TextLine> {
        self.sections.iter().find_map(|s| match s {
            Section::FrameworkScores(line) => Some(line),
            _ => None,
        })
    }

    pub fn table(&self) -> Option<&TableSection> {
        self.sections.iter().find_map(|s| match s {
            Section::Table(t) => Some(t),
            _ => None,
        })
    }

    pub fn footer(&self) -> Option<&FooterSection> {
        self.sections.iter().find_map(|s| match s {
            Section::Footer(f) => Some(f),
            _ => None,
        })
    }
}

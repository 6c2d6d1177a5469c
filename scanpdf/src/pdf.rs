//! PDF backend built on printpdf.
//!
//! Lays documents out top-down on A4 pages. Builtin PDF fonts carry no
//! metrics we can query, so text widths are estimated from an average glyph
//! width per family; cell text is word-wrapped against that estimate.

use std::io::Cursor;

use printpdf::image_crate::codecs::jpeg::JpegDecoder;
use printpdf::image_crate::codecs::png::PngDecoder;
use printpdf::image_crate::ImageError;
use printpdf::{
    BuiltinFont, Color as PdfColor, Image, ImageTransform, IndirectFontRef, Line, Mm,
    PdfDocument, PdfDocumentReference, PdfLayerReference, Point, Rect, Rgb,
};
use scanpdflib::output::{
    Align, Color, FontFamily, FontStyle, FooterSection, HeaderSection, ImageBlock, ImageFormat,
    TableSection, TextLine, TextStyle,
};
use scanpdflib::{BackendError, Document, RenderBackend, Section};
use tracing::debug;

const PT_TO_MM: f32 = 0.3528;
const BOTTOM_MARGIN: f32 = 15.0;
const IMAGE_DPI: f32 = 300.0;
const GRID_COLUMNS: f32 = 12.0;

/// Renders documents to PDF bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfBackend;

impl RenderBackend for PdfBackend {
    fn render(&self, document: &Document) -> Result<Vec<u8>, BackendError> {
        let canvas = lay_out(document)?;
        debug!(pages = canvas.pages, "laid out pdf");
        canvas
            .doc
            .save_to_bytes()
            .map_err(|e| BackendError::new(format!("could not encode pdf: {e}")))
    }
}

/// Draw every section of `document` onto a fresh canvas.
fn lay_out(document: &Document) -> Result<Canvas, BackendError> {
    let mut canvas = Canvas::new(document)?;
    for section in &document.sections {
        match section {
            Section::Header(header) => canvas.header(header)?,
            Section::FrameworkScores(line) => canvas.text_row(line),
            Section::Table(table) => canvas.table(table),
            Section::Footer(footer) => canvas.footer(footer),
        }
    }
    Ok(canvas)
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    mono: IndirectFontRef,
    mono_bold: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> Result<Self, BackendError> {
        let add = |font: BuiltinFont| {
            doc.add_builtin_font(font)
                .map_err(|e| BackendError::new(format!("could not load font: {e}")))
        };
        Ok(Self {
            regular: add(BuiltinFont::Helvetica)?,
            bold: add(BuiltinFont::HelveticaBold)?,
            mono: add(BuiltinFont::Courier)?,
            mono_bold: add(BuiltinFont::CourierBold)?,
        })
    }

    fn get(&self, style: &TextStyle) -> &IndirectFontRef {
        match (style.family, style.style) {
            (FontFamily::Arial, FontStyle::Normal) => &self.regular,
            (FontFamily::Arial, FontStyle::Bold) => &self.bold,
            (FontFamily::Courier, FontStyle::Normal) => &self.mono,
            (FontFamily::Courier, FontStyle::Bold) => &self.mono_bold,
        }
    }
}

/// Average glyph width in millimeters.
fn glyph_width(style: &TextStyle) -> f32 {
    let em = match style.family {
        FontFamily::Arial => 0.52,
        FontFamily::Courier => 0.6,
    };
    style.size * PT_TO_MM * em
}

fn text_width(text: &str, style: &TextStyle) -> f32 {
    text.chars().count() as f32 * glyph_width(style)
}

fn line_height(style: &TextStyle) -> f32 {
    style.size * PT_TO_MM * 1.4
}

/// Greedy word wrap to at most `max_chars` per line. Overlong words are split.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word.drain(..max_chars).collect());
        }
        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn pdf_color(color: Color) -> PdfColor {
    PdfColor::Rgb(Rgb::new(
        f32::from(color.red) / 255.0,
        f32::from(color.green) / 255.0,
        f32::from(color.blue) / 255.0,
        None,
    ))
}

const BLACK: Color = Color::rgb(0, 0, 0);

/// A table row after word wrapping: one list of lines per cell.
struct RowLayout {
    cells: Vec<Vec<String>>,
    col_width: f32,
    line_height: f32,
    height: f32,
}

/// Drawing state: the current page layer and a cursor measured from the page bottom.
struct Canvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: Fonts,
    width: f32,
    height: f32,
    left: f32,
    right: f32,
    top: f32,
    cursor: f32,
    pages: usize,
}

impl Canvas {
    fn new(document: &Document) -> Result<Self, BackendError> {
        let (width, height) = document.page.size.dimensions_mm();
        let (doc, page, layer) =
            PdfDocument::new(&document.title, Mm(width), Mm(height), "Layer 1");
        let layer = doc.get_page(page).get_layer(layer);
        let fonts = Fonts::load(&doc)?;
        let margins = document.page.margins;

        Ok(Self {
            doc,
            layer,
            fonts,
            width,
            height,
            left: margins.left,
            right: width - margins.right,
            top: margins.top,
            cursor: height - margins.top,
            pages: 1,
        })
    }

    fn printable_width(&self) -> f32 {
        self.right - self.left
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(
            Mm(self.width),
            Mm(self.height),
            format!("Page {}, Layer 1", self.pages + 1),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor = self.height - self.top;
        self.pages += 1;
    }

    /// Start a new page unless `needed` millimeters fit above the bottom margin.
    /// Returns whether a page break happened.
    fn ensure_space(&mut self, needed: f32) -> bool {
        if self.cursor - needed < BOTTOM_MARGIN && self.cursor < self.height - self.top {
            self.new_page();
            true
        } else {
            false
        }
    }

    /// Draw `text` inside the horizontal span `[x, x + span]` with its baseline at `baseline`.
    fn draw_text(&self, text: &str, style: &TextStyle, x: f32, span: f32, baseline: f32) {
        let x = match style.align {
            Align::Left => x,
            Align::Center => x + (span - text_width(text, style)).max(0.0) / 2.0,
            Align::Right => x + (span - text_width(text, style)).max(0.0),
        };
        self.layer.set_fill_color(pdf_color(BLACK));
        self.layer
            .use_text(text, style.size, Mm(x), Mm(baseline), self.fonts.get(style));
    }

    fn text_row(&mut self, line: &TextLine) {
        self.ensure_space(line.height);
        let baseline = self.cursor - (line.height + line.style.size * PT_TO_MM) / 2.0;
        if !line.text.is_empty() {
            self.draw_text(
                &line.text,
                &line.style,
                self.left,
                self.printable_width(),
                baseline,
            );
        }
        self.cursor -= line.height;
    }

    fn rule(&mut self) {
        self.ensure_space(1.0);
        let y = self.cursor - 0.5;
        self.layer.set_outline_color(pdf_color(BLACK));
        self.layer.set_outline_thickness(0.3);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(self.left), Mm(y)), false),
                (Point::new(Mm(self.right), Mm(y)), false),
            ],
            is_closed: false,
        });
        self.cursor -= 1.0;
    }

    fn header(&mut self, header: &HeaderSection) -> Result<(), BackendError> {
        if let Some(logo) = &header.logo {
            self.image_row(logo)?;
        }
        self.text_row(&header.report_date);
        if header.rule_after {
            self.rule();
        }
        Ok(())
    }

    fn image_row(&mut self, block: &ImageBlock) -> Result<(), BackendError> {
        self.ensure_space(block.height);
        let decode_err =
            |e: ImageError| BackendError::new(format!("could not decode branding image: {e}"));
        let reader = Cursor::new(block.asset.bytes());
        let image = match block.asset.format {
            ImageFormat::Png => Image::try_from(PngDecoder::new(reader).map_err(decode_err)?),
            ImageFormat::Jpeg => Image::try_from(JpegDecoder::new(reader).map_err(decode_err)?),
        }
        .map_err(decode_err)?;

        let px_to_mm = 25.4 / IMAGE_DPI;
        let natural_w = image.image.width.0 as f32 * px_to_mm;
        let natural_h = image.image.height.0 as f32 * px_to_mm;
        if natural_w <= 0.0 || natural_h <= 0.0 {
            return Err(BackendError::new("branding image has no pixels"));
        }

        let fraction = block.percent / 100.0;
        let scale = (block.height * fraction / natural_h)
            .min(self.printable_width() * fraction / natural_w);
        let (w, h) = (natural_w * scale, natural_h * scale);
        let x = if block.center {
            self.left + (self.printable_width() - w) / 2.0
        } else {
            self.left
        };
        let y = self.cursor - (block.height + h) / 2.0;

        image.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(x)),
                translate_y: Some(Mm(y)),
                scale_x: Some(scale),
                scale_y: Some(scale),
                dpi: Some(IMAGE_DPI),
                ..Default::default()
            },
        );
        self.cursor -= block.height;
        Ok(())
    }

    /// Wrap `cells` into equal-width columns and measure the resulting row.
    fn layout_cells(&self, cells: &[String], style: &TextStyle) -> RowLayout {
        let columns = cells.len().max(1);
        let col_width = self.printable_width() / columns as f32;
        let max_chars = ((col_width - 1.0) / glyph_width(style)).floor() as usize;
        let cells: Vec<Vec<String>> = cells.iter().map(|c| wrap(c, max_chars)).collect();
        let lines = cells.iter().map(Vec::len).max().unwrap_or(1);
        let lh = line_height(style);
        RowLayout {
            cells,
            col_width,
            line_height: lh,
            height: lines as f32 * lh + 1.0,
        }
    }

    /// Draw one measured row at the cursor.
    fn cells_row(&mut self, row: &RowLayout, style: &TextStyle, shade: Option<Color>) {
        if let Some(color) = shade {
            self.layer.set_fill_color(pdf_color(color));
            self.layer.add_rect(Rect::new(
                Mm(self.left),
                Mm(self.cursor - row.height),
                Mm(self.right),
                Mm(self.cursor),
            ));
        }

        let lh = row.line_height;
        for (i, cell_lines) in row.cells.iter().enumerate() {
            let x = self.left + i as f32 * row.col_width;
            for (n, text) in cell_lines.iter().enumerate() {
                let baseline = self.cursor - 0.5 - (n as f32 + 1.0) * lh + lh * 0.3;
                self.draw_text(text, style, x, row.col_width, baseline);
            }
        }
        self.cursor -= row.height;
    }

    fn table_header(&mut self, table: &TableSection) {
        let row = self.layout_cells(&table.headers, &table.style.header);
        self.ensure_space(row.height + table.style.header_content_space);
        self.cells_row(&row, &table.style.header, None);
        self.cursor -= table.style.header_content_space;
    }

    /// Draw one content row, moving to a new page (and repeating the header)
    /// when the whole wrapped row does not fit above the bottom margin.
    fn table_row(&mut self, table: &TableSection, cells: &[String], shade: Option<Color>) {
        let content = table.style.content;
        let row = self.layout_cells(cells, &content);
        if self.ensure_space(row.height) {
            self.table_header(table);
        }
        self.cells_row(&row, &content, shade);
        if table.style.lines {
            self.rule();
        }
    }

    fn table(&mut self, table: &TableSection) {
        self.table_header(table);
        for (i, row) in table.rows.iter().enumerate() {
            let shade = if i % 2 == 1 {
                table.style.alternated_background
            } else {
                None
            };
            self.table_row(table, row, shade);
        }

        if table.rule_after {
            self.rule();
        }
        self.cursor -= table.spacing_after;
    }

    fn footer(&mut self, footer: &FooterSection) {
        self.ensure_space(footer.height * 2.0);
        let labels: Vec<&str> = footer.cells.iter().map(|c| c.label.as_str()).collect();
        let values: Vec<&str> = footer.cells.iter().map(|c| c.value.as_str()).collect();
        self.footer_row(footer, &labels);
        self.footer_row(footer, &values);
    }

    /// One row of the 12-column footer grid.
    fn footer_row(&mut self, footer: &FooterSection, texts: &[&str]) {
        let unit = self.printable_width() / GRID_COLUMNS;
        let baseline = self.cursor - (footer.height + footer.style.size * PT_TO_MM) / 2.0;
        let mut x = self.left;
        for (cell, text) in footer.cells.iter().zip(texts) {
            let span = f32::from(cell.width) * unit;
            if !text.is_empty() {
                self.draw_text(text, &footer.style, x, span, baseline);
            }
            x += span;
        }
        self.cursor -= footer.height;
    }
}

//! # PDF Export
//!
//! Renders a laid-out [`Document`] to PDF with Typst. Every layout primitive
//! becomes an absolutely placed Typst element on a margin-less A4 page, so
//! the PDF matches the millimetre coordinates produced by [`crate::report`].
//!
//! Fonts come from `typst-assets` and are loaded once per process.
//!
//! ## Example
//!
//! ```rust,no_run
//! use health_core::calculations::assess;
//! use health_core::pdf::render_report_pdf;
//! use health_core::subject::{Gender, Subject};
//! use health_core::units::Measurement;
//!
//! let subject = Subject::new(Measurement::kg(70.0), Measurement::cm(175.0), 30, Gender::Male).unwrap();
//! let bundle = assess(&subject).unwrap();
//! let pdf = render_report_pdf(&bundle).unwrap();
//! std::fs::write("report.pdf", pdf).unwrap();
//! ```

use std::fmt::Write as _;

use chrono::{Datelike, Local};
use once_cell::sync::Lazy;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::calculations::ResultBundle;
use crate::errors::{HealthError, HealthResult};
use crate::report::{format_report, Document, Element, FontStyle, Rgb, TextAlign};

/// Points to millimetres
const MM_PER_POINT: f64 = 0.3528;
/// Distance from the top of a text box to its baseline, in em
const CAP_HEIGHT_EM: f64 = 0.7;

static FONTS: Lazy<Vec<Font>> = Lazy::new(|| {
    typst_assets::fonts()
        .flat_map(|data| Font::iter(Bytes::new(data.to_vec())))
        .collect()
});

// ============================================================================
// Typst World Implementation
// ============================================================================

/// A single-source Typst world with bundled fonts and no file access.
struct PdfWorld {
    main: Source,
    book: LazyHash<FontBook>,
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String) -> Self {
        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(FontBook::from_fonts(FONTS.iter())),
            library: LazyHash::new(Library::default()),
        }
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        FONTS.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Local::now();
        Datetime::from_ymd(now.year(), now.month().try_into().ok()?, now.day().try_into().ok()?)
    }
}

// ============================================================================
// Typst Source Generation
// ============================================================================

/// Quote text as a Typst string literal.
fn typst_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn rgb(color: Rgb) -> String {
    format!("rgb({}, {}, {})", color.0, color.1, color.2)
}

fn write_element(out: &mut String, element: &Element, page_width: f64) {
    // Writing to a String cannot fail
    let _ = match element {
        Element::Text { x, y, text, size, style, color, align } => {
            let top = y - size * MM_PER_POINT * CAP_HEIGHT_EM;
            let styling = match style {
                FontStyle::Normal => "",
                FontStyle::Bold => ", weight: \"bold\"",
                FontStyle::Italic => ", style: \"italic\"",
            };
            let (anchor, dx) = match align {
                TextAlign::Left => ("left", *x),
                TextAlign::Center => ("center", x - page_width / 2.0),
            };
            writeln!(
                out,
                "#place(top + {anchor}, dx: {dx:.2}mm, dy: {top:.2}mm, text(size: {size}pt{styling}, fill: {}, {}))",
                rgb(*color),
                typst_string(text),
            )
        }
        Element::Rect { x, y, width, height, fill } => writeln!(
            out,
            "#place(top + left, dx: {x:.2}mm, dy: {y:.2}mm, rect(width: {width:.2}mm, height: {height:.2}mm, fill: {}, stroke: none))",
            rgb(*fill),
        ),
        Element::Circle { cx, cy, radius, fill } => writeln!(
            out,
            "#place(top + left, dx: {:.2}mm, dy: {:.2}mm, circle(radius: {radius:.2}mm, fill: {}, stroke: none))",
            cx - radius,
            cy - radius,
            rgb(*fill),
        ),
    };
}

/// Typst markup for a document.
pub fn typst_source(document: &Document) -> String {
    let mut out = format!(
        "#set page(width: {}mm, height: {}mm, margin: 0mm)\n",
        document.page_width, document.page_height
    );
    for (i, page) in document.pages.iter().enumerate() {
        if i > 0 {
            out.push_str("#pagebreak()\n");
        }
        for element in &page.elements {
            write_element(&mut out, element, document.page_width);
        }
    }
    out
}

// ============================================================================
// Rendering
// ============================================================================

/// Render a laid-out document to PDF bytes.
///
/// # Errors
///
/// `RenderFailed` if Typst compilation or PDF export fails.
pub fn render_document_pdf(document: &Document) -> HealthResult<Vec<u8>> {
    let world = PdfWorld::new(typst_source(document));

    let warned = typst::compile(&world);
    let compiled = warned.output.map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        HealthError::render_failed(format!("Typst compilation failed: {}", messages.join("; ")))
    })?;

    let bytes = typst_pdf::pdf(&compiled, &PdfOptions::default()).map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        HealthError::render_failed(format!("PDF export failed: {}", messages.join("; ")))
    })?;

    tracing::debug!(pages = document.pages.len(), bytes = bytes.len(), "rendered PDF");
    Ok(bytes)
}

/// Lay out and render a report in one step.
pub fn render_report_pdf(bundle: &ResultBundle) -> HealthResult<Vec<u8>> {
    render_document_pdf(&format_report(bundle))
}

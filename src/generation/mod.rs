/*!
 * Document generation engines for the supported formats.
 *
 * Translated text comes back as flat prose; every generator re-splits it
 * into paragraphs on blank-line boundaries (the chunking/translation round
 * trip does not preserve the original block segmentation exactly) and then
 * rebuilds a document:
 *
 * - `docx`: paragraphs, bullet lists and hyperlink runs via docx-rs
 * - `pptx`: single slide with one full-bleed text box (minimal OOXML package)
 * - `pdf`: paginated layout with real glyph-width word wrap via lopdf
 * - `font`: TrueType metrics reader and PDF font embedding
 *
 * Plain text is UTF-8 encoded verbatim.
 */

pub mod docx;
pub mod font;
pub mod pdf;
pub mod pptx;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::DocumentFormat;
use crate::errors::GenerationError;

pub use self::docx::DocxStyle;
pub use self::pdf::PdfLayout;

// @const: Blank-line paragraph separator (two or more newlines)
static PARAGRAPH_SPLIT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());

// @const: Leading bullet marker on a list line
static BULLET_LINE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*\u{2022}]\s+").unwrap());

// @const: Embedded URL inside a paragraph
static URL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());

/// Writes translated text back out as a document of the original format
///
/// Carries the immutable style/layout configuration so tests can substitute
/// alternate fonts and margins deterministically.
#[derive(Debug, Clone, Default)]
pub struct DocumentWriter {
    /// DOCX run/paragraph styling
    docx: DocxStyle,
    /// PDF page layout and font candidates
    pdf: PdfLayout,
}

impl DocumentWriter {
    /// Create a writer with explicit configuration
    pub fn new(docx: DocxStyle, pdf: PdfLayout) -> Self {
        Self { docx, pdf }
    }

    /// Generate a document of `format` from translated text
    pub fn generate(&self, text: &str, format: DocumentFormat) -> Result<Vec<u8>, GenerationError> {
        let text = text.replace("\r\n", "\n");
        match format {
            DocumentFormat::PlainText => Ok(text.into_bytes()),
            DocumentFormat::Docx => docx::generate(&text, &self.docx),
            DocumentFormat::Pptx => pptx::generate(&text),
            DocumentFormat::Pdf => pdf::generate(&text, &self.pdf),
        }
    }
}

/// Split translated text into paragraphs on blank-line boundaries
pub(crate) fn split_paragraphs(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    PARAGRAPH_SPLIT_REGEX.split(text).collect()
}

/// Whether every non-blank line of a paragraph starts with a bullet marker
pub(crate) fn is_bullet_paragraph(paragraph: &str) -> bool {
    let mut saw_line = false;
    for line in paragraph.lines() {
        if line.trim().is_empty() {
            continue;
        }
        saw_line = true;
        if !BULLET_LINE_REGEX.is_match(line) {
            return false;
        }
    }
    saw_line
}

/// Strip the leading bullet marker from a list line
pub(crate) fn strip_bullet_marker(line: &str) -> &str {
    match BULLET_LINE_REGEX.find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    }
}

/// One styled segment of a paragraph line
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum LineSegment<'a> {
    /// Ordinary text
    Text(&'a str),
    /// A URL to render as a hyperlink
    Link(&'a str),
}

/// Split a line into plain-text and URL segments
pub(crate) fn split_links(line: &str) -> Vec<LineSegment<'_>> {
    let mut segments = Vec::new();
    let mut cursor = 0;
    for m in URL_REGEX.find_iter(line) {
        if m.start() > cursor {
            segments.push(LineSegment::Text(&line[cursor..m.start()]));
        }
        segments.push(LineSegment::Link(m.as_str()));
        cursor = m.end();
    }
    if cursor < line.len() {
        segments.push(LineSegment::Text(&line[cursor..]));
    }
    segments
}

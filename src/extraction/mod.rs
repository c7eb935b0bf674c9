/*!
 * Text extraction engines for the supported document formats.
 *
 * Each format-specific extractor turns a stored document into an ordered
 * sequence of `ExtractedBlock`s; `extract_text` flattens that sequence into
 * the single plain-text representation handed to the translation layer:
 *
 * - `docx`: OOXML word-processing paragraphs (`word/document.xml`)
 * - `pptx`: OOXML slides, sorted numerically by slide number
 * - `pdf`: layout-ordered text from the PDF content streams
 *
 * Plain text passes through verbatim. Extraction is single pass and
 * all-or-nothing: a malformed container aborts the whole document.
 */

pub mod docx;
pub mod pdf;
pub mod pptx;

use crate::document::{DocumentFormat, ExtractedBlock};
use crate::errors::ExtractionError;

/// Bullet glyph used when flattening list items to plain text
pub const BULLET_PREFIX: &str = "\u{2022} ";

/// Extract the plain-text representation of a document
///
/// For the OOXML formats the result is the flattened block sequence; PDF
/// and plain text are already flat and pass through with only character
/// normalization (PDF) or UTF-8 decoding (plain text).
pub fn extract_text(bytes: &[u8], format: DocumentFormat) -> Result<String, ExtractionError> {
    match format {
        DocumentFormat::PlainText => Ok(String::from_utf8_lossy(bytes).into_owned()),
        DocumentFormat::Pdf => pdf::extract(bytes),
        DocumentFormat::Docx => Ok(flatten_blocks(&docx::extract_blocks(bytes)?)),
        DocumentFormat::Pptx => Ok(flatten_blocks(&pptx::extract_blocks(bytes)?)),
    }
}

/// Flatten an ordered block sequence into plain text
///
/// Paragraphs are separated by a blank line; consecutive bullet items stay
/// on adjacent lines so a list survives the translation round trip as one
/// paragraph of marked lines.
pub fn flatten_blocks(blocks: &[ExtractedBlock]) -> String {
    let mut out = String::new();
    let mut prev_bullet = false;

    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            if block.is_bullet && prev_bullet {
                out.push('\n');
            } else {
                out.push_str("\n\n");
            }
        }
        if block.is_bullet {
            out.push_str(BULLET_PREFIX);
        }
        out.push_str(&block.text);
        prev_bullet = block.is_bullet;
    }

    out
}

/// Collapse runs of whitespace inside extracted XML text to single spaces
pub(crate) fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_ws = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_ws {
                out.push(' ');
            }
            in_ws = true;
        } else {
            out.push(ch);
            in_ws = false;
        }
    }
    out
}

use std::io::Cursor;

use docx_rs::{
    AbstractNumbering, BreakType, Docx, Hyperlink, HyperlinkType, IndentLevel, Level, LevelJc,
    LevelText, LineSpacing, NumberFormat, Numbering, NumberingId, Paragraph, Run, RunFonts, Start,
};

use crate::errors::GenerationError;
use crate::generation::{
    is_bullet_paragraph, split_links, split_paragraphs, strip_bullet_marker, LineSegment,
};

// @module: DOCX regeneration from translated text

/// Numbering id of the shared single-level bullet definition
const BULLET_NUMBERING_ID: usize = 1;

/// Run and paragraph styling applied to generated DOCX documents
#[derive(Debug, Clone)]
pub struct DocxStyle {
    /// Font families in preference order; the first is applied to all runs
    pub font_preferences: Vec<String>,
    /// Run size in half-points (24 = 12pt)
    pub font_size: usize,
    /// Paragraph space-after in twentieths of a point
    pub space_after: u32,
    /// Hyperlink run color (RRGGBB)
    pub link_color: String,
}

impl Default for DocxStyle {
    fn default() -> Self {
        Self {
            font_preferences: vec![
                "Calibri".to_string(),
                "Arial".to_string(),
                "Liberation Sans".to_string(),
            ],
            font_size: 24,
            space_after: 200,
            link_color: "0563C1".to_string(),
        }
    }
}

impl DocxStyle {
    /// Font family applied to every run
    fn font_family(&self) -> &str {
        self.font_preferences
            .first()
            .map(String::as_str)
            .unwrap_or("Calibri")
    }
}

/// Generate a DOCX document from translated text
///
/// Paragraphs whose non-blank lines all carry a bullet marker become one
/// list-numbered paragraph per line (marker stripped); other paragraphs
/// keep embedded newlines as soft line breaks. URL substrings are emitted
/// as underlined, colored hyperlink runs. One bullet numbering definition
/// is created per document and shared by every bullet paragraph.
pub fn generate(text: &str, style: &DocxStyle) -> Result<Vec<u8>, GenerationError> {
    let mut docx = Docx::new()
        .add_abstract_numbering(
            AbstractNumbering::new(BULLET_NUMBERING_ID).add_level(Level::new(
                0,
                Start::new(1),
                NumberFormat::new("bullet"),
                LevelText::new("\u{2022}"),
                LevelJc::new("left"),
            )),
        )
        .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_NUMBERING_ID));

    for paragraph in split_paragraphs(text) {
        if is_bullet_paragraph(paragraph) {
            for line in paragraph.lines().filter(|l| !l.trim().is_empty()) {
                docx = docx.add_paragraph(bullet_paragraph(strip_bullet_marker(line), style));
            }
        } else {
            docx = docx.add_paragraph(text_paragraph(paragraph, style));
        }
    }

    let mut cursor = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| GenerationError::Docx(e.to_string()))?;
    Ok(cursor.into_inner())
}

/// A plain run in the document font
fn styled_run(text: &str, style: &DocxStyle) -> Run {
    Run::new()
        .add_text(text)
        .size(style.font_size)
        .fonts(
            RunFonts::new()
                .ascii(style.font_family())
                .hi_ansi(style.font_family()),
        )
}

/// An underlined, colored run for hyperlink text
fn link_run(text: &str, style: &DocxStyle) -> Run {
    styled_run(text, style)
        .underline("single")
        .color(&style.link_color)
}

/// Base paragraph with the configured spacing
fn base_paragraph(style: &DocxStyle) -> Paragraph {
    Paragraph::new().line_spacing(LineSpacing::new().after(style.space_after))
}

/// Append one line's text and link segments to a paragraph
fn append_line(mut paragraph: Paragraph, line: &str, style: &DocxStyle) -> Paragraph {
    for segment in split_links(line) {
        paragraph = match segment {
            LineSegment::Text(t) => paragraph.add_run(styled_run(t, style)),
            LineSegment::Link(url) => paragraph.add_hyperlink(
                Hyperlink::new(url, HyperlinkType::External).add_run(link_run(url, style)),
            ),
        };
    }
    paragraph
}

/// A normal paragraph; embedded newlines become soft line breaks
fn text_paragraph(text: &str, style: &DocxStyle) -> Paragraph {
    let mut paragraph = base_paragraph(style);
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            paragraph = paragraph.add_run(Run::new().add_break(BreakType::TextWrapping));
        }
        paragraph = append_line(paragraph, line, style);
    }
    paragraph
}

/// A single bullet list item referencing the shared numbering definition
fn bullet_paragraph(text: &str, style: &DocxStyle) -> Paragraph {
    append_line(base_paragraph(style), text, style).numbering(
        NumberingId::new(BULLET_NUMBERING_ID),
        IndentLevel::new(0),
    )
}

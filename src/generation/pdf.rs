use std::io::Cursor;
use std::path::PathBuf;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::errors::GenerationError;
use crate::generation::font::PdfFont;

// @module: PDF regeneration from translated text
//
// Text is laid out top-down on Letter pages with a fixed leading. Word
// wrap measures real glyph advances from the selected font, so embedded
// Unicode fonts and the Helvetica fallback wrap correctly at the same
// margin. Content streams are left uncompressed.

/// Page geometry, type metrics and font selection for generated PDFs
#[derive(Debug, Clone)]
pub struct PdfLayout {
    /// Page width in points
    pub page_width: f32,
    /// Page height in points
    pub page_height: f32,
    /// Uniform page margin in points
    pub margin: f32,
    /// Body font size in points
    pub font_size: f32,
    /// Baseline-to-baseline leading in points
    pub line_height: f32,
    /// TrueType files to try embedding, in preference order
    pub font_candidates: Vec<PathBuf>,
}

impl Default for PdfLayout {
    fn default() -> Self {
        Self {
            // US Letter
            page_width: 612.0,
            page_height: 792.0,
            margin: 50.0,
            font_size: 12.0,
            line_height: 14.0,
            font_candidates: vec![
                PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"),
                PathBuf::from("/usr/share/fonts/TTF/DejaVuSans.ttf"),
                PathBuf::from("/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf"),
                PathBuf::from("/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf"),
                PathBuf::from("/Library/Fonts/Arial Unicode.ttf"),
                PathBuf::from("C:\\Windows\\Fonts\\arial.ttf"),
            ],
        }
    }
}

impl PdfLayout {
    /// Usable line width between the margins
    fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Number of text lines that fit between the margins
    fn lines_per_page(&self) -> usize {
        let fit = ((self.page_height - 2.0 * self.margin) / self.line_height) as usize;
        fit.max(1)
    }
}

/// Generate a paginated PDF from translated text
pub fn generate(text: &str, layout: &PdfLayout) -> Result<Vec<u8>, GenerationError> {
    let font = PdfFont::load_first(&layout.font_candidates);

    let normalized = normalize_for_pdf(text);
    let mut lines: Vec<String> = Vec::new();
    for raw_line in normalized.split('\n') {
        let printable = ensure_encodable(raw_line, &font);
        lines.extend(wrap_line(
            &printable,
            &font,
            layout.font_size,
            layout.content_width(),
        ));
    }
    if lines.is_empty() {
        lines.push(String::new());
    }

    assemble(&lines, &font, layout)
}

/// Map characters that commonly break PDF text output to safe equivalents
///
/// Covers the private-use bullets some office suites emit for list
/// markers, no-break spaces, curly quotes and typographic dashes. Tabs
/// become spaces because the layout has no tab stops.
pub(crate) fn normalize_for_pdf(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{F0B7}' | '\u{F0A7}' => out.push('\u{2022}'),
            '\u{00A0}' => out.push(' '),
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2013}' | '\u{2014}' => out.push('-'),
            '\t' => out.push_str("    "),
            _ => out.push(c),
        }
    }
    out
}

/// Replace characters the font cannot render
///
/// Bullets degrade to '*' so list structure stays visible; everything
/// else becomes '?'.
pub(crate) fn ensure_encodable(line: &str, font: &PdfFont) -> String {
    line.chars()
        .map(|c| {
            if font.can_encode(c) {
                c
            } else if c == '\u{2022}' {
                '*'
            } else {
                '?'
            }
        })
        .collect()
}

/// Wrap one logical line into physical lines no wider than `max_width`
///
/// Words longer than a whole line are split at character granularity so
/// layout always makes progress.
pub(crate) fn wrap_line(line: &str, font: &PdfFont, font_size: f32, max_width: f32) -> Vec<String> {
    if line.trim().is_empty() {
        return vec![String::new()];
    }

    let space_width = font.text_width(" ", font_size);
    let mut wrapped: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in line.split_whitespace() {
        let word_width = font.text_width(word, font_size);

        if word_width > max_width {
            if !current.is_empty() {
                wrapped.push(std::mem::take(&mut current));
                current_width = 0.0;
            }
            let (full, rest, rest_width) = split_long_word(word, font, font_size, max_width);
            wrapped.extend(full);
            current = rest;
            current_width = rest_width;
            continue;
        }

        if current.is_empty() {
            current = word.to_string();
            current_width = word_width;
        } else if current_width + space_width + word_width <= max_width {
            current.push(' ');
            current.push_str(word);
            current_width += space_width + word_width;
        } else {
            wrapped.push(std::mem::take(&mut current));
            current = word.to_string();
            current_width = word_width;
        }
    }

    if !current.is_empty() {
        wrapped.push(current);
    }
    wrapped
}

/// Split an overlong word into full-width pieces plus a trailing remainder
fn split_long_word(
    word: &str,
    font: &PdfFont,
    font_size: f32,
    max_width: f32,
) -> (Vec<String>, String, f32) {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut piece_width = 0.0_f32;

    for c in word.chars() {
        let char_width = font.char_width(c) * font_size / 1000.0;
        if !piece.is_empty() && piece_width + char_width > max_width {
            pieces.push(std::mem::take(&mut piece));
            piece_width = 0.0;
        }
        piece.push(c);
        piece_width += char_width;
    }

    (pieces, piece, piece_width)
}

/// Assemble the lopdf document from wrapped lines
fn assemble(lines: &[String], font: &PdfFont, layout: &PdfLayout) -> Result<Vec<u8>, GenerationError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = font.register(&mut doc)?;
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let first_baseline = layout.page_height - layout.margin - layout.font_size;
    let mut kids: Vec<Object> = Vec::new();

    for page_lines in lines.chunks(layout.lines_per_page()) {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), layout.font_size.into()]),
            Operation::new("TL", vec![layout.line_height.into()]),
            Operation::new("Td", vec![layout.margin.into(), first_baseline.into()]),
        ];
        for line in page_lines {
            if !line.is_empty() {
                operations.push(Operation::new("Tj", vec![font.encode_text(line)]));
            }
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|e| GenerationError::Pdf(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                layout.page_width.into(),
                layout.page_height.into(),
            ],
            "Resources" => resources_id,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Cursor::new(Vec::new());
    doc.save_to(&mut buffer)
        .map_err(|e| GenerationError::Pdf(e.to_string()))?;
    Ok(buffer.into_inner())
}

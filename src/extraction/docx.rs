use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::document::{ExtractedBlock, DOCX_DOCUMENT_ENTRY};
use crate::errors::ExtractionError;
use crate::extraction::normalize_whitespace;

// @module: DOCX paragraph extraction (word/document.xml)

/// Extract the ordered paragraph blocks of a DOCX document
///
/// Opens the byte buffer as a ZIP archive and scans `word/document.xml` for
/// `w:p` paragraph elements. A paragraph carrying a `w:numPr` numbering
/// reference is flagged as a bullet. Run text is concatenated with the five
/// standard XML entities decoded; explicit `w:br`/`w:tab` markers become
/// `\n`/`\t`. Empty paragraphs are preserved as blank blocks so vertical
/// spacing survives regeneration.
pub fn extract_blocks(bytes: &[u8]) -> Result<Vec<ExtractedBlock>, ExtractionError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::InvalidArchive(e.to_string()))?;

    let mut xml = String::new();
    archive
        .by_name(DOCX_DOCUMENT_ENTRY)
        .map_err(|_| ExtractionError::MissingEntry(DOCX_DOCUMENT_ENTRY.to_string()))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractionError::Xml(e.to_string()))?;

    parse_document_xml(&xml)
}

/// Scan the document XML for paragraphs, runs, breaks and numbering refs
fn parse_document_xml(xml: &str) -> Result<Vec<ExtractedBlock>, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut blocks = Vec::new();
    let mut buf = Vec::new();

    let mut in_paragraph = false;
    let mut in_text = false;
    let mut is_bullet = false;
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => {
                    in_paragraph = true;
                    is_bullet = false;
                    text.clear();
                }
                b"w:t" if in_paragraph => in_text = true,
                b"w:numPr" if in_paragraph => is_bullet = true,
                b"w:br" if in_paragraph => text.push('\n'),
                b"w:tab" if in_paragraph => text.push('\t'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                // a self-closing paragraph is a blank block
                b"w:p" => blocks.push(ExtractedBlock::paragraph("")),
                b"w:numPr" if in_paragraph => is_bullet = true,
                b"w:br" if in_paragraph => text.push('\n'),
                b"w:tab" if in_paragraph => text.push('\t'),
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_text {
                    let decoded = e
                        .unescape()
                        .map_err(|err| ExtractionError::Xml(err.to_string()))?;
                    text.push_str(&normalize_whitespace(&decoded));
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => {
                    blocks.push(ExtractedBlock {
                        text: std::mem::take(&mut text),
                        is_bullet,
                    });
                    in_paragraph = false;
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractionError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(blocks)
}

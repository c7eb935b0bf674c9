use std::io::{Cursor, Read};

use once_cell::sync::Lazy;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use zip::ZipArchive;

use crate::document::ExtractedBlock;
use crate::errors::ExtractionError;
use crate::extraction::normalize_whitespace;

// @module: PPTX slide extraction (ppt/slides/slideN.xml)

// @const: Slide entry name pattern, capturing the slide number
static SLIDE_ENTRY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ppt/slides/slide(\d+)\.xml$").unwrap());

/// Extract the ordered paragraph blocks of a PPTX presentation
///
/// Enumerates every `ppt/slides/slideN.xml` entry and sorts by `N` before
/// concatenation — archive iteration order is not slide order (`slide10`
/// sorts after `slide2` here, not between `slide1` and `slide2`). Each
/// slide's `a:p` paragraphs are flagged as bullets when their `a:pPr`
/// carries a bullet definition (`a:buChar`/`a:buAutoNum`).
pub fn extract_blocks(bytes: &[u8]) -> Result<Vec<ExtractedBlock>, ExtractionError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::InvalidArchive(e.to_string()))?;

    let mut slides: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| {
            SLIDE_ENTRY_REGEX
                .captures(name)
                .and_then(|c| c[1].parse::<u32>().ok())
                .map(|n| (n, name.to_string()))
        })
        .collect();
    slides.sort_by_key(|(n, _)| *n);

    let mut blocks = Vec::new();
    for (_, entry) in slides {
        let mut xml = String::new();
        archive
            .by_name(&entry)
            .map_err(|_| ExtractionError::MissingEntry(entry.clone()))?
            .read_to_string(&mut xml)
            .map_err(|e| ExtractionError::Xml(e.to_string()))?;
        parse_slide_xml(&xml, &mut blocks)?;
    }

    Ok(blocks)
}

/// Scan one slide's XML for paragraphs, text runs and bullet definitions
fn parse_slide_xml(xml: &str, blocks: &mut Vec<ExtractedBlock>) -> Result<(), ExtractionError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut in_paragraph = false;
    let mut in_text = false;
    let mut is_bullet = false;
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"a:p" => {
                    in_paragraph = true;
                    is_bullet = false;
                    text.clear();
                }
                b"a:t" if in_paragraph => in_text = true,
                b"a:buChar" | b"a:buAutoNum" if in_paragraph => is_bullet = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if in_paragraph
                    && matches!(e.name().as_ref(), b"a:buChar" | b"a:buAutoNum")
                {
                    is_bullet = true;
                }
            }
            Ok(Event::Text(e)) => {
                if in_text {
                    let decoded = e
                        .unescape()
                        .map_err(|err| ExtractionError::Xml(err.to_string()))?;
                    text.push_str(&normalize_whitespace(&decoded));
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"a:t" => in_text = false,
                b"a:p" => {
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

    Ok(())
}

/*!
 * Tests for document generation
 */

use std::io::{Cursor, Read};

use doctran::document::DocumentFormat;
use doctran::extraction;
use doctran::generation::DocumentWriter;
use zip::ZipArchive;

/// Read one entry of a generated ZIP container as a string
fn read_zip_entry(bytes: &[u8], entry: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut content = String::new();
    archive
        .by_name(entry)
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    content
}

/// Test that generated DOCX paragraphs and bullets survive re-extraction
#[test]
fn test_generate_docx_withBullets_shouldRoundTripStructure() {
    let writer = DocumentWriter::default();
    let bytes = writer
        .generate("HELLO WORLD\n\n\u{2022} FIRST\n\u{2022} SECOND", DocumentFormat::Docx)
        .unwrap();

    let blocks = extraction::docx::extract_blocks(&bytes).unwrap();
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0].text, "HELLO WORLD");
    assert!(!blocks[0].is_bullet);
    assert_eq!(blocks[1].text, "FIRST");
    assert!(blocks[1].is_bullet);
    assert_eq!(blocks[2].text, "SECOND");
    assert!(blocks[2].is_bullet);
}

/// Test that dash and star bullet markers are also recognized
#[test]
fn test_generate_docx_withDashBullets_shouldMakeListItems() {
    let writer = DocumentWriter::default();
    let bytes = writer
        .generate("- one\n- two", DocumentFormat::Docx)
        .unwrap();

    let blocks = extraction::docx::extract_blocks(&bytes).unwrap();
    assert_eq!(blocks.len(), 2);
    assert!(blocks.iter().all(|b| b.is_bullet));
    assert_eq!(blocks[0].text, "one");
}

/// Test that URLs become hyperlink elements in the document XML
#[test]
fn test_generate_docx_withUrl_shouldEmitHyperlink() {
    let writer = DocumentWriter::default();
    let bytes = writer
        .generate("see https://example.com/page for details", DocumentFormat::Docx)
        .unwrap();

    let document_xml = read_zip_entry(&bytes, "word/document.xml");
    assert!(document_xml.contains("w:hyperlink"));

    let rels_xml = read_zip_entry(&bytes, "word/_rels/document.xml.rels");
    assert!(rels_xml.contains("https://example.com/page"));
}

/// Test that a generated PPTX carries the text on its single slide
#[test]
fn test_generate_pptx_withLines_shouldFillSingleSlide() {
    let writer = DocumentWriter::default();
    let bytes = writer
        .generate("TITLE\n\u{2022} POINT A\n\u{2022} POINT B", DocumentFormat::Pptx)
        .unwrap();

    let slide_xml = read_zip_entry(&bytes, "ppt/slides/slide1.xml");
    assert!(slide_xml.contains("<a:t>TITLE</a:t>"));
    assert!(slide_xml.contains("<a:t>\u{2022} POINT A</a:t>"));

    // structural parts are present
    read_zip_entry(&bytes, "[Content_Types].xml");
    read_zip_entry(&bytes, "ppt/presentation.xml");
    read_zip_entry(&bytes, "ppt/slideMasters/slideMaster1.xml");
}

/// Test that reserved XML characters are escaped on the slide
#[test]
fn test_generate_pptx_withReservedCharacters_shouldEscape() {
    let writer = DocumentWriter::default();
    let bytes = writer
        .generate("a < b & c > d", DocumentFormat::Pptx)
        .unwrap();

    let slide_xml = read_zip_entry(&bytes, "ppt/slides/slide1.xml");
    assert!(slide_xml.contains("a &lt; b &amp; c &gt; d"));
}

/// Test that a generated PPTX is recognized as PPTX by format sniffing
#[test]
fn test_generate_pptx_output_shouldSniffAsPptx() {
    let writer = DocumentWriter::default();
    let bytes = writer.generate("text", DocumentFormat::Pptx).unwrap();
    assert_eq!(DocumentFormat::sniff_bytes(&bytes), Some(DocumentFormat::Pptx));
}

/// Test that plain text is written back verbatim with normalized newlines
#[test]
fn test_generate_plainText_shouldPassThrough() {
    let writer = DocumentWriter::default();
    let bytes = writer
        .generate("line one\r\nline two", DocumentFormat::PlainText)
        .unwrap();
    assert_eq!(bytes, b"line one\nline two");
}

/*!
 * Tests for text extraction across the supported formats
 */

use doctran::document::DocumentFormat;
use doctran::errors::ExtractionError;
use doctran::extraction::{self, extract_text};

use crate::common;

/// Test that a DOCX flattens to paragraphs and marked bullet lines
#[test]
fn test_extract_text_withDocxParagraphAndBullets_shouldFlatten() {
    let docx = common::sample_docx();
    let text = extract_text(&docx, DocumentFormat::Docx).unwrap();
    assert_eq!(text, "Hello world\n\n\u{2022} first point\n\u{2022} second point");
}

/// Test that a bullet run interrupted by a paragraph starts a new list
#[test]
fn test_extract_text_withInterruptedBullets_shouldSeparateLists() {
    let docx = common::build_docx(
        r#"<w:p><w:pPr><w:numPr/></w:pPr><w:r><w:t>a</w:t></w:r></w:p>
<w:p><w:r><w:t>between</w:t></w:r></w:p>
<w:p><w:pPr><w:numPr/></w:pPr><w:r><w:t>b</w:t></w:r></w:p>"#,
    );
    let text = extract_text(&docx, DocumentFormat::Docx).unwrap();
    assert_eq!(text, "\u{2022} a\n\nbetween\n\n\u{2022} b");
}

/// Test that slide entries are visited in numeric order, not archive order
#[test]
fn test_extract_text_withManySlides_shouldSortNumerically() {
    // archive order 2, 10, 1; numeric order must win
    let pptx = common::build_pptx(&[
        (2, "<a:p><a:r><a:t>second</a:t></a:r></a:p>"),
        (10, "<a:p><a:r><a:t>tenth</a:t></a:r></a:p>"),
        (1, "<a:p><a:r><a:t>first</a:t></a:r></a:p>"),
    ]);
    let text = extract_text(&pptx, DocumentFormat::Pptx).unwrap();
    assert_eq!(text, "first\n\nsecond\n\ntenth");
}

/// Test that PPTX bullet paragraphs get the bullet marker
#[test]
fn test_extract_text_withPptxBullets_shouldMarkBullets() {
    let pptx = common::build_pptx(&[(
        1,
        r#"<a:p><a:r><a:t>Title</a:t></a:r></a:p><a:p><a:pPr><a:buChar char="-"/></a:pPr><a:r><a:t>point</a:t></a:r></a:p>"#,
    )]);
    let text = extract_text(&pptx, DocumentFormat::Pptx).unwrap();
    assert_eq!(text, "Title\n\n\u{2022} point");
}

/// Test that plain text passes through verbatim
#[test]
fn test_extract_text_withPlainText_shouldPassThrough() {
    let input = "line one\nline two\n\nparagraph";
    let text = extract_text(input.as_bytes(), DocumentFormat::PlainText).unwrap();
    assert_eq!(text, input);
}

/// Test that a non-ZIP buffer fails DOCX extraction cleanly
#[test]
fn test_extract_text_withBrokenArchive_shouldFail() {
    let result = extract_text(b"not a zip", DocumentFormat::Docx);
    assert!(matches!(result, Err(ExtractionError::InvalidArchive(_))));
}

/// Test that a ZIP without the document part reports the missing entry
#[test]
fn test_extract_text_withMissingDocumentEntry_shouldFail() {
    let zip = common::build_zip(&[("other.xml", "<x/>")]);
    let result = extract_text(&zip, DocumentFormat::Docx);
    match result {
        Err(ExtractionError::MissingEntry(entry)) => {
            assert_eq!(entry, "word/document.xml");
        }
        other => panic!("expected MissingEntry, got {:?}", other),
    }
}

/// Test that multi-run paragraphs concatenate and normalize whitespace
#[test]
fn test_extract_blocks_withMultipleRuns_shouldConcatenate() {
    let docx = common::build_docx(
        r#"<w:p><w:r><w:t>Hello </w:t></w:r><w:r><w:t xml:space="preserve">  big   world</w:t></w:r></w:p>"#,
    );
    let blocks = extraction::docx::extract_blocks(&docx).unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].text, "Hello  big world");
}

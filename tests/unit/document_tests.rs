/*!
 * Tests for document format detection
 */

use doctran::document::{DocumentFormat, SourceDocument};

use crate::common;

/// Test that the filename extension is the first detection source
#[test]
fn test_detect_withExtension_shouldUseExtension() {
    assert_eq!(
        DocumentFormat::detect(Some("report.docx"), None, b""),
        DocumentFormat::Docx
    );
    assert_eq!(
        DocumentFormat::detect(Some("slides.PPTX"), None, b""),
        DocumentFormat::Pptx
    );
    assert_eq!(
        DocumentFormat::detect(Some("notes.txt"), None, b""),
        DocumentFormat::PlainText
    );
}

/// Test that the extension wins even over a contradicting content type
#[test]
fn test_detect_withExtensionAndContentType_shouldPreferExtension() {
    assert_eq!(
        DocumentFormat::detect(Some("report.pdf"), Some("text/plain"), b""),
        DocumentFormat::Pdf
    );
}

/// Test that the declared content type is used when the name has no
/// recognized extension
#[test]
fn test_detect_withContentTypeOnly_shouldUseContentType() {
    assert_eq!(
        DocumentFormat::detect(Some("upload"), Some("application/pdf"), b""),
        DocumentFormat::Pdf
    );
    assert_eq!(
        DocumentFormat::detect(
            None,
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
            b""
        ),
        DocumentFormat::Docx
    );
    assert_eq!(
        DocumentFormat::detect(None, Some("text/markdown"), b""),
        DocumentFormat::PlainText
    );
}

/// Test that raw bytes are sniffed when name and content type say nothing
#[test]
fn test_detect_withBytesOnly_shouldSniff() {
    assert_eq!(
        DocumentFormat::detect(None, None, b"%PDF-1.7 rest"),
        DocumentFormat::Pdf
    );

    let docx = common::sample_docx();
    assert_eq!(DocumentFormat::detect(None, None, &docx), DocumentFormat::Docx);

    let pptx = common::build_pptx(&[(1, "<a:p><a:r><a:t>x</a:t></a:r></a:p>")]);
    assert_eq!(DocumentFormat::detect(None, None, &pptx), DocumentFormat::Pptx);
}

/// Test that detection never fails and falls back to plain text
#[test]
fn test_detect_withUnknownInput_shouldFallBackToPlainText() {
    assert_eq!(
        DocumentFormat::detect(Some("data.bin"), Some("application/octet-stream"), b"\x00\x01"),
        DocumentFormat::PlainText
    );
    assert_eq!(DocumentFormat::detect(None, None, b""), DocumentFormat::PlainText);
}

/// Test the extension round trip on the format enum
#[test]
fn test_extension_roundTrip_shouldMatch() {
    for format in [
        DocumentFormat::PlainText,
        DocumentFormat::Pdf,
        DocumentFormat::Docx,
        DocumentFormat::Pptx,
    ] {
        assert_eq!(DocumentFormat::from_extension(format.extension()), Some(format));
    }
    assert_eq!(DocumentFormat::from_extension("srt"), None);
}

/// Test that SourceDocument::format uses all three detection inputs
#[test]
fn test_source_document_format_withSniffedBytes_shouldDetect() {
    let document = SourceDocument::new(None, None, common::sample_docx());
    assert_eq!(document.format(), DocumentFormat::Docx);
}

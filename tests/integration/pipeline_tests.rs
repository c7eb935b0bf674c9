/*!
 * Integration tests for the end-to-end document translation pipeline.
 *
 * Each test drives detect -> extract -> translate -> generate through a
 * mock backend and inspects the regenerated document.
 */

use std::sync::Arc;

use doctran::app_config::Config;
use doctran::app_controller::TranslationPipeline;
use doctran::document::{DocumentFormat, SourceDocument};
use doctran::errors::AppError;
use doctran::extraction;
use doctran::providers::mock::MockBackend;

use crate::common;

fn pipeline_with(backend: MockBackend) -> TranslationPipeline {
    TranslationPipeline::with_backend(Config::default(), Arc::new(backend))
}

/// Test that a DOCX comes back as a DOCX with translated paragraphs and
/// bullets, under a language-tagged name
#[tokio::test]
async fn test_translate_document_withDocx_shouldPreserveFormatAndStructure() {
    let pipeline = pipeline_with(MockBackend::uppercase());
    let document = SourceDocument::new(
        Some("original.docx".to_string()),
        None,
        common::sample_docx(),
    );

    let output = pipeline
        .translate_document(&document, Some("en"), "pt")
        .await
        .unwrap();

    assert_eq!(output.file_name, "original.pt.docx");
    assert_eq!(output.format, DocumentFormat::Docx);
    assert_eq!(output.source_language, "en");

    let blocks = extraction::docx::extract_blocks(&output.bytes).unwrap();
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0].text, "HELLO WORLD");
    assert!(!blocks[0].is_bullet);
    assert_eq!(blocks[1].text, "FIRST POINT");
    assert!(blocks[1].is_bullet);
    assert_eq!(blocks[2].text, "SECOND POINT");
    assert!(blocks[2].is_bullet);
}

/// Test that detection supplies the source language when none is given
#[tokio::test]
async fn test_translate_document_withoutSource_shouldReportDetected() {
    let pipeline = pipeline_with(MockBackend::identity().with_detected_language("fr"));
    let document = SourceDocument::new(
        Some("notes.txt".to_string()),
        None,
        "bonjour".as_bytes().to_vec(),
    );

    let output = pipeline.translate_document(&document, None, "en").await.unwrap();
    assert_eq!(output.source_language, "fr");
    assert_eq!(output.file_name, "notes.en.txt");
    assert_eq!(output.bytes, b"bonjour");
}

/// Test that an unrecognized upload falls back to the plain-text pipeline
#[tokio::test]
async fn test_translate_document_withUnknownFormat_shouldFallBackToText() {
    let pipeline = pipeline_with(MockBackend::uppercase());
    let document = SourceDocument::new(None, None, "some raw content".as_bytes().to_vec());

    let output = pipeline
        .translate_document(&document, Some("en"), "de")
        .await
        .unwrap();

    assert_eq!(output.format, DocumentFormat::PlainText);
    assert_eq!(output.file_name, "file.de.txt");
    assert_eq!(output.bytes, b"SOME RAW CONTENT");
}

/// Test that an oversized upload is rejected before any extraction
#[tokio::test]
async fn test_translate_document_withOversizedUpload_shouldReject() {
    let mut config = Config::default();
    config.max_upload_bytes = 8;
    let pipeline = TranslationPipeline::with_backend(config, Arc::new(MockBackend::uppercase()));

    let document = SourceDocument::new(
        Some("big.txt".to_string()),
        None,
        "way more than eight bytes".as_bytes().to_vec(),
    );

    let result = pipeline.translate_document(&document, Some("en"), "pt").await;
    match result {
        Err(AppError::PayloadTooLarge { size, limit }) => {
            assert_eq!(limit, 8);
            assert!(size > limit);
        }
        other => panic!("expected PayloadTooLarge, got {:?}", other.map(|o| o.file_name)),
    }
}

/// Test that a backend failure fails the document with no partial output
#[tokio::test]
async fn test_translate_document_withFailingBackend_shouldPropagateError() {
    let pipeline = pipeline_with(MockBackend::failing());
    let document = SourceDocument::new(
        Some("doc.txt".to_string()),
        None,
        "content".as_bytes().to_vec(),
    );

    let result = pipeline.translate_document(&document, Some("en"), "pt").await;
    assert!(matches!(result, Err(AppError::Translation(_))));
}

/// Test that a PPTX is translated onto a regenerated single slide
#[tokio::test]
async fn test_translate_document_withPptx_shouldRegeneratePresentation() {
    let pipeline = pipeline_with(MockBackend::uppercase());
    let document = SourceDocument::new(
        Some("deck.pptx".to_string()),
        None,
        common::build_pptx(&[
            (1, "<a:p><a:r><a:t>intro</a:t></a:r></a:p>"),
            (2, "<a:p><a:r><a:t>closing</a:t></a:r></a:p>"),
        ]),
    );

    let output = pipeline
        .translate_document(&document, Some("en"), "it")
        .await
        .unwrap();

    assert_eq!(output.file_name, "deck.it.pptx");
    assert_eq!(DocumentFormat::sniff_bytes(&output.bytes), Some(DocumentFormat::Pptx));

    let text = extraction::extract_text(&output.bytes, DocumentFormat::Pptx).unwrap();
    assert!(text.contains("INTRO"));
    assert!(text.contains("CLOSING"));
}

/// Test disk-to-disk translation through translate_file
#[tokio::test]
async fn test_translate_file_withTextFile_shouldWriteOutput() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "letter.txt",
        "dear reader",
    )
    .unwrap();

    let mut config = Config::default();
    config.output_dir = temp_dir.path().join("out");
    let pipeline = TranslationPipeline::with_backend(config, Arc::new(MockBackend::uppercase()));

    let written = pipeline.translate_file(&input, Some("en"), "pt").await.unwrap();

    assert_eq!(
        written.file_name().unwrap().to_string_lossy(),
        "letter.pt.txt"
    );
    assert_eq!(std::fs::read(&written).unwrap(), b"DEAR READER");
}

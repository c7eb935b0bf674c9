/*!
 * Tests for translation orchestration over a mock backend
 */

use std::sync::Arc;

use doctran::errors::TranslationError;
use doctran::providers::mock::MockBackend;
use doctran::translation::{chunk_text, TranslationService};

/// Test that an explicit source language skips detection
#[tokio::test]
async fn test_translate_text_withExplicitSource_shouldSkipDetection() {
    let backend = Arc::new(MockBackend::uppercase());
    let service = TranslationService::new(backend.clone());

    let outcome = service
        .translate_text("hello world", Some("en"), "pt")
        .await
        .unwrap();

    assert_eq!(outcome.text, "HELLO WORLD");
    assert_eq!(outcome.source_language, "en");
    assert_eq!(backend.detect_call_count(), 0);
    assert_eq!(backend.translate_call_count(), 1);
}

/// Test that a missing source triggers exactly one detection call
#[tokio::test]
async fn test_translate_text_withoutSource_shouldDetectOnce() {
    let backend = Arc::new(MockBackend::uppercase().with_detected_language("fr"));
    let service = TranslationService::new(backend.clone());

    let outcome = service
        .translate_text("bonjour le monde", None, "en")
        .await
        .unwrap();

    assert_eq!(outcome.source_language, "fr");
    assert_eq!(backend.detect_call_count(), 1);
}

/// Test that "auto" behaves like a missing source
#[tokio::test]
async fn test_translate_text_withAutoSource_shouldDetect() {
    let backend = Arc::new(MockBackend::identity());
    let service = TranslationService::new(backend.clone());

    service
        .translate_text("some text", Some("auto"), "de")
        .await
        .unwrap();

    assert_eq!(backend.detect_call_count(), 1);
}

/// Test that an undetermined detection is reported but still translates
#[tokio::test]
async fn test_translate_text_withUndetectedLanguage_shouldStillTranslate() {
    let backend = Arc::new(MockBackend::undetected());
    let service = TranslationService::new(backend.clone());

    let outcome = service
        .translate_text("mystery text", None, "en")
        .await
        .unwrap();

    assert_eq!(outcome.source_language, "und");
    assert_eq!(outcome.text, "mystery text");
    assert_eq!(backend.translate_call_count(), 1);
}

/// Test that long input is split across multiple translate calls and the
/// pieces concatenate back to the complete text
#[tokio::test]
async fn test_translate_text_withSmallChunkBudget_shouldTranslateAllChunks() {
    let backend = Arc::new(MockBackend::identity().with_max_chunk_chars(10));
    let service = TranslationService::new(backend.clone());

    let text = "first line\nsecond line\nthird line";
    let outcome = service.translate_text(text, Some("en"), "pt").await.unwrap();

    assert_eq!(outcome.text, text);
    assert!(backend.translate_call_count() > 1);
    assert_eq!(
        backend.translate_call_count(),
        chunk_text(text, 10).len()
    );
}

/// Test that a backend failure on any chunk fails the whole document
#[tokio::test]
async fn test_translate_text_withFailingBackend_shouldPropagateError() {
    let backend = Arc::new(MockBackend::failing());
    let service = TranslationService::new(backend);

    let result = service.translate_text("text", Some("en"), "pt").await;
    assert!(matches!(result, Err(TranslationError::Provider(_))));
}

/// Test that empty input short-circuits without translate calls
#[tokio::test]
async fn test_translate_text_withEmptyText_shouldReturnEmpty() {
    let backend = Arc::new(MockBackend::uppercase());
    let service = TranslationService::new(backend.clone());

    let outcome = service.translate_text("", Some("en"), "pt").await.unwrap();
    assert_eq!(outcome.text, "");
    assert_eq!(backend.translate_call_count(), 0);
}

/// Test that the detection sample is capped at the configured prefix
#[tokio::test]
async fn test_translate_text_withLargeInput_shouldCapDetectionSample() {
    let backend = Arc::new(MockBackend::identity());
    let service = TranslationService::new(backend.clone()).with_detection_prefix_chars(100);

    let text = "x".repeat(10_000);
    service.translate_text(&text, None, "pt").await.unwrap();

    // one detection call regardless of input size
    assert_eq!(backend.detect_call_count(), 1);
}

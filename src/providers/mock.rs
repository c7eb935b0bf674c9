/*!
 * Mock backend implementations for testing.
 *
 * This module provides mock backends that simulate different behaviors:
 * - `MockBackend::uppercase()` - "translates" by uppercasing input
 * - `MockBackend::identity()` - returns input unchanged
 * - `MockBackend::failing()` - always fails with an error
 * - `MockBackend::undetected()` - detection always reports "und"
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::{LanguageEntry, TranslationBackend, UNDETERMINED_LANGUAGE};

/// Behavior mode for the mock backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Uppercase the input text
    Uppercase,
    /// Return the input text unchanged
    Identity,
    /// Always fail with a connection error
    Failing,
    /// Translate normally but report no detectable language
    Undetected,
}

/// Mock backend for testing translation orchestration
#[derive(Debug)]
pub struct MockBackend {
    /// Behavior mode
    behavior: MockBehavior,
    /// Language reported by detection
    detected_language: String,
    /// Character budget per translate call
    max_chunk_chars: usize,
    /// Number of detect calls issued
    detect_calls: Arc<AtomicUsize>,
    /// Number of translate calls issued
    translate_calls: Arc<AtomicUsize>,
}

impl MockBackend {
    /// Create a new mock backend with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            detected_language: "en".to_string(),
            max_chunk_chars: 5000,
            detect_calls: Arc::new(AtomicUsize::new(0)),
            translate_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock that uppercases input
    pub fn uppercase() -> Self {
        Self::new(MockBehavior::Uppercase)
    }

    /// Create a mock that echoes input unchanged
    pub fn identity() -> Self {
        Self::new(MockBehavior::Identity)
    }

    /// Create a mock that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock whose detection reports "und"
    pub fn undetected() -> Self {
        Self::new(MockBehavior::Undetected)
    }

    /// Override the chunk budget (to force multi-chunk translation in tests)
    pub fn with_max_chunk_chars(mut self, max_chunk_chars: usize) -> Self {
        self.max_chunk_chars = max_chunk_chars;
        self
    }

    /// Override the detected language
    pub fn with_detected_language(mut self, code: impl Into<String>) -> Self {
        self.detected_language = code.into();
        self
    }

    /// Number of detect calls made so far
    pub fn detect_call_count(&self) -> usize {
        self.detect_calls.load(Ordering::SeqCst)
    }

    /// Number of translate calls made so far
    pub fn translate_call_count(&self) -> usize {
        self.translate_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationBackend for MockBackend {
    async fn detect_language(&self, _text: &str) -> Result<String, ProviderError> {
        self.detect_calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "mock backend is configured to fail".to_string(),
            )),
            MockBehavior::Undetected => Ok(UNDETERMINED_LANGUAGE.to_string()),
            _ => Ok(self.detected_language.clone()),
        }
    }

    async fn translate(
        &self,
        text: &str,
        _source: &str,
        _target: &str,
    ) -> Result<String, ProviderError> {
        self.translate_calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            MockBehavior::Uppercase => Ok(text.to_uppercase()),
            MockBehavior::Identity | MockBehavior::Undetected => Ok(text.to_string()),
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "mock backend is configured to fail".to_string(),
            )),
        }
    }

    async fn list_languages(&self) -> Result<Vec<LanguageEntry>, ProviderError> {
        Ok(vec![
            LanguageEntry {
                code: "en".to_string(),
                name: "English".to_string(),
            },
            LanguageEntry {
                code: "pt".to_string(),
                name: "Portuguese".to_string(),
            },
        ])
    }

    fn max_chunk_chars(&self) -> usize {
        self.max_chunk_chars
    }
}

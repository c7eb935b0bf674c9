/*!
 * Core translation service implementation.
 *
 * This module contains the TranslationService, which resolves the source
 * language for a document and translates its text chunk by chunk through a
 * TranslationBackend.
 */

use std::sync::Arc;

use log::{debug, info};

use crate::errors::TranslationError;
use crate::providers::{TranslationBackend, AUTO_LANGUAGE, UNDETERMINED_LANGUAGE};
use crate::translation::chunk::chunk_text;

/// Default number of characters fed to the language-detection call
pub const DEFAULT_DETECTION_PREFIX_CHARS: usize = 5000;

/// Translated text plus the source language that was applied to it
#[derive(Debug, Clone)]
pub struct TranslationOutcome {
    /// Concatenated translated text, in original chunk order
    pub text: String,
    /// Resolved source language: the caller's, or the detected one
    pub source_language: String,
}

/// Orchestrates chunked translation of one document's text
///
/// Stateless across documents. Detection happens at most once per document;
/// chunks are translated sequentially and in order, and any single chunk
/// failure fails the whole document. No retry happens here — that policy
/// belongs to the backend client.
pub struct TranslationService {
    /// Backend used for detection and translation
    backend: Arc<dyn TranslationBackend>,
    /// Character budget for the detection sample
    detection_prefix_chars: usize,
}

impl TranslationService {
    /// Create a new translation service over a backend
    pub fn new(backend: Arc<dyn TranslationBackend>) -> Self {
        Self {
            backend,
            detection_prefix_chars: DEFAULT_DETECTION_PREFIX_CHARS,
        }
    }

    /// Override the detection sample size
    pub fn with_detection_prefix_chars(mut self, chars: usize) -> Self {
        self.detection_prefix_chars = chars;
        self
    }

    /// The backend this service translates through
    pub fn backend(&self) -> &Arc<dyn TranslationBackend> {
        &self.backend
    }

    /// Translate a document's extracted text to the target language
    ///
    /// When `source` is absent or blank, one detection call is issued
    /// against a bounded prefix of the text and its result applies to every
    /// chunk. An undetermined result is passed to the backend as "auto".
    pub async fn translate_text(
        &self,
        text: &str,
        source: Option<&str>,
        target: &str,
    ) -> Result<TranslationOutcome, TranslationError> {
        let source_language = match source.map(str::trim) {
            Some(lang) if !lang.is_empty() && lang != AUTO_LANGUAGE => lang.to_string(),
            _ => {
                let sample = char_prefix(text, self.detection_prefix_chars);
                self.backend.detect_language(sample).await?
            }
        };

        // the backend refuses "und" as a source; ask it to guess instead
        let effective_source = if source_language == UNDETERMINED_LANGUAGE {
            AUTO_LANGUAGE
        } else {
            source_language.as_str()
        };

        if text.is_empty() {
            return Ok(TranslationOutcome {
                text: String::new(),
                source_language,
            });
        }

        let chunks = chunk_text(text, self.backend.max_chunk_chars());
        info!(
            "Translating {} chunk(s) from '{}' to '{}'",
            chunks.len(),
            effective_source,
            target
        );

        let mut translated = String::with_capacity(text.len());
        for (index, chunk) in chunks.iter().enumerate() {
            debug!(
                "Translating chunk {}/{} ({} chars)",
                index + 1,
                chunks.len(),
                chunk.chars().count()
            );
            let piece = self
                .backend
                .translate(chunk, effective_source, target)
                .await?;
            translated.push_str(&piece);
        }

        Ok(TranslationOutcome {
            text: translated,
            source_language,
        })
    }
}

/// First `count` characters of a text, on a valid char boundary
fn char_prefix(text: &str, count: usize) -> &str {
    match text.char_indices().nth(count) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

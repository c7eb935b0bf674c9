/*!
 * Translation backend clients.
 *
 * This module contains the `TranslationBackend` trait the orchestration
 * layer talks to, plus the implementations:
 * - LibreTranslate: HTTP client for a LibreTranslate-compatible server
 * - Mock: scriptable in-process backend for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Sentinel language code for text the backend could not classify
///
/// Downstream treats it as "auto" when issuing translate calls.
pub const UNDETERMINED_LANGUAGE: &str = "und";

/// Source-language value that asks the backend to guess per request
pub const AUTO_LANGUAGE: &str = "auto";

/// A language supported by the translation backend
#[derive(Debug, Clone, serde::Deserialize)]
pub struct LanguageEntry {
    /// ISO 639-1 code
    pub code: String,
    /// Human-readable name
    pub name: String,
}

/// Common trait for machine-translation backends
///
/// Both calls are synchronous request/response from the caller's point of
/// view; retry and backoff policy lives inside the client, never in the
/// orchestration layer.
#[async_trait]
pub trait TranslationBackend: Send + Sync + Debug {
    /// Detect the language of a text sample
    ///
    /// Returns an ISO 639-1 code, or [`UNDETERMINED_LANGUAGE`] when the
    /// backend reports no detection.
    async fn detect_language(&self, text: &str) -> Result<String, ProviderError>;

    /// Translate one chunk of text
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError>;

    /// List the languages this backend can translate between
    async fn list_languages(&self) -> Result<Vec<LanguageEntry>, ProviderError>;

    /// Maximum payload size per translate call, in characters
    fn max_chunk_chars(&self) -> usize;
}

pub mod libretranslate;
pub mod mock;

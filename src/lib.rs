/*!
 * # doctran - format-preserving document translation
 *
 * A Rust library for translating documents while keeping their file
 * format: a PDF in, a translated PDF out, and the same for DOCX, PPTX
 * and plain text.
 *
 * ## Features
 *
 * - Format detection from filename, declared MIME type or raw bytes
 * - Text extraction with paragraph and bullet structure markers
 * - Chunked translation through a LibreTranslate-compatible server,
 *   with optional source-language detection
 * - Regeneration of the translated text in the original format
 * - Batch translation of whole directories
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `document`: Document model and format detection
 * - `extraction`: Per-format text extractors:
 *   - `extraction::docx`: DOCX paragraph extraction
 *   - `extraction::pptx`: PPTX slide-order extraction
 *   - `extraction::pdf`: PDF text extraction
 * - `translation`: Chunking and translation orchestration:
 *   - `translation::chunk`: Newline-aware text chunking
 *   - `translation::core`: Detection and sequential chunk translation
 * - `generation`: Per-format document writers:
 *   - `generation::docx`: Paragraphs, bullets and hyperlinks
 *   - `generation::pptx`: Minimal single-slide package
 *   - `generation::pdf`: Paginated layout with measured word wrap
 *   - `generation::font`: TrueType metrics and PDF font embedding
 * - `file_utils`: File system operations
 * - `app_controller`: End-to-end pipeline
 * - `language_utils`: ISO language code utilities
 * - `providers`: Translation backend clients:
 *   - `providers::libretranslate`: LibreTranslate HTTP client
 *   - `providers::mock`: Scriptable backend for tests
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod document;
pub mod errors;
pub mod extraction;
pub mod file_utils;
pub mod generation;
pub mod language_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{PipelineOutput, TranslationPipeline};
pub use document::{DocumentFormat, SourceDocument};
pub use errors::AppError;

/*!
 * Application controller that wires the pipeline together.
 *
 * One `TranslationPipeline` owns the backend client, the translation
 * service and the document writer for the lifetime of the process. Each
 * document moves through detect -> extract -> translate -> generate as a
 * single all-or-nothing unit: any stage error fails that document and no
 * partial output is produced.
 */

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use log::info;

use crate::app_config::Config;
use crate::document::{DocumentFormat, SourceDocument};
use crate::errors::AppError;
use crate::extraction::extract_text;
use crate::file_utils::FileManager;
use crate::generation::DocumentWriter;
use crate::providers::libretranslate::LibreTranslate;
use crate::providers::{LanguageEntry, TranslationBackend};
use crate::translation::TranslationService;

/// Result of translating one document
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Suggested output file name, `<stem>.<target>.<ext>`
    pub file_name: String,
    /// Generated document bytes, same format as the input
    pub bytes: Vec<u8>,
    /// Source language that was applied (given or detected)
    pub source_language: String,
    /// Format shared by input and output
    pub format: DocumentFormat,
}

/// End-to-end document translation pipeline
pub struct TranslationPipeline {
    /// Application configuration
    config: Config,
    /// Chunked translation orchestrator
    service: TranslationService,
    /// Format-preserving document writer
    writer: DocumentWriter,
}

impl TranslationPipeline {
    /// Create a pipeline backed by the configured translation server
    pub fn new(config: Config) -> Self {
        let backend = Arc::new(LibreTranslate::with_config(
            config.backend.endpoint.clone(),
            config.backend.api_key.clone(),
            config.backend.max_chars_per_request,
            config.backend.timeout_secs,
            config.backend.max_retries,
            config.backend.retry_backoff_ms,
        ));
        Self::with_backend(config, backend)
    }

    /// Create a pipeline over an explicit backend (used by tests)
    pub fn with_backend(config: Config, backend: Arc<dyn TranslationBackend>) -> Self {
        let service = TranslationService::new(backend)
            .with_detection_prefix_chars(config.detection_prefix_chars);
        let writer = DocumentWriter::new(config.docx.to_style(), config.pdf.to_layout());
        Self {
            config,
            service,
            writer,
        }
    }

    /// Translate one in-memory document to the target language
    ///
    /// `source` of `None` or `"auto"` triggers language detection. The
    /// output keeps the input's format and carries a name derived from
    /// the original file name and the target language.
    pub async fn translate_document(
        &self,
        document: &SourceDocument,
        source: Option<&str>,
        target: &str,
    ) -> Result<PipelineOutput, AppError> {
        if document.bytes.len() > self.config.max_upload_bytes {
            return Err(AppError::PayloadTooLarge {
                size: document.bytes.len(),
                limit: self.config.max_upload_bytes,
            });
        }

        let format = document.format();
        info!(
            "Translating {} ({} bytes, format {})",
            document.file_name.as_deref().unwrap_or("<unnamed>"),
            document.bytes.len(),
            format
        );

        let text = extract_text(&document.bytes, format)?;
        let outcome = self.service.translate_text(&text, source, target).await?;
        let bytes = self.writer.generate(&outcome.text, format)?;

        Ok(PipelineOutput {
            file_name: FileManager::output_file_name(
                document.file_name.as_deref(),
                target,
                format.extension(),
            ),
            bytes,
            source_language: outcome.source_language,
            format,
        })
    }

    /// Translate a document from disk and write the result to the output
    /// directory, returning the path of the written file
    pub async fn translate_file(
        &self,
        input: &Path,
        source: Option<&str>,
        target: &str,
    ) -> Result<PathBuf, AppError> {
        let bytes = std::fs::read(input)
            .context(format!("Failed to read input file: {}", input.display()))?;
        let file_name = input
            .file_name()
            .map(|n| n.to_string_lossy().to_string());

        let document = SourceDocument::new(file_name, None, bytes);
        let output = self.translate_document(&document, source, target).await?;

        let path = FileManager::save_output(&self.config.output_dir, &output.file_name, &output.bytes)?;
        info!(
            "Wrote {} (source language: {})",
            path.display(),
            output.source_language
        );
        Ok(path)
    }

    /// Languages the backend can translate between
    pub async fn list_languages(&self) -> Result<Vec<LanguageEntry>, AppError> {
        let languages = self
            .service
            .backend()
            .list_languages()
            .await
            .map_err(crate::errors::TranslationError::from)?;
        Ok(languages)
    }

    /// The active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

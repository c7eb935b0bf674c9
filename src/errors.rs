/*!
 * Error types for the doctran application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to the translation backend API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The backend returned a success status but no usable body
    #[error("Empty response from backend: {0}")]
    EmptyResponse(String),
}

/// Errors that can occur while extracting text from a document
///
/// Extraction failures are fatal for the current document; there is no
/// partial-success mode.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The byte buffer could not be opened as a ZIP container
    #[error("Invalid document archive: {0}")]
    InvalidArchive(String),

    /// A required entry is missing from the OOXML container
    #[error("Missing archive entry: {0}")]
    MissingEntry(String),

    /// The internal XML could not be read or parsed
    #[error("Unreadable document XML: {0}")]
    Xml(String),

    /// The PDF content streams could not be decoded
    #[error("Unreadable PDF: {0}")]
    Pdf(String),
}

/// Errors that can occur while generating an output document
#[derive(Error, Debug)]
pub enum GenerationError {
    /// DOCX packaging failed
    #[error("Failed to generate DOCX: {0}")]
    Docx(String),

    /// PPTX packaging failed
    #[error("Failed to generate PPTX: {0}")]
    Pptx(String),

    /// PDF assembly failed
    #[error("Failed to generate PDF: {0}")]
    Pdf(String),

    /// Error from an underlying I/O operation
    #[error("I/O error during generation: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur during translation orchestration
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the backend API client
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Upload exceeds the configured size limit; rejected before extraction
    #[error("Payload too large: {size} bytes exceeds limit of {limit} bytes")]
    PayloadTooLarge {
        /// Actual size of the uploaded document
        size: usize,
        /// Configured maximum upload size
        limit: usize,
    },

    /// Error from text extraction
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Error from document generation
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
